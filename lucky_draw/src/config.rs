// ********* Roster data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use crate::ids::ParticipantId;

/// A person taking part in a draw or in a grouping.
///
/// The identity of a participant is its `id`. Names are only used for display
/// and may be shared by several participants.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    /// Creates a participant with a freshly generated identifier.
    pub fn new(name: &str) -> Participant {
        Participant {
            id: ParticipantId::generate(),
            name: name.to_string(),
        }
    }
}

// ******** Output data structures *********

/// One group of a partition. Group ids start at 1 and follow the output order.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: u32,
    pub members: Vec<Participant>,
}

/// Occurrences of each name in a roster.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct DuplicateReport {
    /// Names in the order they were first seen, with their number of occurrences.
    pub name_counts: Vec<(String, usize)>,
    /// Same counts, by name.
    pub counts: HashMap<String, usize>,
    pub has_duplicates: bool,
}

impl DuplicateReport {
    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// The names that appear more than once, in first-seen order.
    pub fn duplicated_names(&self) -> Vec<&str> {
        self.name_counts
            .iter()
            .filter(|(_, c)| *c > 1)
            .map(|(n, _)| n.as_str())
            .collect()
    }
}

/// Errors reported to the user. None of them is fatal.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum DrawError {
    /// The file content is neither UTF-8 nor Big5.
    EncodingUnrecognized,
    /// There is nobody left to draw.
    PoolExhausted,
    /// The requested group size is not a positive integer.
    InvalidGroupSize { input: String },
    /// A draw was requested while another one is still running.
    DrawInProgress,
}

impl Error for DrawError {}

impl Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::EncodingUnrecognized => write!(
                f,
                "unrecognized file encoding, the file must be UTF-8 or Big5"
            ),
            DrawError::PoolExhausted => write!(f, "everyone has already been drawn"),
            DrawError::InvalidGroupSize { input } => {
                write!(f, "invalid group size {:?}, expected a positive integer", input)
            }
            DrawError::DrawInProgress => write!(f, "a draw is already in progress"),
        }
    }
}

// ********* Configuration **********

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct LotterySettings {
    /// When false, a participant can win at most once until the history is reset.
    pub allow_repeats: bool,
    /// Number of display-only picks shown before the winner is drawn.
    pub animation_frames: u32,
    /// Delay between two animation frames.
    pub frame_interval: Duration,
}

impl LotterySettings {
    pub const DEFAULT_SETTINGS: LotterySettings = LotterySettings {
        allow_repeats: false,
        animation_frames: 21,
        frame_interval: Duration::from_millis(80),
    };
}

impl Default for LotterySettings {
    fn default() -> Self {
        LotterySettings::DEFAULT_SETTINGS
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct GroupingSettings {
    pub group_size: usize,
}

impl GroupingSettings {
    pub const DEFAULT_SETTINGS: GroupingSettings = GroupingSettings { group_size: 4 };
}

impl Default for GroupingSettings {
    fn default() -> Self {
        GroupingSettings::DEFAULT_SETTINGS
    }
}
