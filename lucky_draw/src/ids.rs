use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a participant.
///
/// Identifiers are random and unique within a session for all practical
/// purposes. They are never derived from the name.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    pub fn generate() -> ParticipantId {
        ParticipantId(Uuid::new_v4())
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The short form is enough to tell participants apart on screen.
        write!(f, "{}", &self.0.simple().to_string()[..8])
    }
}
