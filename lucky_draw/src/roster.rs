use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::config::*;
use crate::decoding::decode_roster_bytes;

/// Sample names, to try the tool without a file.
pub const DEMO_NAMES: [&str; 25] = [
    "王小明", "李大華", "張美麗", "陳志豪", "林怡君", "陳建國", "吳雅婷", "楊宗緯", "蔡依林", "周杰倫",
    "張惠妹", "林俊傑", "田馥甄", "蕭敬騰", "鄧紫棋", "五月天", "孫燕姿", "梁靜茹", "陳奕迅", "王力宏",
    "劉德華", "張學友", "郭富城", "黎明", "金城武",
];

/// The ordered list of participants of a session.
///
/// Duplicate names are allowed. Every mutation bumps the revision, which lets
/// derived results (such as groupings) detect that they are out of date.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
    revision: u64,
}

impl Roster {
    pub fn new() -> Roster {
        Roster::default()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Adds the names contained in free text.
    ///
    /// Names are separated by newlines or commas, in any mix. Each name is
    /// trimmed and empty names are dropped. Returns the number of participants
    /// added.
    pub fn ingest_text(&mut self, text: &str) -> usize {
        self.ingest_names(text.split(|c: char| c == '\n' || c == ','))
    }

    /// Adds the names contained in the raw bytes of a file.
    ///
    /// There is one name per line. If the line is a CSV row, only the first
    /// column is used. Nothing is added if the bytes cannot be decoded.
    pub fn ingest_bytes(&mut self, bytes: &[u8]) -> Result<usize, DrawError> {
        let (text, encoding) = decode_roster_bytes(bytes)?;
        debug!("ingest_bytes: decoded {} bytes as {:?}", bytes.len(), encoding);
        let names = text
            .split(|c: char| c == '\n' || c == '\r')
            .map(|line| line.split(',').next().unwrap_or(""));
        Ok(self.ingest_names(names))
    }

    /// Adds names that have already been split, for example the cells of a
    /// spreadsheet column.
    pub fn ingest_names<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added: Vec<Participant> = names
            .into_iter()
            .filter_map(|s| {
                let name = s.as_ref().trim();
                if name.is_empty() {
                    None
                } else {
                    Some(Participant::new(name))
                }
            })
            .collect();
        let count = added.len();
        if count > 0 {
            self.participants.extend(added);
            self.revision += 1;
        }
        info!("Added {} participants, roster size: {}", count, self.len());
        count
    }

    pub fn load_demo(&mut self) -> usize {
        self.ingest_names(DEMO_NAMES)
    }

    /// Removes everybody. Asking for a confirmation is up to the caller.
    pub fn clear(&mut self) {
        info!("Clearing roster of {} participants", self.len());
        self.participants.clear();
        self.revision += 1;
    }

    /// Keeps the first participant for each name and drops the later ones.
    /// Returns the number of participants removed.
    pub fn remove_duplicates(&mut self) -> usize {
        let before = self.participants.len();
        let mut seen: HashSet<String> = HashSet::new();
        self.participants.retain(|p| seen.insert(p.name.clone()));
        let removed = before - self.participants.len();
        if removed > 0 {
            self.revision += 1;
        }
        info!("Removed {} duplicate participants", removed);
        removed
    }

    pub fn duplicates(&self) -> DuplicateReport {
        duplicate_report(&self.participants)
    }
}

/// Counts the occurrences of each name.
pub fn duplicate_report(participants: &[Participant]) -> DuplicateReport {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut name_counts: Vec<(String, usize)> = Vec::new();
    for p in participants.iter() {
        match positions.get(p.name.as_str()) {
            Some(idx) => name_counts[*idx].1 += 1,
            None => {
                positions.insert(p.name.as_str(), name_counts.len());
                name_counts.push((p.name.clone(), 1));
            }
        }
    }
    let has_duplicates = name_counts.iter().any(|(_, c)| *c > 1);
    let counts: HashMap<String, usize> = name_counts.iter().cloned().collect();
    DuplicateReport {
        name_counts,
        counts,
        has_duplicates,
    }
}
