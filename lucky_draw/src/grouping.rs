use log::{debug, info};

use crate::config::*;
use crate::random::RandomSource;
use crate::roster::Roster;

/// Splits the roster into random groups of `group_size` people.
///
/// The roster is shuffled, then cut into consecutive chunks. The last group is
/// smaller when the roster size is not a multiple of `group_size`; its members
/// are not spread over the other groups.
pub fn generate_groups<R: RandomSource>(
    participants: &[Participant],
    group_size: usize,
    rng: &mut R,
) -> Result<Vec<Group>, DrawError> {
    if group_size == 0 {
        return Err(DrawError::InvalidGroupSize {
            input: group_size.to_string(),
        });
    }
    let mut shuffled: Vec<Participant> = participants.to_vec();
    rng.shuffle(&mut shuffled);

    let groups: Vec<Group> = shuffled
        .chunks(group_size)
        .enumerate()
        .map(|(idx, members)| Group {
            id: idx as u32 + 1,
            members: members.to_vec(),
        })
        .collect();
    info!(
        "Split {} participants into {} groups of {}",
        participants.len(),
        groups.len(),
        group_size
    );
    Ok(groups)
}

/// Reads a group size typed by the user.
pub fn parse_group_size(input: &str) -> Result<usize, DrawError> {
    match input.trim().parse::<usize>() {
        Ok(x) if x >= 1 => Ok(x),
        x => {
            debug!("parse_group_size: rejected {:?}: {:?}", input, x);
            Err(DrawError::InvalidGroupSize {
                input: input.to_string(),
            })
        }
    }
}

/// Brings a requested group size within `[1, roster_len]`. An empty roster
/// still gives a size of 1.
pub fn clamp_group_size(requested: usize, roster_len: usize) -> usize {
    requested.clamp(1, roster_len.max(1))
}

/// Groups together with the roster revision they were computed from.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Grouping {
    pub revision: u64,
    pub group_size: usize,
    pub groups: Vec<Group>,
}

impl Grouping {
    pub fn generate<R: RandomSource>(
        roster: &Roster,
        group_size: usize,
        rng: &mut R,
    ) -> Result<Grouping, DrawError> {
        let groups = generate_groups(roster.participants(), group_size, rng)?;
        Ok(Grouping {
            revision: roster.revision(),
            group_size,
            groups,
        })
    }

    /// False once the roster has changed since the groups were made.
    pub fn is_current(&self, roster: &Roster) -> bool {
        self.revision == roster.revision()
    }
}
