/*!
Participant lists, lucky draws and random groups.

A session works on one [`Roster`]. The [`Lottery`] and the grouping functions
read it but never change it.

```
use lucky_draw::*;

let mut roster = Roster::new();
roster.ingest_text("Anna, Bob\nClara");

let mut rng = SystemRng;
let mut lottery = Lottery::default();
let winner = lottery.draw(roster.participants(), &mut rng, |_spin| {})?;
assert_eq!(lottery.remaining_pool(roster.participants()).len(), 2);
assert!(!lottery.remaining_pool(roster.participants()).contains(&&winner));

let groups = generate_groups(roster.participants(), 2, &mut rng)?;
assert_eq!(groups.len(), 2);
# Ok::<(), DrawError>(())
```
*/

mod config;
mod decoding;
mod grouping;
mod ids;
mod lottery;
pub mod manual;
mod random;
mod roster;

pub use crate::config::*;
pub use crate::decoding::{decode_roster_bytes, RosterEncoding};
pub use crate::grouping::{clamp_group_size, generate_groups, parse_group_size, Grouping};
pub use crate::lottery::{remaining_pool, DrawFrame, Lottery, LotteryState};
pub use crate::random::{RandomSource, SeededRng, SystemRng};
pub use crate::roster::{duplicate_report, Roster, DEMO_NAMES};
