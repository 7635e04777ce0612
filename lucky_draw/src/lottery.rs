use std::collections::HashSet;

use log::{debug, info};

use crate::config::*;
use crate::random::RandomSource;

/// The participants that can still win.
///
/// With repeats allowed, this is the whole roster. Otherwise, everybody whose
/// id appears in the history is excluded. Names play no role here.
pub fn remaining_pool<'a>(
    roster: &'a [Participant],
    history: &[Participant],
    allow_repeats: bool,
) -> Vec<&'a Participant> {
    if allow_repeats {
        return roster.iter().collect();
    }
    let winner_ids: HashSet<ParticipantId> = history.iter().map(|p| p.id).collect();
    roster
        .iter()
        .filter(|p| !winner_ids.contains(&p.id))
        .collect()
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum LotteryState {
    Idle,
    /// A draw has started. The winner is drawn once all the frames are shown.
    Drawing { frames_left: u32 },
}

/// What to show after one tick of a draw.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum DrawFrame {
    /// A display-only pick. It has no influence on the outcome.
    Spin(Participant),
    /// The draw is over.
    Winner(Participant),
    /// No draw is running, nothing to show.
    Idle,
}

/// A lottery session: the win history and the draw in progress, if any.
///
/// The roster is not owned by the lottery. It is passed to every call, so the
/// pool always reflects the current roster.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Lottery {
    settings: LotterySettings,
    // Most recent first.
    history: Vec<Participant>,
    current_winner: Option<Participant>,
    state: LotteryState,
}

impl Default for Lottery {
    fn default() -> Self {
        Lottery::new(LotterySettings::DEFAULT_SETTINGS)
    }
}

impl Lottery {
    pub fn new(settings: LotterySettings) -> Lottery {
        Lottery {
            settings,
            history: Vec::new(),
            current_winner: None,
            state: LotteryState::Idle,
        }
    }

    pub fn settings(&self) -> &LotterySettings {
        &self.settings
    }

    pub fn allow_repeats(&self) -> bool {
        self.settings.allow_repeats
    }

    /// Changes the repeat policy. The history is kept as is.
    pub fn set_allow_repeats(&mut self, allow_repeats: bool) {
        info!("Setting allow_repeats to {}", allow_repeats);
        self.settings.allow_repeats = allow_repeats;
    }

    pub fn history(&self) -> &[Participant] {
        &self.history
    }

    pub fn current_winner(&self) -> Option<&Participant> {
        self.current_winner.as_ref()
    }

    pub fn state(&self) -> LotteryState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, LotteryState::Drawing { .. })
    }

    pub fn remaining_pool<'a>(&self, roster: &'a [Participant]) -> Vec<&'a Participant> {
        remaining_pool(roster, &self.history, self.settings.allow_repeats)
    }

    /// Starts a draw. Nothing changes if a draw is already running or if
    /// nobody is left in the pool.
    pub fn begin_draw(&mut self, roster: &[Participant]) -> Result<(), DrawError> {
        if self.is_drawing() {
            return Err(DrawError::DrawInProgress);
        }
        let pool_size = self.remaining_pool(roster).len();
        if pool_size == 0 {
            return Err(DrawError::PoolExhausted);
        }
        debug!(
            "begin_draw: pool size: {} frames: {}",
            pool_size, self.settings.animation_frames
        );
        self.current_winner = None;
        self.state = LotteryState::Drawing {
            frames_left: self.settings.animation_frames,
        };
        Ok(())
    }

    /// Advances the running draw by one frame.
    ///
    /// The winner is drawn on the last tick, uniformly over the pool as it is at
    /// that moment, independently of the frames shown before. If the pool
    /// became empty in the meantime the draw is abandoned.
    pub fn tick<R: RandomSource>(
        &mut self,
        roster: &[Participant],
        rng: &mut R,
    ) -> Result<DrawFrame, DrawError> {
        let frames_left = match self.state {
            LotteryState::Idle => return Ok(DrawFrame::Idle),
            LotteryState::Drawing { frames_left } => frames_left,
        };
        let pool = self.remaining_pool(roster);
        if pool.is_empty() {
            self.state = LotteryState::Idle;
            return Err(DrawError::PoolExhausted);
        }
        if frames_left > 0 {
            let shown = pool[rng.pick_index(pool.len())].clone();
            self.state = LotteryState::Drawing {
                frames_left: frames_left - 1,
            };
            return Ok(DrawFrame::Spin(shown));
        }
        let winner = pool[rng.pick_index(pool.len())].clone();
        info!(
            "Drew {} ({}) out of {} participants",
            winner.name,
            winner.id,
            pool.len()
        );
        self.history.insert(0, winner.clone());
        self.current_winner = Some(winner.clone());
        self.state = LotteryState::Idle;
        Ok(DrawFrame::Winner(winner))
    }

    /// Stops the running draw without a winner.
    pub fn cancel_draw(&mut self) {
        if self.is_drawing() {
            debug!("cancel_draw: draw abandoned");
            self.state = LotteryState::Idle;
        }
    }

    /// Runs a whole draw. `on_frame` is called with every display-only pick;
    /// pacing the frames is up to the caller.
    pub fn draw<R, F>(
        &mut self,
        roster: &[Participant],
        rng: &mut R,
        mut on_frame: F,
    ) -> Result<Participant, DrawError>
    where
        R: RandomSource,
        F: FnMut(&Participant),
    {
        self.begin_draw(roster)?;
        loop {
            match self.tick(roster, rng)? {
                DrawFrame::Spin(p) => on_frame(&p),
                DrawFrame::Winner(p) => return Ok(p),
                // begin_draw succeeded, so the state is Drawing until the winner.
                DrawFrame::Idle => return Err(DrawError::PoolExhausted),
            }
        }
    }

    /// Forgets all the previous winners.
    pub fn reset(&mut self) {
        info!("Resetting lottery history of {} winners", self.history.len());
        self.history.clear();
        self.current_winner = None;
        self.state = LotteryState::Idle;
    }
}
