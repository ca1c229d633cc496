//! Simulation commands and the fixed tick
//!
//! `advance()` applies the movement/collision/consumption rules once. The
//! command handlers are the only other way the state changes; commands that
//! make no sense in the current phase are ignored and report `false`.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::error::SimError;
use super::spawn::place_item;
use super::state::{Cell, Direction, Phase, SimulationState};
use crate::consts::*;
use crate::persistence::{BestScore, ScoreStore};
use crate::wrap_cell;

/// What a single `advance()` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Idle,
    /// Head moved, length conserved
    Moved { head: Cell },
    /// Head reached the item; the body grew by one
    Consumed {
        cell: Cell,
        score: u32,
        /// The score is a new best
        new_best: bool,
    },
    /// Head would have entered its own body; the run is over
    Collided { at: Cell },
}

/// Next tick interval after a consumption
pub(crate) fn ramp_interval(current_ms: u32) -> u32 {
    current_ms
        .saturating_sub(TICK_INTERVAL_STEP_MS)
        .max(MIN_TICK_INTERVAL_MS)
}

/// A single game instance
#[derive(Debug)]
pub struct Simulation<R = Pcg32> {
    state: SimulationState,
    rng: R,
    best: BestScore,
}

impl Simulation<Pcg32> {
    /// Create a simulation with a seeded RNG
    pub fn new(seed: u64, store: Box<dyn ScoreStore>) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), store)
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation with a caller-supplied RNG
    ///
    /// The best score is read from `store` once, here.
    pub fn with_rng(mut rng: R, store: Box<dyn ScoreStore>) -> Self {
        let state = Self::initial_state(&mut rng);
        Self {
            state,
            rng,
            best: BestScore::load(store),
        }
    }

    fn initial_state(rng: &mut R) -> SimulationState {
        let mut state = SimulationState::new(None);
        state.item = place_item(&state.body, rng);
        state
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.best.get()
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.state.tick_interval_ms
    }

    /// Idle -> Running
    pub fn start(&mut self) -> bool {
        if self.state.phase != Phase::Idle {
            return false;
        }
        self.state.phase = Phase::Running;
        log::info!("Run started");
        true
    }

    /// Running <-> Paused
    pub fn toggle_pause(&mut self) -> bool {
        self.state.phase = match self.state.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            _ => return false,
        };
        log::info!("{}", self.state.phase.status_line());
        true
    }

    /// Queue a heading change for the next tick
    ///
    /// Only accepted while running. A direction opposite to the current
    /// heading (the latest accepted one, pending or applied) is dropped while
    /// the body is longer than the head. Later accepted intents overwrite
    /// earlier ones.
    pub fn apply_direction(&mut self, direction: Direction) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        if self.state.body.len() > 1 && self.next_heading() == direction.opposite().delta() {
            return false;
        }
        self.state.pending = Some(direction);
        true
    }

    /// Apply one tick of movement, collision and consumption
    ///
    /// Returns `SimError::NoFreeCell` if a consumption leaves no room for a
    /// new item; the consumption itself is kept and the run ends.
    pub fn advance(&mut self) -> Result<TickOutcome, SimError> {
        if self.state.phase != Phase::Running {
            return Ok(TickOutcome::Idle);
        }
        if let Some(direction) = self.state.pending.take() {
            self.state.heading = direction.delta();
        }

        let head = wrap_cell(self.state.body.head() + self.state.heading);

        // Checked against the body before the new head goes in
        if self.state.body.hits_segment(head) {
            self.state.phase = Phase::Over;
            log::info!(
                "Game over at ({}, {}) with score {} (length {})",
                head.x,
                head.y,
                self.state.score,
                self.state.body.len()
            );
            return Ok(TickOutcome::Collided { at: head });
        }

        self.state.ticks += 1;
        self.state.body.push_head(head);

        if self.state.item != Some(head) {
            self.state.body.pop_tail();
            return Ok(TickOutcome::Moved { head });
        }

        self.state.score += SCORE_PER_ITEM;
        self.state.tick_interval_ms = ramp_interval(self.state.tick_interval_ms);
        let new_best = self.best.record(self.state.score);
        log::debug!(
            "Item at ({}, {}) consumed: score {}, length {}, interval {}ms",
            head.x,
            head.y,
            self.state.score,
            self.state.body.len(),
            self.state.tick_interval_ms
        );

        self.state.item = place_item(&self.state.body, &mut self.rng);
        if self.state.item.is_none() {
            let body_len = self.state.body.len();
            self.state.phase = Phase::Over;
            log::error!("No free cell for a new item (body length {})", body_len);
            return Err(SimError::NoFreeCell { body_len });
        }

        Ok(TickOutcome::Consumed {
            cell: head,
            score: self.state.score,
            new_best,
        })
    }

    /// Restore the initial shape; valid in every phase
    ///
    /// The best score is kept.
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&mut self.rng);
        log::info!("Game reset");
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Heading the next tick will apply
    pub fn next_heading(&self) -> IVec2 {
        self.state
            .pending
            .map(Direction::delta)
            .unwrap_or(self.state.heading)
    }
}
