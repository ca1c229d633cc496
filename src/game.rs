//! Host glue
//!
//! `Game` owns one simulation and its scheduler. Hosts forward intents to
//! `handle()` and call `frame()` from their repeating callback; both take
//! `&mut self`, so commands and ticks never interleave. Hosts that receive
//! input on another thread wrap the game in a `Mutex` or feed an
//! `IntentQueue` drained on the frame thread.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::input::{InputSource, Intent};
use crate::persistence::ScoreStore;
use crate::renderer::{Renderer, Snapshot};
use crate::scheduler::{FrameReport, Scheduler};
use crate::sim::{Phase, SimError, Simulation};

/// One playable game instance
#[derive(Debug)]
pub struct Game<R = Pcg32> {
    sim: Simulation<R>,
    scheduler: Scheduler,
}

impl Game<Pcg32> {
    pub fn new(seed: u64, store: Box<dyn ScoreStore>) -> Self {
        Self::from_simulation(Simulation::new(seed, store))
    }
}

impl<R: Rng> Game<R> {
    pub fn from_simulation(sim: Simulation<R>) -> Self {
        Self {
            sim,
            scheduler: Scheduler::new(),
        }
    }

    pub fn simulation(&self) -> &Simulation<R> {
        &self.sim
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Whether the host should keep requesting frame callbacks
    pub fn is_looping(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Apply one intent at host time `now_ms`; returns whether it was accepted
    pub fn handle(&mut self, intent: Intent, now_ms: f64) -> bool {
        match intent {
            Intent::Start => {
                let started = self.sim.start();
                if started {
                    self.scheduler.begin(now_ms);
                }
                started
            }
            Intent::TogglePause => self.sim.toggle_pause(),
            Intent::Direction(direction) => self.sim.apply_direction(direction),
            Intent::Reset => {
                self.sim.reset();
                self.scheduler.stop();
                true
            }
        }
    }

    /// Drain an input source and apply its intents in order
    pub fn pump<I: InputSource + ?Sized>(&mut self, input: &mut I, now_ms: f64) -> usize {
        let intents = input.poll(&self.snapshot());
        let mut accepted = 0;
        for intent in intents {
            if self.handle(intent, now_ms) {
                accepted += 1;
            } else {
                log::trace!("Ignored {:?} in phase {:?}", intent, self.sim.phase());
            }
        }
        accepted
    }

    /// Frame callback: tick as needed, render once
    pub fn frame<V: Renderer + ?Sized>(
        &mut self,
        now_ms: f64,
        renderer: &mut V,
    ) -> Result<FrameReport, SimError> {
        self.scheduler.frame(now_ms, &mut self.sim, renderer)
    }

    /// Current state for out-of-loop draws (startup, after reset)
    pub fn snapshot(&self) -> Snapshot {
        let fraction = if self.sim.phase() == Phase::Idle {
            0.0
        } else {
            (self.scheduler.accumulator_ms() / f64::from(self.sim.tick_interval_ms())) as f32
        };
        Snapshot::capture(&self.sim, fraction.clamp(0.0, 1.0))
    }
}
