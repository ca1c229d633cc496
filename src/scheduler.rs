//! Fixed timestep driver
//!
//! The host calls `frame()` from its repeating callback (animation frame,
//! timer, loop iteration) with a monotonic timestamp in milliseconds. Elapsed
//! time is accumulated and drained in whole tick intervals; the renderer runs
//! exactly once per callback.

use rand::Rng;

use crate::consts::MAX_FRAME_DELTA_MS;
use crate::renderer::{Renderer, Snapshot};
use crate::sim::{Phase, SimError, Simulation, TickOutcome};

/// What happened during one frame callback
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Outcomes of the ticks applied this frame, in order
    pub outcomes: Vec<TickOutcome>,
    /// Leftover accumulator fraction handed to the renderer
    pub accumulator_fraction: f32,
    /// The scheduler stopped at the end of this frame
    pub stopped: bool,
}

impl FrameReport {
    pub fn ticks(&self) -> usize {
        self.outcomes.len()
    }

    pub fn consumed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TickOutcome::Consumed { .. }))
            .count()
    }
}

/// Accumulator-based tick scheduler
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    last_time_ms: f64,
    accumulator_ms: f64,
    active: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) driving from `now_ms` with an empty accumulator
    pub fn begin(&mut self, now_ms: f64) {
        self.last_time_ms = now_ms;
        self.accumulator_ms = 0.0;
        self.active = true;
        log::debug!("Scheduler started at {:.1}ms", now_ms);
    }

    /// Stop requesting ticks; `frame()` becomes a no-op until `begin()`
    pub fn stop(&mut self) {
        if self.active {
            log::debug!("Scheduler stopped");
        }
        self.active = false;
        self.accumulator_ms = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }

    /// Run one frame callback
    ///
    /// Applies zero or more ticks, renders once, and stops itself once the
    /// run is over or the game was reset to idle. Each drained interval uses
    /// the tick interval in effect after the tick that was just applied.
    pub fn frame<R, V>(
        &mut self,
        now_ms: f64,
        sim: &mut Simulation<R>,
        renderer: &mut V,
    ) -> Result<FrameReport, SimError>
    where
        R: Rng,
        V: Renderer + ?Sized,
    {
        if !self.active {
            return Ok(FrameReport {
                stopped: true,
                ..Default::default()
            });
        }

        let delta = (now_ms - self.last_time_ms).clamp(0.0, MAX_FRAME_DELTA_MS);
        self.last_time_ms = now_ms;
        self.accumulator_ms += delta;

        let mut outcomes = Vec::new();
        let mut failure = None;
        while self.accumulator_ms >= f64::from(sim.tick_interval_ms()) {
            match sim.phase() {
                Phase::Running => match sim.advance() {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => {
                        failure = Some(e);
                        break;
                    }
                },
                // Paused time drains without ticking
                Phase::Paused => {}
                Phase::Idle | Phase::Over => break,
            }
            self.accumulator_ms -= f64::from(sim.tick_interval_ms());
        }

        let accumulator_fraction =
            (self.accumulator_ms / f64::from(sim.tick_interval_ms())).clamp(0.0, 1.0) as f32;
        renderer.render(&Snapshot::capture(sim, accumulator_fraction));

        let stopped = failure.is_some() || matches!(sim.phase(), Phase::Idle | Phase::Over);
        if stopped {
            self.stop();
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(FrameReport {
                outcomes,
                accumulator_fraction,
                stopped,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::persistence::MemoryStore;
    use crate::renderer::TextRenderer;
    use crate::sim::Direction;
    use glam::IVec2;
    use rand::RngCore;

    /// Always yields zero, so items land on the first free cell
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    /// Running, heading right from (6, 6), item parked at (0, 0)
    fn running_sim() -> Simulation<ZeroRng> {
        let mut sim = Simulation::with_rng(ZeroRng, Box::new(MemoryStore::new()));
        assert_eq!(sim.state().item, Some(IVec2::ZERO));
        sim.start();
        sim.apply_direction(Direction::Right);
        sim
    }

    #[test]
    fn test_inactive_frame_does_nothing() {
        let mut sched = Scheduler::new();
        let mut sim = running_sim();
        let mut renderer = TextRenderer::new();
        let report = sched.frame(1000.0, &mut sim, &mut renderer).unwrap();
        assert!(report.stopped);
        assert_eq!(report.ticks(), 0);
        assert_eq!(renderer.frames(), 0);
    }

    #[test]
    fn test_zero_one_many_ticks_per_frame() {
        let mut sched = Scheduler::new();
        let mut sim = running_sim();
        let mut renderer = TextRenderer::new();
        sched.begin(0.0);

        // Less than one interval: no tick, still one render
        let report = sched.frame(50.0, &mut sim, &mut renderer).unwrap();
        assert_eq!(report.ticks(), 0);
        assert_eq!(renderer.frames(), 1);
        assert!((report.accumulator_fraction - 50.0 / 120.0).abs() < 1e-6);

        // Crossing one interval
        let report = sched.frame(130.0, &mut sim, &mut renderer).unwrap();
        assert_eq!(report.ticks(), 1);
        assert!((sched.accumulator_ms() - 10.0).abs() < 1e-9);

        // A stall catches up several ticks in one callback
        let report = sched.frame(370.0, &mut sim, &mut renderer).unwrap();
        assert_eq!(report.ticks(), 2);
        assert_eq!(renderer.frames(), 3);
        assert!(!report.stopped);
        assert_eq!(sim.state().body.head(), IVec2::new(9, 6));
    }

    #[test]
    fn test_stall_is_capped() {
        let mut sched = Scheduler::new();
        let mut sim = running_sim();
        let mut renderer = TextRenderer::new();
        sched.begin(0.0);
        let report = sched.frame(60_000.0, &mut sim, &mut renderer).unwrap();
        let max_ticks = (MAX_FRAME_DELTA_MS / f64::from(START_TICK_INTERVAL_MS)) as usize;
        assert_eq!(report.ticks(), max_ticks);
    }

    #[test]
    fn test_backwards_clock_adds_nothing() {
        let mut sched = Scheduler::new();
        let mut sim = running_sim();
        let mut renderer = TextRenderer::new();
        sched.begin(500.0);
        let report = sched.frame(100.0, &mut sim, &mut renderer).unwrap();
        assert_eq!(report.ticks(), 0);
        assert_eq!(sched.accumulator_ms(), 0.0);
    }

    #[test]
    fn test_speed_change_applies_within_catch_up() {
        let mut sched = Scheduler::new();
        let mut sim = running_sim();
        let mut renderer = TextRenderer::new();
        sched.begin(0.0);

        sched.frame(120.0, &mut sim, &mut renderer).unwrap();
        assert_eq!(sim.state().body.head(), IVec2::new(7, 6));
        assert_eq!(sched.accumulator_ms(), 0.0);

        // 238ms: consume (interval drops to 118), subtract 118, tick, subtract 118
        sim.state_mut().item = Some(IVec2::new(8, 6));
        let report = sched.frame(358.0, &mut sim, &mut renderer).unwrap();
        assert_eq!(report.consumed(), 1);
        assert_eq!(report.ticks(), 2);
        assert_eq!(sim.tick_interval_ms(), 118);
        assert!((sched.accumulator_ms() - 2.0).abs() < 1e-9);
        assert_eq!(sim.state().body.to_vec(), vec![IVec2::new(9, 6), IVec2::new(8, 6)]);
    }

    #[test]
    fn test_pause_drains_without_ticking() {
        let mut sched = Scheduler::new();
        let mut sim = running_sim();
        let mut renderer = TextRenderer::new();
        sched.begin(0.0);
        sim.toggle_pause();
        let report = sched.frame(240.0, &mut sim, &mut renderer).unwrap();
        assert_eq!(report.ticks(), 0);
        assert!(!report.stopped);
        assert_eq!(sched.accumulator_ms(), 0.0);
        assert_eq!(sim.state().body.head(), crate::sim::start_cell());
    }

    #[test]
    fn test_stops_on_game_over() {
        let mut sched = Scheduler::new();
        let mut sim = running_sim();
        let mut renderer = TextRenderer::new();
        // Head at (2,2) heading down into its own body
        sim.state_mut().body =
            crate::sim::Body::from_cells([(2, 2), (3, 2), (3, 3), (2, 3)].map(|(x, y)| IVec2::new(x, y)))
                .unwrap();
        sim.state_mut().heading = Direction::Down.delta();
        sim.state_mut().pending = None;
        sched.begin(0.0);
        let report = sched.frame(240.0, &mut sim, &mut renderer).unwrap();
        assert_eq!(report.ticks(), 1);
        assert!(report.stopped);
        assert!(!sched.is_active());
        assert_eq!(renderer.frames(), 1);
        assert!(renderer.last_frame().ends_with(Phase::Over.status_line()));
    }

    #[test]
    fn test_stops_on_reset_and_restarts() {
        let mut sched = Scheduler::new();
        let mut sim = running_sim();
        let mut renderer = TextRenderer::new();
        sched.begin(0.0);
        sim.reset();
        let report = sched.frame(500.0, &mut sim, &mut renderer).unwrap();
        assert!(report.stopped);
        assert!(!sched.is_active());
        assert_eq!(renderer.frames(), 1);

        sim.start();
        sched.begin(1000.0);
        let report = sched.frame(1120.0, &mut sim, &mut renderer).unwrap();
        assert_eq!(report.ticks(), 1);
        assert!(sched.is_active());
    }
}
