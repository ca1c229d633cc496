//! Wrap Snake - a wrap-around grid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collision, consumption, lifecycle)
//! - `scheduler`: Fixed-timestep driver decoupled from the frame rate
//! - `game`: Host glue wiring intents, scheduler and renderer to one simulation
//! - `renderer`: Read-only snapshot handed to presentation each frame
//! - `persistence`: Best score storage
//! - `input`: Intent vocabulary crossing the input boundary

pub mod autopilot;
pub mod game;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use autopilot::{Autopilot, AutopilotMode};
pub use game::Game;
pub use input::{InputSource, Intent, IntentQueue};
pub use persistence::{BestScore, MemoryStore, PersistenceError, ScoreStore};
#[cfg(not(target_arch = "wasm32"))]
pub use persistence::JsonFileStore;
pub use renderer::{Renderer, Snapshot, TextRenderer};
pub use scheduler::{FrameReport, Scheduler};
pub use settings::{Settings, SettingsError};
pub use sim::{Cell, Direction, Phase, SimError, Simulation, TickOutcome};

/// Game rule constants
pub mod consts {
    /// Grid side length (the board is GRID_SIZE x GRID_SIZE cells)
    pub const GRID_SIZE: i32 = 12;
    /// Total number of cells on the board
    pub const CELL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

    /// Points awarded per consumed item
    pub const SCORE_PER_ITEM: u32 = 10;

    /// Tick interval at the start of a run (ms)
    pub const START_TICK_INTERVAL_MS: u32 = 120;
    /// Interval reduction per consumed item (ms)
    pub const TICK_INTERVAL_STEP_MS: u32 = 2;
    /// Fastest allowed tick interval (ms)
    pub const MIN_TICK_INTERVAL_MS: u32 = 80;

    /// Largest frame delta fed to the accumulator, so a long stall
    /// (tab hidden, debugger) cannot queue an unbounded burst of ticks
    pub const MAX_FRAME_DELTA_MS: f64 = 250.0;
}

use glam::IVec2;

/// Wrap a cell onto the torus: each axis independently modulo GRID_SIZE
#[inline]
pub fn wrap_cell(cell: IVec2) -> IVec2 {
    IVec2::new(
        cell.x.rem_euclid(consts::GRID_SIZE),
        cell.y.rem_euclid(consts::GRID_SIZE),
    )
}

/// Whether a cell lies inside the board
#[inline]
pub fn in_bounds(cell: IVec2) -> bool {
    (0..consts::GRID_SIZE).contains(&cell.x) && (0..consts::GRID_SIZE).contains(&cell.y)
}
