//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - One rule application per `advance()` call, no clocks
//! - Injected RNG only
//! - No rendering or platform dependencies

pub mod error;
pub mod spawn;
pub mod state;
pub mod tick;

pub use error::SimError;
pub use spawn::{free_cells, place_item};
pub use state::{Body, Cell, Direction, Phase, SimulationState, start_cell};
pub use tick::{Simulation, TickOutcome};
