//! Simulation errors

use thiserror::Error;

/// Internal invariant violations raised by the simulation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The body covers every cell, so no item can be placed
    #[error("no free cell left for an item (body length {body_len})")]
    NoFreeCell { body_len: usize },
}
