//! Item placement

use glam::IVec2;
use rand::Rng;

use super::state::{Body, Cell};
use crate::consts::GRID_SIZE;

/// All cells not covered by the body, in row-major order
pub fn free_cells(body: &Body) -> Vec<Cell> {
    (0..GRID_SIZE)
        .flat_map(|y| (0..GRID_SIZE).map(move |x| IVec2::new(x, y)))
        .filter(|c| !body.contains(*c))
        .collect()
}

/// Pick an item cell uniformly among the free cells
///
/// Returns `None` when the body covers the whole board.
pub fn place_item<R: Rng>(body: &Body, rng: &mut R) -> Option<Cell> {
    let free = free_cells(body);
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}
