//! Game state and core simulation types
//!
//! Everything a frame needs to draw the board lives here; the RNG and the
//! best-score store are owned by `Simulation`, not by the state.

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A board cell, `0 <= x, y < GRID_SIZE`
pub type Cell = IVec2;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the start command
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended by self-collision
    Over,
}

impl Phase {
    /// Status line shown under the board
    pub fn status_line(&self) -> &'static str {
        match self {
            Phase::Idle => "Press SPACE to start",
            Phase::Running => "Game Running - Use arrow keys or WASD",
            Phase::Paused => "Game Paused - Press SPACE to resume",
            Phase::Over => "Game Over - Click \"Play Again\" to restart",
        }
    }
}

/// One of the four cardinal steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step on the grid (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Inverse of `delta` for non-zero unit vectors
    pub fn from_delta(delta: IVec2) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.delta() == delta)
    }
}

/// The creature body, head at the front
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    cells: VecDeque<Cell>,
}

impl Body {
    /// Single-cell body
    pub fn new(head: Cell) -> Self {
        let mut cells = VecDeque::with_capacity(CELL_COUNT);
        cells.push_back(head);
        Self { cells }
    }

    /// Build from head-to-tail cells (used by tests and replays)
    ///
    /// Returns `None` for an empty list, out-of-board cells or overlapping
    /// segments.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let cells: VecDeque<Cell> = cells.into_iter().collect();
        if cells.is_empty() || !cells.iter().all(|c| crate::in_bounds(*c)) {
            return None;
        }
        for (i, a) in cells.iter().enumerate() {
            if cells.iter().skip(i + 1).any(|b| b == a) {
                return None;
            }
        }
        Some(Self { cells })
    }

    pub fn head(&self) -> Cell {
        self.cells[0]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a body has at least its head
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Whether `cell` hits a segment behind the head
    pub fn hits_segment(&self, cell: Cell) -> bool {
        self.cells.iter().skip(1).any(|c| *c == cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.cells.iter().copied().collect()
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.cells.push_front(cell);
    }

    pub(crate) fn pop_tail(&mut self) {
        if self.cells.len() > 1 {
            self.cells.pop_back();
        }
    }
}

/// Center of the board, where every run begins
pub fn start_cell() -> Cell {
    IVec2::splat(GRID_SIZE / 2)
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Creature body, head first
    pub body: Body,
    /// Step applied to the head on the last tick (zero before the first move)
    pub heading: IVec2,
    /// Direction accepted since the last tick, applied by the next one
    pub pending: Option<Direction>,
    /// Consumable cell; `None` only after the board ran out of free cells
    pub item: Option<Cell>,
    /// Score
    pub score: u32,
    /// Current logical tick length (ms)
    pub tick_interval_ms: u32,
    /// Current phase
    pub phase: Phase,
    /// Number of ticks applied since the last reset
    pub ticks: u64,
}

impl SimulationState {
    /// Initial shape with the given item cell
    pub fn new(item: Option<Cell>) -> Self {
        Self {
            body: Body::new(start_cell()),
            heading: IVec2::ZERO,
            pending: None,
            item,
            score: 0,
            tick_interval_ms: START_TICK_INTERVAL_MS,
            phase: Phase::Idle,
            ticks: 0,
        }
    }

    /// Current heading as a direction, if moving
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_delta(self.heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SimulationState::new(Some(IVec2::new(0, 0)));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.body.to_vec(), vec![IVec2::new(6, 6)]);
        assert_eq!(state.heading, IVec2::ZERO);
        assert_eq!(state.direction(), None);
        assert_eq!(state.tick_interval_ms, START_TICK_INTERVAL_MS);
    }

    #[test]
    fn test_direction_round_trip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_delta(d.delta()), Some(d));
            assert_eq!(d.delta() + d.opposite().delta(), IVec2::ZERO);
        }
        assert_eq!(Direction::from_delta(IVec2::ZERO), None);
    }

    #[test]
    fn test_body_rejects_overlap_and_out_of_bounds() {
        let a = IVec2::new(1, 1);
        assert!(Body::from_cells([a, IVec2::new(1, 2), a]).is_none());
        assert!(Body::from_cells([IVec2::new(-1, 0)]).is_none());
        assert!(Body::from_cells(Vec::<Cell>::new()).is_none());
        assert!(Body::from_cells([a, IVec2::new(2, 1)]).is_some());
    }

    #[test]
    fn test_hits_segment_ignores_head() {
        let body = Body::from_cells([IVec2::new(3, 3), IVec2::new(2, 3), IVec2::new(1, 3)]).unwrap();
        assert!(!body.hits_segment(IVec2::new(3, 3)));
        assert!(body.hits_segment(IVec2::new(2, 3)));
        assert!(body.hits_segment(IVec2::new(1, 3)));
    }
}
