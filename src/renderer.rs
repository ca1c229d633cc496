//! Presentation boundary
//!
//! A renderer receives one read-only `Snapshot` per frame and never touches
//! the simulation. `TextRenderer` draws the board as plain text for headless
//! hosts and tests.

use std::fmt::Write as _;

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::in_bounds;
use crate::sim::{Cell, Phase, Simulation};

/// Everything a frame needs, copied out of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Body cells, head first
    pub body: Vec<Cell>,
    pub item: Option<Cell>,
    /// Step the head will take next tick (for interpolation)
    pub heading: IVec2,
    pub score: u32,
    pub best_score: u32,
    pub phase: Phase,
    pub tick_interval_ms: u32,
    /// Leftover accumulator as a fraction of the tick interval, in [0, 1)
    pub accumulator_fraction: f32,
}

impl Snapshot {
    pub fn capture<R: Rng>(sim: &Simulation<R>, accumulator_fraction: f32) -> Self {
        let state = sim.state();
        Self {
            body: state.body.to_vec(),
            item: state.item,
            heading: sim.next_heading(),
            score: state.score,
            best_score: sim.best_score(),
            phase: state.phase,
            tick_interval_ms: state.tick_interval_ms,
            accumulator_fraction,
        }
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.first().copied()
    }

    /// Interpolated head position in cell units
    pub fn head_position(&self) -> Option<glam::Vec2> {
        self.head()
            .map(|h| h.as_vec2() + self.heading.as_vec2() * self.accumulator_fraction)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            body: vec![crate::sim::start_cell()],
            item: None,
            heading: IVec2::ZERO,
            score: 0,
            best_score: 0,
            phase: Phase::Idle,
            tick_interval_ms: START_TICK_INTERVAL_MS,
            accumulator_fraction: 0.0,
        }
    }
}

/// Consumer of per-frame snapshots
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Plain-text board renderer
///
/// `@` head, `o` body, `*` item, `.` empty.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    last_frame: String,
    frames: u64,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw a snapshot as a text board with a status footer
    pub fn draw(snapshot: &Snapshot) -> String {
        let size = GRID_SIZE as usize;
        let mut grid = vec![vec!['.'; size]; size];
        // Hand-built or deserialized snapshots may hold off-board cells
        if let Some(item) = snapshot.item.filter(|c| in_bounds(*c)) {
            grid[item.y as usize][item.x as usize] = '*';
        }
        for (i, cell) in snapshot.body.iter().enumerate() {
            if in_bounds(*cell) {
                grid[cell.y as usize][cell.x as usize] = if i == 0 { '@' } else { 'o' };
            }
        }

        let mut out = String::with_capacity((size + 1) * (size + 3));
        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "Score: {}  Best: {}  Speed: {}ms",
            snapshot.score, snapshot.best_score, snapshot.tick_interval_ms
        );
        out.push_str(snapshot.phase.status_line());
        out
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        self.last_frame = Self::draw(snapshot);
        self.frames += 1;
    }
}
