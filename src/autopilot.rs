//! Demo mode - the computer plays the game
//!
//! Two strategies:
//! - `Greedy`: head for the item along the shortest wrapped path, but never
//!   into a pocket smaller than the body
//! - `Cycle`: follow a fixed Hamiltonian cycle; slow, but fills the board

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::{InputSource, Intent};
use crate::renderer::Snapshot;
use crate::sim::{Cell, Direction, Phase};
use crate::wrap_cell;

/// Steering strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AutopilotMode {
    #[default]
    Greedy,
    Cycle,
}

/// Direction of the Hamiltonian cycle at `cell`
///
/// Column 0 is the return lane (heading up); the remaining columns are swept
/// right on even rows and left on odd rows, dropping a row at the ends.
pub fn cycle_direction(cell: Cell) -> Direction {
    let last = GRID_SIZE - 1;
    match (cell.x, cell.y) {
        (0, 0) => Direction::Right,
        (0, _) => Direction::Up,
        (x, y) if y % 2 == 0 => {
            if x == last {
                Direction::Down
            } else {
                Direction::Right
            }
        }
        (1, y) if y == last => Direction::Left,
        (1, _) => Direction::Down,
        _ => Direction::Left,
    }
}

/// Shortest wrapped distance between two cells
pub fn torus_distance(a: Cell, b: Cell) -> i32 {
    let d = (a - b).abs();
    d.x.min(GRID_SIZE - d.x) + d.y.min(GRID_SIZE - d.y)
}

/// Number of free cells reachable from `from` without crossing `blocked`
fn reachable_area(from: Cell, blocked: &[Cell]) -> usize {
    let mut seen = [[false; GRID_SIZE as usize]; GRID_SIZE as usize];
    for c in blocked {
        seen[c.y as usize][c.x as usize] = true;
    }
    if seen[from.y as usize][from.x as usize] {
        return 0;
    }
    seen[from.y as usize][from.x as usize] = true;

    let mut queue = VecDeque::from([from]);
    let mut count = 0;
    while let Some(cell) = queue.pop_front() {
        count += 1;
        for d in Direction::ALL {
            let next = wrap_cell(cell + d.delta());
            let slot = &mut seen[next.y as usize][next.x as usize];
            if !*slot {
                *slot = true;
                queue.push_back(next);
            }
        }
    }
    count
}

/// Computer player
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    mode: AutopilotMode,
}

impl Autopilot {
    pub fn new(mode: AutopilotMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> AutopilotMode {
        self.mode
    }

    /// Pick the next heading for the given frame, if any move is safe
    pub fn choose(&self, snapshot: &Snapshot) -> Option<Direction> {
        let head = snapshot.head()?;
        match self.mode {
            AutopilotMode::Cycle => Some(cycle_direction(head)),
            AutopilotMode::Greedy => self.choose_greedy(head, snapshot),
        }
    }

    fn choose_greedy(&self, head: Cell, snapshot: &Snapshot) -> Option<Direction> {
        let body = &snapshot.body;
        let reverse = Direction::from_delta(snapshot.heading).map(Direction::opposite);
        let target = snapshot.item;

        let mut best: Option<(Direction, bool, i32, usize)> = None;
        for d in Direction::ALL {
            if body.len() > 1 && Some(d) == reverse {
                continue;
            }
            let next = wrap_cell(head + d.delta());
            if body[1..].contains(&next) {
                continue;
            }
            // The tail moves away next tick unless the item is eaten
            let mut blocked: Vec<IVec2> = body[..body.len() - 1].to_vec();
            blocked.push(head);
            let area = reachable_area(next, &blocked);
            let roomy = area >= body.len();
            let dist = target.map(|t| torus_distance(next, t)).unwrap_or(0);

            let better = match best {
                None => true,
                Some((_, best_roomy, best_dist, best_area)) => {
                    (roomy, -dist, area) > (best_roomy, -best_dist, best_area)
                }
            };
            if better {
                best = Some((d, roomy, dist, area));
            }
        }
        best.map(|(d, ..)| d)
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, snapshot: &Snapshot) -> Vec<Intent> {
        match snapshot.phase {
            Phase::Idle => vec![Intent::Start],
            Phase::Running => self
                .choose(snapshot)
                .filter(|d| d.delta() != snapshot.heading)
                .map(Intent::Direction)
                .into_iter()
                .collect(),
            Phase::Paused | Phase::Over => Vec::new(),
        }
    }
}
