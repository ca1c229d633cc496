//! Intent vocabulary crossing the input boundary
//!
//! Physical input (keys, buttons, touches) is mapped to `Intent`s by the
//! host. The game consumes intents one at a time, between frames.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::renderer::Snapshot;
use crate::sim::{Direction, Phase};

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Start,
    TogglePause,
    Direction(Direction),
    Reset,
}

/// A source of intents, polled once per frame
pub trait InputSource {
    /// Intents gathered since the last poll, oldest first
    fn poll(&mut self, snapshot: &Snapshot) -> Vec<Intent>;
}

/// FIFO fed by event callbacks and drained by the frame loop
#[derive(Debug, Clone, Default)]
pub struct IntentQueue {
    pending: VecDeque<Intent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        self.pending.push_back(intent);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl InputSource for IntentQueue {
    fn poll(&mut self, _snapshot: &Snapshot) -> Vec<Intent> {
        self.pending.drain(..).collect()
    }
}

impl Extend<Intent> for IntentQueue {
    fn extend<T: IntoIterator<Item = Intent>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}

/// Map a keyboard code (DOM `KeyboardEvent.code` naming) to an intent
///
/// Space starts an idle game and toggles pause otherwise.
pub fn map_key(code: &str, phase: Phase) -> Option<Intent> {
    let intent = match code {
        "Space" if phase == Phase::Idle => Intent::Start,
        "Space" => Intent::TogglePause,
        "ArrowUp" | "KeyW" => Intent::Direction(Direction::Up),
        "ArrowDown" | "KeyS" => Intent::Direction(Direction::Down),
        "ArrowLeft" | "KeyA" => Intent::Direction(Direction::Left),
        "ArrowRight" | "KeyD" => Intent::Direction(Direction::Right),
        "KeyR" | "Enter" => Intent::Reset,
        _ => return None,
    };
    Some(intent)
}
