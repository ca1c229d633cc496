//! End-to-end runs through the public API: intents in, frames out.

use wrap_snake::consts::*;
use wrap_snake::{
    Autopilot, AutopilotMode, Direction, Game, Intent, IntentQueue, MemoryStore, Phase, Renderer,
    ScoreStore, SimError, Snapshot,
};

/// Keeps every snapshot it is handed
#[derive(Default)]
struct Recorder {
    frames: Vec<Snapshot>,
}

impl Renderer for Recorder {
    fn render(&mut self, snapshot: &Snapshot) {
        self.frames.push(snapshot.clone());
    }
}

#[test]
fn queued_intents_drive_a_run() {
    let mut game = Game::new(4242, Box::new(MemoryStore::new()));
    let mut queue = IntentQueue::new();
    let mut recorder = Recorder::default();

    queue.push(Intent::Start);
    queue.push(Intent::Direction(Direction::Up));
    game.pump(&mut queue, 0.0);
    assert!(game.is_looping());

    // 16ms frames for a bit over one second
    let mut now = 0.0;
    for _ in 0..70 {
        now += 16.0;
        game.frame(now, &mut recorder).unwrap();
    }

    assert_eq!(recorder.frames.len(), 70);
    let last = recorder.frames.last().unwrap();
    assert_eq!(last.phase, Phase::Running);
    assert!(game.simulation().state().ticks >= 9);
    // Heading up the whole time: the head stays in column 6
    assert_eq!(last.body[0].x, 6);
    for frame in &recorder.frames {
        assert!((0.0..=1.0).contains(&frame.accumulator_fraction));
        assert!(frame.tick_interval_ms >= MIN_TICK_INTERVAL_MS);
    }
}

#[test]
fn autopilot_run_keeps_best_score_across_games() {
    let store = MemoryStore::new();
    let handle = store.clone();
    let mut game = Game::new(7, Box::new(store));
    let mut pilot = Autopilot::new(AutopilotMode::Greedy);
    let mut recorder = Recorder::default();

    let mut now = 0.0;
    for _ in 0..3000 {
        game.pump(&mut pilot, now);
        now += 40.0;
        let report = game.frame(now, &mut recorder).unwrap();
        if report.stopped {
            break;
        }
    }

    let score = game.simulation().score();
    assert!(score > 0, "autopilot never ate anything");
    assert_eq!(score % SCORE_PER_ITEM, 0);
    assert_eq!(handle.best_score().unwrap(), game.simulation().best_score());
    let best = game.simulation().best_score();
    assert!(best >= score);

    // A fresh game on the same store starts from the saved best
    game.handle(Intent::Reset, now);
    assert_eq!(game.simulation().score(), 0);
    assert_eq!(game.simulation().best_score(), best);
    let fresh = Game::new(8, Box::new(handle.clone()));
    assert_eq!(fresh.simulation().best_score(), best);
}

#[test]
fn cycle_autopilot_fills_the_board() {
    let mut game = Game::new(99, Box::new(MemoryStore::new()));
    let mut pilot = Autopilot::new(AutopilotMode::Cycle);
    let mut recorder = Recorder::default();

    // One tick per frame: frames exactly one interval apart
    let mut now = 0.0;
    let mut result = Ok(());
    for _ in 0..100_000 {
        game.pump(&mut pilot, now);
        now += f64::from(game.simulation().tick_interval_ms());
        match game.frame(now, &mut recorder) {
            Ok(report) => assert!(!report.stopped, "run ended early"),
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }

    assert_eq!(
        result,
        Err(SimError::NoFreeCell {
            body_len: CELL_COUNT
        })
    );
    assert_eq!(game.simulation().phase(), Phase::Over);
    assert!(!game.is_looping());
    let last = recorder.frames.last().unwrap();
    assert_eq!(last.body.len(), CELL_COUNT);
    assert_eq!(last.item, None);
}

#[test]
fn unavailable_storage_never_interrupts_play() {
    let mut game = Game::new(3, Box::new(MemoryStore::unavailable()));
    let mut pilot = Autopilot::new(AutopilotMode::Greedy);
    let mut recorder = Recorder::default();
    assert_eq!(game.simulation().best_score(), 0);

    let mut now = 0.0;
    for _ in 0..500 {
        game.pump(&mut pilot, now);
        now += 120.0;
        if game.frame(now, &mut recorder).unwrap().stopped {
            break;
        }
    }
    assert_eq!(game.simulation().best_score(), game.simulation().score());
}
