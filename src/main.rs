//! Wrap Snake entry point
//!
//! Native builds run a headless demo: the autopilot plays one run against the
//! wall clock, the best score is kept in a JSON file, and the final board is
//! printed. Usage: `wrap-snake [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use std::thread;
    use std::time::{Duration, Instant};

    use wrap_snake::autopilot::Autopilot;
    use wrap_snake::{Game, JsonFileStore, Renderer, Settings, TextRenderer};

    env_logger::init();
    log::info!("Wrap Snake (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&PathBuf::from(path)),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed {}, autopilot {:?}", seed, settings.autopilot);

    let store = JsonFileStore::new(&settings.best_score_path);
    let mut game = Game::new(seed, Box::new(store));
    let mut pilot = Autopilot::new(settings.autopilot);
    let mut renderer = TextRenderer::new();
    renderer.render(&game.snapshot());

    let clock = Instant::now();
    let frame_interval = Duration::from_millis(settings.frame_interval_ms);
    for _ in 0..settings.max_frames {
        let now = clock.elapsed().as_secs_f64() * 1000.0;
        game.pump(&mut pilot, now);
        match game.frame(now, &mut renderer) {
            Ok(report) => {
                if settings.print_frames && report.ticks() > 0 {
                    println!("{}\n", renderer.last_frame());
                }
                if report.stopped {
                    break;
                }
            }
            Err(e) => {
                log::error!("Simulation halted: {}", e);
                break;
            }
        }
        thread::sleep(frame_interval);
    }

    let sim = game.simulation();
    println!("{}", renderer.last_frame());
    println!(
        "Final score {} (length {}, best {}) after {} ticks",
        sim.score(),
        sim.state().body.len(),
        sim.best_score(),
        sim.state().ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `wrap_snake::Game` directly
}
