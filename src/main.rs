//! Target Rush native entry point
//!
//! Without a renderer the native build runs the demo bot through a couple of
//! rounds and logs what happens. The browser build drives the engine through
//! `target_rush::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use target_rush::Tuning;
    use target_rush::sim::{AutoPlayer, Engine, GameEvent};

    env_logger::init();
    log::info!("Target Rush (native demo) starting...");

    // Optional tuning file as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load_or_default(Path::new(&path)),
        None => Tuning::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!("Seed: {}", seed);

    let mut engine = Engine::with_tuning(seed, tuning);
    let dt = engine.tuning().frame_period();

    let rounds = [(0.9, 300u64), (0.7, 450u64)];
    for (round, (accuracy, reaction_ms)) in rounds.into_iter().enumerate() {
        if round > 0 {
            engine.reset();
        }
        let mut bot = AutoPlayer::new(seed.wrapping_add(round as u64), accuracy, Duration::from_millis(reaction_ms));

        while !engine.state().is_ended() {
            engine.advance(dt);
            if let Some(command) = bot.update(engine.state(), dt) {
                engine.apply(command);
            }
            for event in engine.drain_events() {
                match event {
                    GameEvent::LevelUp { level } => log::info!("Level {}!", level),
                    GameEvent::ComboMilestone { combo } => log::info!("Combo x{}", combo),
                    GameEvent::GameOver { score, new_high_score } => {
                        log::info!("Game over: {} points (new high score: {})", score, new_high_score)
                    }
                    other => log::debug!("{:?}", other),
                }
            }
        }

        let state = engine.state();
        println!(
            "Round {}: score {}, level {}, accuracy {}%, high score {}",
            round + 1,
            state.score,
            state.level,
            state.accuracy(),
            state.high_score
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
