//! Idle/demo mode: a bot that plays the game
//!
//! Produces the same `Command`s a human's clicks would. Deterministic for a
//! given seed so demo runs and soak tests replay exactly.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Command, GameState};

/// Clicking bot with a fixed reaction time and hit rate
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    rng: Pcg32,
    /// Chance each click lands (0-1)
    pub accuracy: f64,
    /// Time between clicks
    pub reaction: Duration,
    since_last: Duration,
}

impl AutoPlayer {
    pub fn new(seed: u64, accuracy: f64, reaction: Duration) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            accuracy: accuracy.clamp(0.0, 1.0),
            reaction,
            since_last: Duration::ZERO,
        }
    }

    /// Let `dt` pass and maybe click.
    ///
    /// Aims at the target nearest the arena center, the way a player tracks
    /// whatever is easiest to reach.
    pub fn update(&mut self, state: &GameState, dt: Duration) -> Option<Command> {
        if !state.is_playing() {
            self.since_last = Duration::ZERO;
            return None;
        }
        self.since_last += dt;
        if self.since_last < self.reaction {
            return None;
        }
        self.since_last = Duration::ZERO;

        let target = state.targets.iter().min_by(|a, b| {
            a.pos
                .length_squared()
                .partial_cmp(&b.pos.length_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

        if self.rng.random_bool(self.accuracy) {
            Some(Command::Hit(target.id))
        } else {
            Some(Command::Miss)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Engine;

    #[test]
    fn test_waits_for_reaction_time() {
        let engine = Engine::new(1);
        let mut bot = AutoPlayer::new(1, 1.0, Duration::from_millis(300));
        assert_eq!(bot.update(engine.state(), Duration::from_millis(100)), None);
        assert_eq!(bot.update(engine.state(), Duration::from_millis(100)), None);
        assert_eq!(
            bot.update(engine.state(), Duration::from_millis(100)),
            Some(Command::Hit(0))
        );
    }

    #[test]
    fn test_never_hits_with_zero_accuracy() {
        let engine = Engine::new(2);
        let mut bot = AutoPlayer::new(2, 0.0, Duration::ZERO);
        for _ in 0..20 {
            assert_eq!(bot.update(engine.state(), Duration::from_millis(1)), Some(Command::Miss));
        }
    }

    #[test]
    fn test_idle_while_paused() {
        let mut engine = Engine::new(3);
        engine.pause();
        let mut bot = AutoPlayer::new(3, 1.0, Duration::ZERO);
        assert_eq!(bot.update(engine.state(), Duration::from_secs(1)), None);
    }

    #[test]
    fn test_full_round_soak() {
        let mut engine = Engine::new(4);
        let mut bot = AutoPlayer::new(4, 0.85, Duration::from_millis(350));
        let dt = engine.tuning().frame_period();

        while !engine.state().is_ended() {
            engine.advance(dt);
            if let Some(command) = bot.update(engine.state(), dt) {
                engine.apply(command);
            }
            let state = engine.state();
            assert!(state.targets.iter().all(|t| engine.tuning().bounds.contains(t.pos)));
        }

        let state = engine.state();
        assert_eq!(state.time_left, 0);
        assert!(state.score > 0);
        assert!(state.level > 1);
        assert_eq!(state.high_score, state.score);
        assert!(state.total_clicks >= state.successful_hits);
        assert!(state.accuracy() <= 100);
    }
}
