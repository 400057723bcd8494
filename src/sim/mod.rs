//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulated clock only (hosts feed elapsed time)
//! - Seeded RNG only
//! - Stable target order (by slot)
//! - No rendering, audio or platform dependencies

pub mod autoplay;
pub mod engine;
pub mod progression;
pub mod state;
pub mod target;
pub mod timers;

pub use autoplay::AutoPlayer;
pub use engine::Engine;
pub use progression::{
    accuracy, combo_bonus, level_for_score, speed_multiplier_for_level, target_count_for_level,
    target_size_for_level,
};
pub use state::{Command, GameEvent, GamePhase, GameState};
pub use target::{Target, advance, create_target};
pub use timers::{Scheduler, TimerKind};
