//! Target Rush - a 3D target-shooting mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (target physics, scoring, timers)
//! - `tuning`: Data-driven physics and timing knobs
//! - `web`: Browser bindings (wasm32 only)

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use sim::{Command, Engine, GameEvent, GamePhase, GameState, Target};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Round length in seconds
    pub const GAME_DURATION_SECS: u32 = 60;
    /// Time a combo survives without another hit
    pub const COMBO_TIMEOUT_MS: u64 = 2000;
    /// Nominal display refresh driving `tick()`
    pub const FRAME_RATE_HZ: u32 = 60;

    /// Target size at level 1
    pub const BASE_TARGET_SIZE: f32 = 0.5;
    /// Smallest size a target can shrink to
    pub const MIN_TARGET_SIZE: f32 = 0.25;
    /// Size lost per level above 1
    pub const TARGET_SIZE_STEP: f32 = 0.04;

    /// Score needed per level
    pub const POINTS_PER_LEVEL: u64 = 10;
    /// Extra speed per level above 1 (multiplicative on base velocity)
    pub const SPEED_STEP_PER_LEVEL: f32 = 0.15;
    /// Every Nth consecutive hit earns a bonus point
    pub const COMBO_BONUS_EVERY: u32 = 5;

    /// Play volume full extents (targets live in ±half of these)
    pub const ARENA_X_RANGE: f32 = 4.0; // -2 to +2
    pub const ARENA_Y_RANGE: f32 = 3.0; // -1.5 to +1.5
    pub const ARENA_Z_RANGE: f32 = 2.0; // -1 to +1

    /// Per-axis launch speed is drawn from ±BASE_SPEED
    pub const BASE_SPEED: f32 = 0.02;
    /// Per-bounce damping range [min, max)
    pub const BOUNCE_DAMPING_MIN: f32 = 0.95;
    pub const BOUNCE_DAMPING_MAX: f32 = 1.05;
    /// Hard cap on a single velocity component after a bounce
    pub const MAX_AXIS_SPEED: f32 = 0.05;

    /// Largest wall-clock step a host may feed in one frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
