//! Level progression and derived values
//!
//! Pure functions of `level` or `score`. Everything the engine derives from
//! the score goes through here so the rules can be checked in isolation.

use crate::consts::*;

/// Number of live targets at a given level
pub fn target_count_for_level(level: u32) -> u32 {
    match level {
        0..=3 => 1,
        4..=6 => 2,
        _ => 3,
    }
}

/// Target size at a given level, shrinking toward [`MIN_TARGET_SIZE`]
pub fn target_size_for_level(level: u32) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (BASE_TARGET_SIZE - steps * TARGET_SIZE_STEP).max(MIN_TARGET_SIZE)
}

/// Level reached with `score` points (1-based)
pub fn level_for_score(score: u64) -> u32 {
    let level = score / POINTS_PER_LEVEL + 1;
    u32::try_from(level).unwrap_or(u32::MAX)
}

/// Velocity multiplier applied to every target at a given level
pub fn speed_multiplier_for_level(level: u32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * SPEED_STEP_PER_LEVEL
}

/// Hit percentage, rounded. No clicks yet counts as perfect.
pub fn accuracy(hits: u64, total_clicks: u64) -> u32 {
    if total_clicks == 0 {
        return 100;
    }
    (hits as f64 / total_clicks as f64 * 100.0).round() as u32
}

/// Bonus points for reaching `combo` (only on exact multiples)
pub fn combo_bonus(combo: u32) -> u64 {
    if combo > 0 && combo % COMBO_BONUS_EVERY == 0 {
        1
    } else {
        0
    }
}
