//! Data-driven tuning for physics and timing
//!
//! Loaded from JSON so the "feel" of the game can be adjusted without a
//! rebuild. Progression rules (points per level, target sizes) are fixed in
//! [`crate::consts`]; only the knobs below are tunable.

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading tuning data
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Half-ranges of the play volume along each axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub half_x: f32,
    pub half_y: f32,
    pub half_z: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            half_x: ARENA_X_RANGE / 2.0,
            half_y: ARENA_Y_RANGE / 2.0,
            half_z: ARENA_Z_RANGE / 2.0,
        }
    }
}

impl ArenaBounds {
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.half_x, self.half_y, self.half_z)
    }

    /// True if `pos` lies inside the box (walls inclusive)
    pub fn contains(&self, pos: Vec3) -> bool {
        let half = self.half_extents();
        pos.abs().cmple(half).all()
    }
}

/// Damping factor range applied on each wall bounce, `[min, max)`.
/// `min == max` applies a fixed factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DampingRange {
    pub min: f32,
    pub max: f32,
}

impl Default for DampingRange {
    fn default() -> Self {
        Self {
            min: BOUNCE_DAMPING_MIN,
            max: BOUNCE_DAMPING_MAX,
        }
    }
}

/// Physics and timing knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seconds on the clock at the start of a round
    pub game_duration_secs: u32,
    /// Combo survives this long without a hit
    pub combo_timeout_ms: u64,
    /// Rate of the frame task that drives `tick()`
    pub frame_rate_hz: u32,
    /// Per-axis launch speed range (±)
    pub base_speed: f32,
    pub bounce_damping: DampingRange,
    /// Cap on any velocity component after a bounce
    pub max_axis_speed: f32,
    pub bounds: ArenaBounds,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_duration_secs: GAME_DURATION_SECS,
            combo_timeout_ms: COMBO_TIMEOUT_MS,
            frame_rate_hz: FRAME_RATE_HZ,
            base_speed: BASE_SPEED,
            bounce_damping: DampingRange::default(),
            max_axis_speed: MAX_AXIS_SPEED,
            bounds: ArenaBounds::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.game_duration_secs == 0 {
            return Err(TuningError::Invalid("game_duration_secs must be > 0".into()));
        }
        if self.frame_rate_hz == 0 {
            return Err(TuningError::Invalid("frame_rate_hz must be > 0".into()));
        }
        if self.combo_timeout_ms == 0 {
            return Err(TuningError::Invalid("combo_timeout_ms must be > 0".into()));
        }
        let damping = self.bounce_damping;
        if !(damping.min.is_finite() && damping.max.is_finite())
            || damping.min <= 0.0
            || damping.min > damping.max
        {
            return Err(TuningError::Invalid(format!(
                "bounce_damping must satisfy 0 < min <= max, got [{}, {})",
                damping.min, damping.max
            )));
        }
        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            return Err(TuningError::Invalid("base_speed must be > 0".into()));
        }
        if !(self.max_axis_speed.is_finite() && self.max_axis_speed >= self.base_speed) {
            return Err(TuningError::Invalid(
                "max_axis_speed must be >= base_speed".into(),
            ));
        }
        let half = self.bounds.half_extents();
        if !(half.is_finite() && half.cmpgt(Vec3::ZERO).all()) {
            return Err(TuningError::Invalid(format!(
                "bounds must be positive, got {half}"
            )));
        }
        Ok(())
    }

    /// Interval between frame ticks
    pub fn frame_period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.frame_rate_hz.max(1)))
    }

    pub fn combo_timeout(&self) -> Duration {
        Duration::from_millis(self.combo_timeout_ms)
    }

    /// Load tuning from a JSON file, falling back to defaults on any error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}, using default tuning", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.game_duration_secs, 60);
        assert_eq!(tuning.combo_timeout(), Duration::from_millis(2000));
        assert_eq!(tuning.bounds.half_extents(), Vec3::new(2.0, 1.5, 1.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "game_duration_secs": 30 }"#).unwrap();
        assert_eq!(tuning.game_duration_secs, 30);
        assert_eq!(tuning.frame_rate_hz, FRAME_RATE_HZ);
        assert_eq!(tuning.bounce_damping, DampingRange::default());
    }

    #[test]
    fn test_custom_damping_range() {
        let json = r#"{ "bounce_damping": { "min": 0.8, "max": 0.9 } }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.bounce_damping.min, 0.8);
        assert_eq!(tuning.bounce_damping.max, 0.9);
    }

    #[test]
    fn test_accepts_fixed_damping() {
        let tuning = Tuning::from_json(r#"{ "bounce_damping": { "min": 1.0, "max": 1.0 } }"#).unwrap();
        assert_eq!(tuning.bounce_damping.min, tuning.bounce_damping.max);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "frame_rate_hz": 0 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "bounce_damping": { "min": 1.1, "max": 1.0 } }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "bounds": { "half_x": 0.0, "half_y": 1.0, "half_z": 1.0 } }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(Tuning::from_json("not json"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_roundtrip_json() {
        let tuning = Tuning {
            combo_timeout_ms: 1500,
            ..Default::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_frame_period() {
        let tuning = Tuning::default();
        assert_eq!(tuning.frame_period(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = ArenaBounds::default();
        assert!(bounds.contains(Vec3::new(2.0, -1.5, 1.0)));
        assert!(!bounds.contains(Vec3::new(2.01, 0.0, 0.0)));
        assert!(!bounds.contains(Vec3::new(0.0, 0.0, -1.2)));
    }
}
