//! Target entity and its bounce physics
//!
//! Targets drift in a straight line and reflect off the walls of an
//! axis-aligned box. All randomness comes from the RNG passed in, so a seeded
//! engine replays identically.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// A hittable target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec3,
    /// Displacement per frame at speed multiplier 1.0
    pub vel: Vec3,
    /// Render radius/scale, shared by every live target
    pub size: f32,
}

impl Target {
    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.pos.z
    }
}

/// Random per-axis velocity in `[-base_speed, base_speed)`
pub fn random_velocity<R: Rng>(rng: &mut R, base_speed: f32) -> Vec3 {
    if !base_speed.is_finite() || base_speed <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(
        rng.random_range(-base_speed..base_speed),
        rng.random_range(-base_speed..base_speed),
        rng.random_range(-base_speed..base_speed),
    )
}

/// Spawn a target at a uniformly random spot in the arena
pub fn create_target<R: Rng>(id: u32, size: f32, rng: &mut R, tuning: &Tuning) -> Target {
    let b = tuning.bounds;
    let pos = Vec3::new(
        rng.random_range(-b.half_x..=b.half_x),
        rng.random_range(-b.half_y..=b.half_y),
        rng.random_range(-b.half_z..=b.half_z),
    );
    Target {
        id,
        pos,
        vel: random_velocity(rng, tuning.base_speed),
        size,
    }
}

/// Reflect one axis off its walls.
///
/// Returns the clamped position and the (possibly reversed) velocity.
fn bounce_axis<R: Rng>(
    pos: f32,
    vel: f32,
    half: f32,
    rng: &mut R,
    tuning: &Tuning,
) -> (f32, f32) {
    if pos > half || pos < -half {
        let damping = tuning.bounce_damping;
        // A collapsed range means a fixed factor
        let factor = if damping.min < damping.max && (damping.max - damping.min).is_finite() {
            rng.random_range(damping.min..damping.max)
        } else {
            damping.min
        };
        let max = tuning.max_axis_speed;
        // f32::clamp panics on inverted or NaN bounds
        let vel = (-vel * factor).max(-max).min(max);
        log::trace!("bounce at {:.3} (wall ±{}), vel -> {:.4}", pos, half, vel);
        (pos.max(-half).min(half), vel)
    } else {
        (pos, vel)
    }
}

/// Advance a target one frame, bouncing off the arena walls.
///
/// Only position and velocity change; `id` and `size` carry over.
pub fn advance<R: Rng>(
    target: &Target,
    speed_multiplier: f32,
    rng: &mut R,
    tuning: &Tuning,
) -> Target {
    debug_assert!(speed_multiplier.is_finite() && speed_multiplier > 0.0);
    let moved = target.pos + target.vel * speed_multiplier;
    let b = tuning.bounds;

    let (x, vx) = bounce_axis(moved.x, target.vel.x, b.half_x, rng, tuning);
    let (y, vy) = bounce_axis(moved.y, target.vel.y, b.half_y, rng, tuning);
    let (z, vz) = bounce_axis(moved.z, target.vel.z, b.half_z, rng, tuning);

    Target {
        pos: Vec3::new(x, y, z),
        vel: Vec3::new(vx, vy, vz),
        ..target.clone()
    }
}
