//! Hitscan math: spread and ray resolution.

use bevy::prelude::*;
use rand::Rng;

use super::components::FireConfig;
use crate::probe::{HitscanQuery, RayHit};

/// Result of one hitscan shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    Hit(RayHit),
    /// Nothing within range; tracer ends at muzzle + direction × range
    Miss { endpoint: Vec3 },
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit(_))
    }

    /// Where the tracer ends
    pub fn end_point(&self) -> Vec3 {
        match self {
            ShotOutcome::Hit(hit) => hit.point,
            ShotOutcome::Miss { endpoint } => *endpoint,
        }
    }
}

/// Camera orientation at the moment of the shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotFrame {
    pub origin: Vec3,
    pub rotation: Quat,
}

impl ShotFrame {
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn muzzle(&self, config: &FireConfig) -> Vec3 {
        self.origin + self.rotation * config.muzzle_offset
    }
}

/// Camera forward perturbed by a per-axis offset in [-spread, spread]
/// along camera right and up, normalized.
pub fn spread_direction<R: Rng + ?Sized>(frame: &ShotFrame, spread: f32, rng: &mut R) -> Vec3 {
    let forward = frame.forward();
    if spread.is_nan() || spread <= 0.0 {
        return forward;
    }

    let dx = rng.gen_range(-spread..=spread);
    let dy = rng.gen_range(-spread..=spread);
    (forward + frame.right() * dx + frame.up() * dy).normalize_or(forward)
}

/// Cast one shot along `direction` from the camera
pub fn resolve_shot(
    frame: &ShotFrame,
    direction: Vec3,
    config: &FireConfig,
    world: &dyn HitscanQuery,
) -> ShotOutcome {
    match world.cast_ray(frame.origin, direction, config.range, config.hit_mask) {
        Some(hit) => ShotOutcome::Hit(hit),
        None => ShotOutcome::Miss {
            endpoint: frame.muzzle(config) + direction * config.range,
        },
    }
}
