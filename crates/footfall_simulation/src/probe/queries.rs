//! Query traits implemented by whoever owns world geometry.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Stable identity of something a ray can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// Capsule clearance test
///
/// Answers whether a capsule (segment `bottom..top` swept by `radius`) is free
/// of obstacles on `mask`. A blocked answer is an expected outcome, not an error.
pub trait ClearanceQuery {
    fn is_capsule_clear(&self, bottom: Vec3, top: Vec3, radius: f32, mask: u32) -> bool;
}

/// Result of a ray cast that hit something
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
    pub target: ObstacleId,
}

/// Ray cast against world geometry
///
/// `direction` must be normalized; returns the closest hit within `max_distance`.
pub trait HitscanQuery {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32) -> Option<RayHit>;
}

/// Closure adapter, handy for one-off queries
impl<F> ClearanceQuery for F
where
    F: Fn(Vec3, Vec3, f32, u32) -> bool,
{
    fn is_capsule_clear(&self, bottom: Vec3, top: Vec3, radius: f32, mask: u32) -> bool {
        self(bottom, top, radius, mask)
    }
}
