//! Headless world geometry: a flat list of axis-aligned boxes.
//!
//! # Queries
//! - Capsule clearance: distance from the capsule segment to each box,
//!   minimized with a golden-section search (the distance from a point moving
//!   along a line to a convex box is convex in the line parameter).
//! - Ray cast: slab test, reports entry point and the normal of the entry face.
//!
//! Good enough for tests and the headless binary; not meant for large levels.

use bevy::prelude::*;

use super::layers::LAYER_WORLD;
use super::queries::{ClearanceQuery, HitscanQuery, ObstacleId, RayHit};

/// Axis-aligned box obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub min: Vec3,
    pub max: Vec3,
    pub layers: u32,
}

impl Obstacle {
    /// Box from center + half extents on the world layer
    pub fn cuboid(id: u32, center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            id: ObstacleId(id),
            min: center - half,
            max: center + half,
            layers: LAYER_WORLD,
        }
    }

    pub fn with_layers(mut self, layers: u32) -> Self {
        self.layers = layers;
        self
    }

    /// Distance from `point` to the box (0 inside)
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        let clamped = point.clamp(self.min, self.max);
        point.distance(clamped)
    }

    fn distance_to_segment(&self, a: Vec3, b: Vec3) -> f32 {
        const ITERATIONS: usize = 48;
        let inv_phi = (5.0_f32.sqrt() - 1.0) * 0.5;

        let mut lo = 0.0_f32;
        let mut hi = 1.0_f32;
        let mut c = hi - inv_phi * (hi - lo);
        let mut d = lo + inv_phi * (hi - lo);
        let mut fc = self.distance_to_point(a.lerp(b, c));
        let mut fd = self.distance_to_point(a.lerp(b, d));

        for _ in 0..ITERATIONS {
            if fc < fd {
                hi = d;
                d = c;
                fd = fc;
                c = hi - inv_phi * (hi - lo);
                fc = self.distance_to_point(a.lerp(b, c));
            } else {
                lo = c;
                c = d;
                fc = fd;
                d = lo + inv_phi * (hi - lo);
                fd = self.distance_to_point(a.lerp(b, d));
            }
        }

        // Endpoints can win on a flat plateau
        fc.min(fd)
            .min(self.distance_to_point(a))
            .min(self.distance_to_point(b))
    }

    /// Slab test. Returns (distance, entry normal).
    fn ray_entry(&self, origin: Vec3, direction: Vec3) -> Option<(f32, Vec3)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = -direction;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < 1e-8 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let mut t0 = (lo - o) / d;
            let mut t1 = (hi - o) / d;
            // Entry face normal points against the ray on this axis
            let mut face = Vec3::ZERO;
            face[axis] = -d.signum();
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            if t0 > t_enter {
                t_enter = t0;
                normal = face;
            }
            t_exit = t_exit.min(t1);

            if t_enter > t_exit {
                return None;
            }
        }

        if t_exit < 0.0 {
            return None;
        }

        // Origin inside the box: hit at distance 0, facing back along the ray
        if t_enter < 0.0 {
            return Some((0.0, -direction));
        }

        Some((t_enter, normal))
    }
}

/// Headless obstacle set (resource)
#[derive(Resource, Debug, Clone, Default)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn add(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }
}

impl ClearanceQuery for ObstacleField {
    fn is_capsule_clear(&self, bottom: Vec3, top: Vec3, radius: f32, mask: u32) -> bool {
        self.obstacles
            .iter()
            .filter(|obstacle| obstacle.layers & mask != 0)
            .all(|obstacle| obstacle.distance_to_segment(bottom, top) >= radius)
    }
}

impl HitscanQuery for ObstacleField {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || max_distance <= 0.0 {
            return None;
        }

        self.obstacles
            .iter()
            .filter(|obstacle| obstacle.layers & mask != 0)
            .filter_map(|obstacle| {
                let (distance, normal) = obstacle.ray_entry(origin, direction)?;
                (distance <= max_distance).then(|| RayHit {
                    point: origin + direction * distance,
                    normal,
                    distance,
                    target: obstacle.id,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
