//! World-query domain: collaborators the gameplay logic asks about geometry
//!
//! Содержит:
//! - layers (collision layer bits + masks)
//! - queries (ClearanceQuery, HitscanQuery traits, RayHit)
//! - obstacle_field (headless implementation over axis-aligned boxes)
//!
//! Gameplay code only sees the traits. The headless `ObstacleField` resource
//! answers them for the simulation binary and the tests; an engine bridge can
//! provide its own implementation backed by a physics world.

pub mod layers;
pub mod obstacle_field;
pub mod queries;

pub use layers::*;
pub use obstacle_field::*;
pub use queries::*;
