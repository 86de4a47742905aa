//! Collision layer bits for world queries.
//!
//! Obstacles carry a `layers` bitmask; queries pass a `mask` and only see
//! obstacles where `layers & mask != 0`.

/// Static level geometry (walls, floors, ceilings)
pub const LAYER_WORLD: u32 = 1 << 0;

/// Characters and other shootable actors
pub const LAYER_ACTORS: u32 = 1 << 1;

/// Props that block bullets but not movement (glass, foliage volumes)
pub const LAYER_BULLET_BLOCKERS: u32 = 1 << 2;

/// Mask used by the stand-up clearance test (only solid world geometry)
pub const CLEARANCE_MASK: u32 = LAYER_WORLD;

/// Mask used by hitscan shots
pub const HITSCAN_MASK: u32 = LAYER_WORLD | LAYER_ACTORS | LAYER_BULLET_BLOCKERS;
