//! Input events (device adapter → ECS)

use bevy::prelude::*;

/// Event: input snapshot for one controlled entity
///
/// Levels (`*_held`, axes) replace the previous values; `look_delta`
/// accumulates; `*_pressed` edges are latched until the next fixed tick
/// consumes them.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerInputEvent {
    pub entity: Entity,
    /// x = strafe (right +), y = forward (+)
    pub move_direction: Vec2,
    /// Raw mouse counts this frame (x right, y up)
    pub look_delta: Vec2,
    pub run_held: bool,
    pub walk_held: bool,
    /// Lean axis: -1 left, +1 right
    pub lean_axis: f32,
    pub crouch_pressed: bool,
    pub aim_held: bool,
    pub fire_held: bool,
    pub fire_pressed: bool,
}

impl PlayerInputEvent {
    /// Neutral input (nothing held) for `entity`
    pub fn neutral(entity: Entity) -> Self {
        Self {
            entity,
            move_direction: Vec2::ZERO,
            look_delta: Vec2::ZERO,
            run_held: false,
            walk_held: false,
            lean_axis: 0.0,
            crouch_pressed: false,
            aim_held: false,
            fire_held: false,
            fire_pressed: false,
        }
    }
}
