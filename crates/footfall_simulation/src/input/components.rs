//! Player input component

use bevy::prelude::*;

/// Current input of a controlled character
///
/// Written in PreUpdate from `PlayerInputEvent`.
/// - `crouch_pressed` / `fire_pressed`: cleared by the FixedUpdate system that
///   consumes them (so a press on a frame without a fixed tick is not lost)
/// - `look_delta`: cleared at the end of Update (per-frame, not per-tick)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    pub move_direction: Vec2,
    pub look_delta: Vec2,
    pub run_held: bool,
    pub walk_held: bool,
    pub lean_axis: f32,
    pub crouch_pressed: bool,
    pub aim_held: bool,
    pub fire_held: bool,
    pub fire_pressed: bool,
}
