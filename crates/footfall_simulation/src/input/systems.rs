//! Input systems

use bevy::prelude::*;

use super::components::PlayerInput;
use super::events::PlayerInputEvent;

/// System: fold this frame's input events into `PlayerInput` (PreUpdate)
///
/// A fire press is also inferred from a held edge, so adapters that only
/// report levels still start auto-fire.
pub fn apply_player_input(
    mut events: EventReader<PlayerInputEvent>,
    mut inputs: Query<&mut PlayerInput>,
) {
    for event in events.read() {
        let Ok(mut input) = inputs.get_mut(event.entity) else {
            continue;
        };

        let fire_edge = event.fire_held && !input.fire_held;

        input.move_direction = event.move_direction;
        input.run_held = event.run_held;
        input.walk_held = event.walk_held;
        input.lean_axis = event.lean_axis;
        input.aim_held = event.aim_held;
        input.fire_held = event.fire_held;

        if event.look_delta.is_finite() {
            input.look_delta += event.look_delta;
        }
        input.crouch_pressed |= event.crouch_pressed;
        input.fire_pressed |= event.fire_pressed || fire_edge;
    }
}

/// System: drop the per-frame look delta after feedback has read it
pub fn clear_look_delta(mut inputs: Query<&mut PlayerInput>) {
    for mut input in inputs.iter_mut() {
        input.look_delta = Vec2::ZERO;
    }
}
