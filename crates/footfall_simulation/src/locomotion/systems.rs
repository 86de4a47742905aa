//! Locomotion systems (FixedUpdate).

use bevy::prelude::*;

use super::components::{CapsuleShape, LocomotionConfig, LocomotionInputs, LocomotionState};
use super::events::{LocomotionImpulse, LocomotionModeChanged};
use crate::input::PlayerInput;
use crate::logger;
use crate::physics::CharacterBody;
use crate::probe::ObstacleField;
use crate::stamina::Stamina;

/// System: advance the locomotion state machine one fixed tick
///
/// # Reads
/// - `PlayerInput` (levels + crouch edge; the edge is consumed here)
/// - `CharacterBody` (current velocity, ground contact)
/// - `Transform` (body basis, capsule center)
/// - `ObstacleField` (stand-up clearance)
///
/// # Writes
/// - `LocomotionState`, `Stamina`
/// - `CharacterBody` (horizontal velocity, drag, one-shot impulses)
/// - `CapsuleShape` (only on stand/crouch change)
/// - `LocomotionModeChanged`, `LocomotionImpulse`
pub fn advance_locomotion(
    time: Res<Time<Fixed>>,
    field: Res<ObstacleField>,
    mut characters: Query<(
        Entity,
        &Transform,
        &LocomotionConfig,
        &mut PlayerInput,
        &mut LocomotionState,
        &mut Stamina,
        &mut CharacterBody,
        &mut CapsuleShape,
    )>,
    mut mode_events: EventWriter<LocomotionModeChanged>,
    mut impulse_events: EventWriter<LocomotionImpulse>,
) {
    let dt = time.delta_secs();

    for (entity, transform, config, mut input, mut state, mut stamina, mut body, mut capsule) in
        characters.iter_mut()
    {
        let feet_position = transform.translation - Vec3::Y * capsule.height * 0.5;

        let inputs = LocomotionInputs {
            move_input: input.move_direction,
            run_held: input.run_held,
            walk_held: input.walk_held,
            lean_axis: input.lean_axis,
            crouch_pressed: std::mem::take(&mut input.crouch_pressed),
            grounded: body.grounded,
            velocity: body.velocity,
            right: transform.right().as_vec3(),
            forward: transform.forward().as_vec3(),
            feet_position,
        };

        let output = state.advance(dt, &inputs, &mut stamina, config, &*field);

        match output.desired_velocity {
            Some(desired) => {
                body.velocity.x = desired.x;
                body.velocity.z = desired.z;
                body.horizontal_drag = 0.0;
            }
            // Sliding: momentum from the launch impulse, bled off by friction
            None => body.horizontal_drag = config.slide_friction,
        }

        if let Some(impulse) = output.impulse {
            body.velocity += impulse;
            impulse_events.write(LocomotionImpulse { entity, impulse });
        }

        capsule.set_if_neq(CapsuleShape {
            height: output.collision_height,
            radius: config.capsule_radius,
        });

        if let Some(transition) = output.transition {
            logger::log(&format!(
                "Entity {:?} locomotion {:?} → {:?}",
                entity, transition.from, transition.to
            ));
            mode_events.write(LocomotionModeChanged {
                entity,
                from: transition.from,
                to: transition.to,
            });
        }

        if output.stand_refused {
            logger::log(&format!("Entity {:?} cannot stand up: no headroom", entity));
        }

        if output.stamina_depleted {
            logger::log_info(&format!("Entity {:?} stamina depleted, sprint disabled", entity));
        }
    }
}
