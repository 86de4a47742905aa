//! Camera systems (Update, variable step).

use bevy::prelude::*;

use super::components::{compose_fov, CameraConfig, CameraRig, FieldOfView};
use crate::input::PlayerInput;
use crate::locomotion::LocomotionState;
use crate::weapon::WeaponRig;

/// System: mouse look → CameraRig yaw/pitch, body Transform rotation
///
/// Не зависит от frame time: одинаковый поворот на единицу мыши при любом FPS.
pub fn apply_mouse_look(
    mut characters: Query<(&PlayerInput, &CameraConfig, &mut CameraRig, &mut Transform)>,
) {
    for (input, config, mut rig, mut transform) in characters.iter_mut() {
        if input.look_delta == Vec2::ZERO {
            continue;
        }
        rig.apply_look(input.look_delta, config);
        transform.rotation = rig.body_rotation();
    }
}

/// System: head bob, eye height, locomotion FOV
pub fn update_camera_feedback(
    time: Res<Time>,
    mut characters: Query<(&LocomotionState, &CameraConfig, &mut CameraRig)>,
) {
    let dt = time.delta_secs();

    for (state, config, mut rig) in characters.iter_mut() {
        rig.update(dt, &state.view(), config);
    }
}

/// System: the one writer of `FieldOfView`
///
/// Без оружия FOV = locomotion FOV камеры.
pub fn compose_field_of_view(
    mut characters: Query<(&CameraRig, Option<&WeaponRig>, &mut FieldOfView)>,
) {
    for (camera, weapon, mut fov) in characters.iter_mut() {
        let degrees = match weapon {
            Some(weapon) => compose_fov(camera.fov, weapon.aim_fov, weapon.aim_time),
            None => camera.fov,
        };
        fov.set_if_neq(FieldOfView { degrees });
    }
}
