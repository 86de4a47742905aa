//! Weapon feedback systems (Update, variable step).

use bevy::prelude::*;

use super::components::{EquippedWeapon, WeaponConfig, WeaponRig};
use crate::input::PlayerInput;
use crate::locomotion::LocomotionState;

/// System: sway, bob, aim blend
///
/// `EquippedWeapon` отсутствует → оружие считается активным.
pub fn update_weapon_feedback(
    time: Res<Time>,
    mut characters: Query<(
        &PlayerInput,
        &LocomotionState,
        &WeaponConfig,
        Option<&EquippedWeapon>,
        &mut WeaponRig,
    )>,
) {
    let dt = time.delta_secs();

    for (input, state, config, equipped, mut rig) in characters.iter_mut() {
        let active = equipped.is_none_or(|weapon| weapon.active);
        rig.update(dt, input.look_delta, &state.view(), input.aim_held, active, config);
    }
}
