//! Weapon feedback domain: sway, bob, aim blend, reticle
//!
//! Содержит:
//! - components (WeaponConfig, WeaponRig, WeaponFrame, Reticle, EquippedWeapon)
//! - systems (update_weapon_feedback)
//!
//! Состояние локомоции приходит явно (`LocomotionView`), без глобального
//! доступа к игроку.

use bevy::prelude::*;

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::*;

/// Weapon feedback Plugin (типы; система в общей Update-цепочке)
pub struct WeaponFeedbackPlugin;

impl Plugin for WeaponFeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<WeaponConfig>()
            .register_type::<WeaponRig>()
            .register_type::<EquippedWeapon>();
    }
}
