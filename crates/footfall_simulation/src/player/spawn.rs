//! Player marker and spawning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::camera::{CameraConfig, CameraRig, FieldOfView};
use crate::config::TuningProfile;
use crate::input::PlayerInput;
use crate::locomotion::{CapsuleShape, LocomotionConfig, LocomotionState};
use crate::physics::{capsule_collider, CharacterBody};
use crate::probe::{HITSCAN_MASK, LAYER_ACTORS};
use crate::shooting::{AutoFireTimer, FireConfig};
use crate::stamina::Stamina;
use crate::weapon::{EquippedWeapon, WeaponConfig, WeaponRig};

/// Marker component для player-controlled entity
///
/// Required components дают рабочего персонажа с default-тюнингом;
/// `spawn_player` переопределяет их значениями из TuningProfile.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    PlayerInput,
    LocomotionConfig,
    LocomotionState,
    Stamina,
    CharacterBody,
    CapsuleShape,
    CameraConfig,
    CameraRig,
    FieldOfView,
    WeaponConfig,
    WeaponRig,
    EquippedWeapon,
    FireConfig,
    AutoFireTimer
)]
pub struct Player;

/// Collision groups for a character body (actors layer, hit by everything
/// hitscan sees)
pub fn actor_collision_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(LAYER_ACTORS),
        Group::from_bits_truncate(HITSCAN_MASK),
    )
}

/// Spawn a player standing with feet at `feet_position`
///
/// Transform.translation = центр капсулы. Rapier-компоненты добавляются для
/// engine-backed режима; headless режим дополнительно вешает `HeadlessBody`.
pub fn spawn_player(commands: &mut Commands, feet_position: Vec3, profile: &TuningProfile) -> Entity {
    let capsule = CapsuleShape {
        height: profile.locomotion.stand_height,
        radius: profile.locomotion.capsule_radius,
    };

    commands
        .spawn((
            Transform::from_translation(feet_position + Vec3::Y * capsule.height * 0.5),
            Player,
            // Locomotion
            profile.locomotion.clone(),
            Stamina::from_config(&profile.stamina),
            capsule,
            // Feedback
            CameraRig::new(&profile.camera),
            profile.camera.clone(),
            WeaponRig::new(&profile.weapon),
            profile.weapon.clone(),
            FieldOfView {
                degrees: profile.camera.normal_fov,
            },
            profile.fire.clone(),
        ))
        .insert((
            // Rapier physics
            RigidBody::KinematicVelocityBased,
            capsule_collider(&capsule),
            Velocity::default(),
            LockedAxes::ROTATION_LOCKED,
            actor_collision_groups(),
        ))
        .id()
}
