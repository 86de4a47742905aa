//! Physics bridge module
//!
//! CharacterBody (velocity + ground contact), headless integration, Rapier sync.
//! Locomotion пишет желаемую скорость и импульсы в CharacterBody; кто её
//! интегрирует (headless system ниже или внешний движок) решает слой выше.

pub mod body;

pub use body::*;

use bevy::prelude::*;

use crate::SimulationSet;

/// Physics bridge Plugin
///
/// Headless integration + Rapier component sync (FixedUpdate, SimulationSet::Physics).
pub struct PhysicsBridgePlugin;

impl Plugin for PhysicsBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                integrate_headless_body,
                sync_velocity_to_rapier,
                sync_capsule_collider,
            )
                .chain()
                .in_set(SimulationSet::Physics),
        );
    }
}
