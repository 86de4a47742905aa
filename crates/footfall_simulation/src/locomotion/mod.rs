//! Locomotion domain: movement mode state machine
//!
//! Содержит:
//! - components (LocomotionMode, LocomotionConfig, LocomotionState, CapsuleShape,
//!   LocomotionInputs/Output, LocomotionView)
//! - rules (pure decisions: can_sprint, can_start_slide, can_stand_up, target_speed)
//! - controller (LocomotionState::advance: per-tick sequencing)
//! - events (LocomotionModeChanged, LocomotionImpulse)
//! - systems (advance_locomotion)

use bevy::prelude::*;

pub mod components;
pub mod controller;
pub mod events;
pub mod rules;
pub mod systems;

#[cfg(test)]
mod controller_tests;

pub use components::*;
pub use events::*;
pub use systems::*;

use crate::SimulationSet;

/// Locomotion Plugin
///
/// `advance_locomotion` runs in `SimulationSet::Locomotion` (FixedUpdate),
/// before the body integration and the fire timer.
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LocomotionModeChanged>()
            .add_event::<LocomotionImpulse>();

        app.add_systems(FixedUpdate, advance_locomotion.in_set(SimulationSet::Locomotion));
    }
}
