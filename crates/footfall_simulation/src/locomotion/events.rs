//! Locomotion events (ECS → physics/render layers)

use bevy::prelude::*;

use super::components::LocomotionMode;

/// Event: locomotion mode changed (crouch, stand, slide start/end)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LocomotionModeChanged {
    pub entity: Entity,
    pub from: LocomotionMode,
    pub to: LocomotionMode,
}

/// Event: one-shot impulse (slide launch, crouch stomp)
///
/// Already added to `CharacterBody::velocity`; engine bridges that own their
/// own rigid body apply it once on their side.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LocomotionImpulse {
    pub entity: Entity,
    pub impulse: Vec3,
}
