//! Shooting events

use bevy::prelude::*;

use super::hitscan::ShotOutcome;

/// Event: a shot should be cast this tick
///
/// `token` = run-token of the automatic burst (None for single shots).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ShotRequested {
    pub shooter: Entity,
    pub token: Option<u64>,
}

/// Event: hitscan result for the effects/damage collaborators
///
/// Генерируется: resolve_hitscan_shots
/// Обрабатывается: внешний слой (impact VFX, трассеры, урон по цели)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitscanResolved {
    pub shooter: Entity,
    pub outcome: ShotOutcome,
    /// Tracer segment: muzzle → hit point / miss endpoint
    pub tracer: (Vec3, Vec3),
    pub damage: u32,
    /// camera forward × impact_force (zero on miss)
    pub impact_force: Vec3,
}
