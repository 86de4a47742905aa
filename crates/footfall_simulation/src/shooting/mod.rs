//! Shooting domain: hitscan fire and the automatic fire timer
//!
//! Содержит:
//! - components (WeaponClass, FireConfig, AutoFireTimer)
//! - hitscan (spread_direction, resolve_shot, ShotOutcome)
//! - events (ShotRequested, HitscanResolved)
//! - systems (tick_auto_fire, resolve_hitscan_shots)
//!
//! Flow (FixedUpdate, SimulationSet::Firing):
//! 1. tick_auto_fire: trigger → ShotRequested (с run-token для автоматики)
//! 2. resolve_hitscan_shots: ray из камеры с разбросом → HitscanResolved
//!    (точка/нормаль/цель или конечная точка промаха, трассер от дула)

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod hitscan;
pub mod systems;


pub use components::*;
pub use events::*;
pub use hitscan::*;
pub use systems::*;

use crate::SimulationSet;

/// Shooting Plugin
pub struct ShootingPlugin;

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ShotRequested>()
            .add_event::<HitscanResolved>()
            .register_type::<FireConfig>()
            .register_type::<AutoFireTimer>();

        app.add_systems(
            FixedUpdate,
            (tick_auto_fire, resolve_hitscan_shots)
                .chain()
                .in_set(SimulationSet::Firing),
        );
    }
}
