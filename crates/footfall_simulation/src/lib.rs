//! Footfall Simulation Core
//!
//! First-person locomotion на Bevy 0.16 ECS (headless, без рендера):
//! - locomotion: Standing / Crouching / Sliding, sprint, lean, slide latch
//! - stamina: бюджет спринта и слайда
//! - camera / weapon: визуальный feedback (bob, FOV, sway, aim blend)
//! - shooting: hitscan + отменяемый таймер автоматического огня
//!
//! Два цикла:
//! - FixedUpdate 60Hz: решения, влияющие на физику (скорость, импульсы, выстрелы)
//! - Update: сглаживание камеры/оружия
//!
//! Геометрию мира спрашиваем через `probe` traits; физику движка синхронизируем
//! через Rapier-компоненты.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod camera;
pub mod config;
pub mod input;
pub mod locomotion;
pub mod logger;
pub mod physics;
pub mod player;
pub mod probe;
pub mod shared;
pub mod shooting;
pub mod stamina;
pub mod weapon;

// Re-export базовых типов для удобства
pub use camera::{CameraConfig, CameraFeedbackPlugin, CameraRig, FieldOfView};
pub use config::{ConfigError, TuningProfile};
pub use input::{PlayerInput, PlayerInputEvent};
pub use locomotion::{
    CapsuleShape, LocomotionConfig, LocomotionImpulse, LocomotionMode, LocomotionModeChanged, LocomotionPlugin,
    LocomotionState,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel};
pub use physics::{CharacterBody, HeadlessBody, PhysicsBridgePlugin};
pub use player::{spawn_player, Player};
pub use probe::{ClearanceQuery, HitscanQuery, Obstacle, ObstacleField, ObstacleId, RayHit};
pub use shooting::{AutoFireTimer, FireConfig, HitscanResolved, ShootingPlugin, ShotOutcome, ShotRequested, WeaponClass};
pub use stamina::{Stamina, StaminaConfig};
pub use weapon::{EquippedWeapon, Reticle, WeaponConfig, WeaponFeedbackPlugin, WeaponRig};

/// Частота fixed tick (Hz)
pub const FIXED_HZ: f64 = 60.0;

/// Порядок fixed tick: locomotion → physics → firing
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Locomotion,
    Physics,
    Firing,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .init_resource::<ObstacleField>()
            .add_event::<PlayerInputEvent>()
            .configure_sets(
                FixedUpdate,
                (SimulationSet::Locomotion, SimulationSet::Physics, SimulationSet::Firing).chain(),
            )
            .add_plugins((
                LocomotionPlugin,
                PhysicsBridgePlugin,
                ShootingPlugin,
                CameraFeedbackPlugin,
                WeaponFeedbackPlugin,
            ));

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        // Input: события кадра → PlayerInput до FixedUpdate
        app.add_systems(PreUpdate, input::apply_player_input);

        // Visual feedback (variable step)
        app.add_systems(
            Update,
            (
                camera::apply_mouse_look,
                camera::update_camera_feedback,
                weapon::update_weapon_feedback,
                camera::compose_field_of_view,
                input::clear_look_delta,
            )
                .chain(),
        );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время идёт ровно на один fixed tick за `app.update()` (кроме первого
/// кадра, у которого delta = 0), так что прогоны воспроизводимы.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / FIXED_HZ)));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
