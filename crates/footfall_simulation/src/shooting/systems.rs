//! Shooting systems (FixedUpdate, SimulationSet::Firing).

use bevy::prelude::*;

use super::components::{AutoFireTimer, FireConfig};
use super::events::{HitscanResolved, ShotRequested};
use super::hitscan::{resolve_shot, spread_direction, ShotFrame, ShotOutcome};
use crate::camera::CameraRig;
use crate::input::PlayerInput;
use crate::locomotion::CapsuleShape;
use crate::logger;
use crate::probe::ObstacleField;
use crate::weapon::{EquippedWeapon, WeaponRig};
use crate::DeterministicRng;

/// System: trigger → ShotRequested
///
/// - Rifle: AutoFireTimer (первый выстрел на нажатии, дальше каждые fire_rate)
/// - Pistol: один выстрел на нажатие
/// - Неактивное оружие: очередь отменяется, нажатие съедается
pub fn tick_auto_fire(
    time: Res<Time<Fixed>>,
    mut shooters: Query<(
        Entity,
        &mut PlayerInput,
        &FireConfig,
        &mut AutoFireTimer,
        Option<&EquippedWeapon>,
    )>,
    mut shots: EventWriter<ShotRequested>,
) {
    let dt = time.delta_secs();

    for (entity, mut input, config, mut timer, equipped) in shooters.iter_mut() {
        let pressed = std::mem::take(&mut input.fire_pressed);
        let active = equipped.is_none_or(|weapon| weapon.active);

        if !active {
            if timer.is_active() {
                timer.cancel();
                logger::log(&format!("Entity {:?} auto-fire cancelled: weapon inactive", entity));
            }
            continue;
        }

        if !config.class.is_automatic() {
            if pressed {
                shots.write(ShotRequested {
                    shooter: entity,
                    token: None,
                });
            }
            continue;
        }

        let was_active = timer.is_active();
        let count = timer.advance(dt, input.fire_held, pressed, config.fire_rate);

        match (was_active, timer.is_active()) {
            (false, true) => logger::log(&format!("Entity {:?} auto-fire started", entity)),
            (true, false) => logger::log(&format!("Entity {:?} auto-fire stopped", entity)),
            _ => {}
        }

        for _ in 0..count {
            shots.write(ShotRequested {
                shooter: entity,
                token: timer.run,
            });
        }
    }
}

/// System: ShotRequested → ray cast → HitscanResolved
///
/// Камера: ноги + CameraRig.height, ориентация yaw·pitch·roll.
/// Разброс: `aiming_bullet_spread` пока WeaponRig.aiming, иначе `bullet_spread`.
pub fn resolve_hitscan_shots(
    mut requests: EventReader<ShotRequested>,
    mut rng: ResMut<DeterministicRng>,
    field: Res<ObstacleField>,
    shooters: Query<(
        &Transform,
        &CapsuleShape,
        &CameraRig,
        &FireConfig,
        &AutoFireTimer,
        Option<&WeaponRig>,
    )>,
    mut results: EventWriter<HitscanResolved>,
) {
    for request in requests.read() {
        let Ok((transform, capsule, camera, config, timer, weapon)) = shooters.get(request.shooter) else {
            continue;
        };

        // Очередь отменена между запросом и разрешением
        if !timer.accepts(request.token) {
            continue;
        }

        let feet = transform.translation - Vec3::Y * capsule.height * 0.5;
        let frame = ShotFrame {
            origin: feet + Vec3::Y * camera.height,
            rotation: camera.view_rotation(),
        };

        let aiming = weapon.is_some_and(|weapon| weapon.aiming);
        let direction = spread_direction(&frame, config.spread(aiming), &mut rng.rng);
        let outcome = resolve_shot(&frame, direction, config, &*field);

        let impact_force = match outcome {
            ShotOutcome::Hit(hit) => {
                logger::log(&format!(
                    "Entity {:?} hit {:?} at {:.2?} ({:.1}m)",
                    request.shooter, hit.target, hit.point, hit.distance
                ));
                frame.forward() * config.impact_force
            }
            ShotOutcome::Miss { .. } => Vec3::ZERO,
        };

        results.write(HitscanResolved {
            shooter: request.shooter,
            outcome,
            tracer: (frame.muzzle(config), outcome.end_point()),
            damage: if outcome.is_hit() { config.damage } else { 0 },
            impact_force,
        });
    }
}
