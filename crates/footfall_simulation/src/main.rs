//! Headless симуляция Footfall
//!
//! Скриптованный прогон одного игрока: ходьба, спринт, слайд, присед под
//! низким потолком (отказ встать), автоматический огонь по мишени.
//!
//! Usage: footfall_simulation [profile.json]

use bevy::prelude::*;
use footfall_simulation::*;

/// Потолок: z ∈ [-40, -30], нижняя грань на 1.4m (ниже stand_height)
const CEILING_ID: u32 = 1;
/// Мишень прямо по курсу
const TARGET_ID: u32 = 2;

/// What the scripted player does on a given tick
fn scripted_input(player: Entity, tick: u32) -> PlayerInputEvent {
    let mut input = PlayerInputEvent::neutral(player);

    match tick {
        // Walk
        0..60 => input.move_direction = Vec2::Y,
        // Sprint, then slide out of it
        60..210 => {
            input.move_direction = Vec2::Y;
            input.run_held = true;
            input.crouch_pressed = tick == 150;
        }
        // Release run before the slide ends (no latch), drop into a crouch
        210..240 => {
            input.move_direction = Vec2::Y;
            input.crouch_pressed = tick == 239;
        }
        // Crouch-walk under the ceiling; standing up is refused at 390
        240..690 => {
            input.move_direction = Vec2::Y;
            input.crouch_pressed = tick == 390;
        }
        // Clear of the ceiling: stand up
        690 => input.crouch_pressed = true,
        // Aim and hold the trigger for half a second
        700..730 => {
            input.aim_held = true;
            input.fire_held = true;
        }
        _ => {}
    }

    input
}

fn log_hitscan_results(mut results: EventReader<HitscanResolved>) {
    for result in results.read() {
        match result.outcome {
            ShotOutcome::Hit(hit) => log(&format!(
                "Shot hit {:?} at {:.2?}, damage {}",
                hit.target, hit.point, result.damage
            )),
            ShotOutcome::Miss { endpoint } => log(&format!("Shot missed, tracer to {:.2?}", endpoint)),
        }
    }
}

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);

    let profile = match std::env::args().nth(1) {
        Some(path) => match TuningProfile::from_json_file(&path) {
            Ok(profile) => profile,
            Err(err) => {
                log_error(&format!("Falling back to default tuning: {}", err));
                TuningProfile::default()
            }
        },
        None => TuningProfile::default(),
    };

    log_info(&format!("Starting Footfall headless simulation (seed: {})", seed));

    app.add_plugins(SimulationPlugin)
        .insert_resource(
            ObstacleField::new()
                .with(Obstacle::cuboid(
                    CEILING_ID,
                    Vec3::new(0.0, 1.5, -35.0),
                    Vec3::new(5.0, 0.1, 5.0),
                ))
                .with(
                    Obstacle::cuboid(TARGET_ID, Vec3::new(0.0, 1.5, -80.0), Vec3::new(1.0, 1.5, 0.5))
                        .with_layers(probe::LAYER_ACTORS),
                ),
        )
        .add_systems(Update, log_hitscan_results);

    let player = {
        let mut commands = app.world_mut().commands();
        let player = spawn_player(&mut commands, Vec3::ZERO, &profile);
        commands.entity(player).insert(HeadlessBody);
        player
    };

    // Первый кадр: delta = 0, fixed tick не срабатывает
    app.update();

    for tick in 0..800 {
        app.world_mut().send_event(scripted_input(player, tick));
        app.update();

        if tick % 60 == 0 {
            let world = app.world();
            let (Some(state), Some(stamina), Some(transform), Some(fov)) = (
                world.get::<LocomotionState>(player),
                world.get::<Stamina>(player),
                world.get::<Transform>(player),
                world.get::<FieldOfView>(player),
            ) else {
                continue;
            };
            log(&format!(
                "Tick {}: {:?} z={:.2} stamina={:.2} sprint={} fov={:.1}",
                tick, state.mode, transform.translation.z, stamina.current, state.can_sprint, fov.degrees
            ));
        }
    }

    log_info("Simulation complete!");
}
