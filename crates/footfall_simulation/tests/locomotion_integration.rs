//! Locomotion integration test
//!
//! Полный headless App (SimulationPlugin + HeadlessBody):
//! - инварианты stamina / mode каждый тик
//! - слайд из спринта, latch до отпускания run
//! - отказ встать под потолком

use bevy::prelude::*;
use footfall_simulation::*;

/// Все LocomotionImpulse за прогон
#[derive(Resource, Default)]
struct ImpulseLog(Vec<LocomotionImpulse>);

fn record_impulses(mut events: EventReader<LocomotionImpulse>, mut log: ResMut<ImpulseLog>) {
    log.0.extend(events.read().copied());
}

/// Helper: App + игрок на полу в точке `feet`
fn create_locomotion_app(field: ObstacleField, feet: Vec3) -> (App, Entity) {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin)
        .insert_resource(field)
        .init_resource::<ImpulseLog>()
        .add_systems(PostUpdate, record_impulses);

    let player = {
        let mut commands = app.world_mut().commands();
        let player = spawn_player(&mut commands, feet, &TuningProfile::default());
        commands.entity(player).insert(HeadlessBody);
        player
    };

    // Первый кадр: delta = 0
    app.update();
    (app, player)
}

fn step(app: &mut App, event: PlayerInputEvent) {
    app.world_mut().send_event(event);
    app.update();
}

fn sprint_forward(player: Entity) -> PlayerInputEvent {
    PlayerInputEvent {
        move_direction: Vec2::Y,
        run_held: true,
        ..PlayerInputEvent::neutral(player)
    }
}

fn state(app: &App, player: Entity) -> LocomotionState {
    app.world().get::<LocomotionState>(player).cloned().unwrap_or_default()
}

fn check_invariants(app: &App, player: Entity, tick: usize) {
    let world = app.world();
    let stamina = world.get::<Stamina>(player).copied().unwrap_or_default();
    let state = state(app, player);

    assert!(
        stamina.current >= 0.0 && stamina.current <= stamina.max,
        "Tick {}: stamina {} out of bounds",
        tick,
        stamina.current
    );
    if state.can_sprint {
        assert_eq!(state.mode, LocomotionMode::Standing, "Tick {}: sprinting while low", tick);
        assert!(state.run_held && state.is_moving, "Tick {}: sprint without run+move", tick);
        assert!(!state.sprint_blocked_until_run_released, "Tick {}: sprint while latched", tick);
    }
}

#[test]
fn test_sprint_slide_latch_sequence() {
    let (mut app, player) = create_locomotion_app(ObstacleField::new(), Vec3::ZERO);

    // Разгон: первый тик только задаёт скорость, спринт с того момента как is_moving
    for tick in 0..60 {
        step(&mut app, sprint_forward(player));
        check_invariants(&app, player, tick);
    }
    assert!(state(&app, player).can_sprint);
    let z_after_sprint = app.world().get::<Transform>(player).map(|t| t.translation.z).unwrap_or_default();
    assert!(z_after_sprint < -5.0, "sprinted only to z={}", z_after_sprint);

    // Слайд
    step(
        &mut app,
        PlayerInputEvent {
            crouch_pressed: true,
            ..sprint_forward(player)
        },
    );
    assert_eq!(state(&app, player).mode, LocomotionMode::Sliding);
    let capsule = app.world().get::<CapsuleShape>(player).copied().unwrap_or_default();
    assert_eq!(capsule.height, LocomotionConfig::default().crouch_height);

    // Держим run до конца слайда и дольше
    for tick in 0..90 {
        step(&mut app, sprint_forward(player));
        check_invariants(&app, player, tick);
    }
    let after = state(&app, player);
    assert_eq!(after.mode, LocomotionMode::Standing);
    assert!(after.sprint_blocked_until_run_released);
    assert!(!after.can_sprint);

    // Отпустили run → latch снят, снова спринт
    step(
        &mut app,
        PlayerInputEvent {
            run_held: false,
            ..sprint_forward(player)
        },
    );
    assert!(!state(&app, player).sprint_blocked_until_run_released);
    for _ in 0..3 {
        step(&mut app, sprint_forward(player));
    }
    assert!(state(&app, player).can_sprint);

    // Слайд дал ровно один импульс за весь прогон
    let impulses = &app.world().resource::<ImpulseLog>().0;
    assert_eq!(impulses.len(), 1, "impulses: {:?}", impulses);
    assert_eq!(impulses[0].entity, player);
}

#[test]
fn test_stand_refused_under_ceiling() {
    // Потолок на высоте 1.4m над игроком
    let field = ObstacleField::new().with(Obstacle::cuboid(1, Vec3::new(0.0, 1.5, 0.0), Vec3::new(3.0, 0.1, 3.0)));
    let (mut app, player) = create_locomotion_app(field, Vec3::ZERO);

    let press = PlayerInputEvent {
        crouch_pressed: true,
        ..PlayerInputEvent::neutral(player)
    };

    step(&mut app, press);
    assert_eq!(state(&app, player).mode, LocomotionMode::Crouching);

    // Дать телу опуститься на пол
    for _ in 0..60 {
        step(&mut app, PlayerInputEvent::neutral(player));
    }

    step(&mut app, press);
    assert_eq!(state(&app, player).mode, LocomotionMode::Crouching);
    let capsule = app.world().get::<CapsuleShape>(player).copied().unwrap_or_default();
    assert_eq!(capsule.height, LocomotionConfig::default().crouch_height);
}

#[test]
fn test_crouch_press_between_fixed_ticks_is_not_lost() {
    let (mut app, player) = create_locomotion_app(ObstacleField::new(), Vec3::ZERO);

    // Кадр без fixed tick: нулевой шаг времени
    app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(std::time::Duration::ZERO));
    step(
        &mut app,
        PlayerInputEvent {
            crouch_pressed: true,
            ..PlayerInputEvent::neutral(player)
        },
    );
    assert_eq!(state(&app, player).mode, LocomotionMode::Standing);

    // Следующий кадр с тиком подхватывает защёлкнутое нажатие
    app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
        std::time::Duration::from_secs_f64(1.0 / FIXED_HZ),
    ));
    step(&mut app, PlayerInputEvent::neutral(player));
    assert_eq!(state(&app, player).mode, LocomotionMode::Crouching);
}

#[test]
fn test_stamina_drains_and_recovers_over_long_run() {
    let (mut app, player) = create_locomotion_app(ObstacleField::new(), Vec3::ZERO);

    // 8 секунд спринта: стамина (5) кончается, спринт выключается
    for tick in 0..480 {
        step(&mut app, sprint_forward(player));
        check_invariants(&app, player, tick);
    }
    let stamina = app.world().get::<Stamina>(player).copied().unwrap_or_default();
    assert!(stamina.current < 1.0);

    // Стоим: восстановление (5 / 0.5 = 10s, с запасом)
    for tick in 0..660 {
        step(&mut app, PlayerInputEvent::neutral(player));
        check_invariants(&app, player, tick);
    }
    let stamina = app.world().get::<Stamina>(player).copied().unwrap_or_default();
    assert_eq!(stamina.current, stamina.max);
}

#[test]
fn test_fov_widens_while_sprinting_and_zooms_while_aiming() {
    let (mut app, player) = create_locomotion_app(ObstacleField::new(), Vec3::ZERO);

    for _ in 0..90 {
        step(&mut app, sprint_forward(player));
    }
    let sprint_fov = app.world().get::<FieldOfView>(player).map(|f| f.degrees).unwrap_or_default();
    assert!(sprint_fov > CameraConfig::default().normal_fov + 5.0);

    for _ in 0..120 {
        step(
            &mut app,
            PlayerInputEvent {
                aim_held: true,
                ..PlayerInputEvent::neutral(player)
            },
        );
    }
    let aim_fov = app.world().get::<FieldOfView>(player).map(|f| f.degrees).unwrap_or_default();
    assert!((aim_fov - WeaponConfig::default().zoom_fov).abs() < 0.5);
}
