//! Tests for the locomotion state machine (LocomotionState::advance).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::components::{
        LocomotionConfig, LocomotionInputs, LocomotionMode, LocomotionOutput, LocomotionState,
        ModeTransition,
    };
    use crate::stamina::Stamina;

    fn open(_: Vec3, _: Vec3, _: f32, _: u32) -> bool {
        true
    }

    fn blocked(_: Vec3, _: Vec3, _: f32, _: u32) -> bool {
        false
    }

    /// Run held, pushing forward at sprint speed
    fn sprinting_inputs() -> LocomotionInputs {
        LocomotionInputs {
            move_input: Vec2::new(0.0, 1.0),
            run_held: true,
            velocity: Vec3::new(0.0, 0.0, -10.0),
            ..default()
        }
    }

    fn tick(
        state: &mut LocomotionState,
        stamina: &mut Stamina,
        config: &LocomotionConfig,
        inputs: &LocomotionInputs,
        dt: f32,
    ) -> LocomotionOutput {
        state.advance(dt, inputs, stamina, config, &open)
    }

    #[test]
    fn test_sprint_drains_stamina_to_zero_then_stops() {
        let config = LocomotionConfig::default();
        let mut state = LocomotionState::default();
        let mut stamina = Stamina::default();
        assert_eq!(stamina.current, 5.0);

        let inputs = sprinting_inputs();
        for i in 0..5 {
            let output = tick(&mut state, &mut stamina, &config, &inputs, 1.0);
            assert!(state.can_sprint, "tick {} should sprint", i + 1);
            assert_eq!(output.stamina_depleted, i == 4);
        }
        assert_eq!(stamina.current, 0.0);

        // 6-й тик: стамина 0 → спринт запрещён
        let output = tick(&mut state, &mut stamina, &config, &inputs, 1.0);
        assert!(!state.can_sprint);
        assert_eq!(output.desired_velocity.map(|v| v.length()), Some(config.move_speed));
    }

    #[test]
    fn test_stamina_stays_in_bounds() {
        let config = LocomotionConfig::default();
        let mut state = LocomotionState::default();
        let mut stamina = Stamina::default();

        let sprint = sprinting_inputs();
        let idle = LocomotionInputs::default();
        for i in 0..200 {
            let inputs = if (i / 40) % 2 == 0 { &sprint } else { &idle };
            tick(&mut state, &mut stamina, &config, inputs, 0.1);
            assert!(stamina.current >= 0.0 && stamina.current <= stamina.max);
        }
    }

    #[test]
    fn test_crouch_from_standing_is_never_blocked() {
        let config = LocomotionConfig::default();
        let mut state = LocomotionState::default();
        let mut stamina = Stamina::default();

        let inputs = LocomotionInputs {
            crouch_pressed: true,
            ..default()
        };
        let output = state.advance(1.0 / 60.0, &inputs, &mut stamina, &config, &blocked);

        assert_eq!(state.mode, LocomotionMode::Crouching);
        assert_eq!(output.collision_height, config.crouch_height);
        assert_eq!(
            output.transition,
            Some(ModeTransition {
                from: LocomotionMode::Standing,
                to: LocomotionMode::Crouching,
            })
        );
        // Stomp on the ground
        assert_eq!(output.impulse, Some(Vec3::NEG_Y * config.crouch_stomp_force));
    }

    #[test]
    fn test_crouch_in_air_has_no_stomp() {
        let config = LocomotionConfig::default();
        let mut state = LocomotionState::default();
        let mut stamina = Stamina::default();

        let inputs = LocomotionInputs {
            crouch_pressed: true,
            grounded: false,
            ..default()
        };
        let output = tick(&mut state, &mut stamina, &config, &inputs, 1.0 / 60.0);

        assert_eq!(state.mode, LocomotionMode::Crouching);
        assert_eq!(output.impulse, None);
    }

    #[test]
    fn test_stand_up_refused_under_ceiling() {
        let config = LocomotionConfig::default();
        let mut state = LocomotionState {
            mode: LocomotionMode::Crouching,
            ..default()
        };
        let mut stamina = Stamina::default();

        let inputs = LocomotionInputs {
            crouch_pressed: true,
            ..default()
        };
        let output = state.advance(1.0 / 60.0, &inputs, &mut stamina, &config, &blocked);

        assert_eq!(state.mode, LocomotionMode::Crouching);
        assert!(output.stand_refused);
        assert_eq!(output.transition, None);
        assert_eq!(output.collision_height, config.crouch_height);

        // Headroom appears → toggle works
        let output = tick(&mut state, &mut stamina, &config, &inputs, 1.0 / 60.0);
        assert_eq!(state.mode, LocomotionMode::Standing);
        assert_eq!(output.collision_height, config.stand_height);
    }

    #[test]
    fn test_slide_after_long_enough_sprint() {
        let config = LocomotionConfig {
            min_run_time_before_slide: 1.5,
            slide_duration: 1.0,
            ..default()
        };
        let mut state = LocomotionState::default();
        let mut stamina = Stamina::default();

        let sprint = sprinting_inputs();
        for _ in 0..4 {
            tick(&mut state, &mut stamina, &config, &sprint, 0.5);
        }
        assert_eq!(state.run_duration, 2.0);

        let press = LocomotionInputs {
            crouch_pressed: true,
            ..sprint
        };
        let output = tick(&mut state, &mut stamina, &config, &press, 0.5);

        assert_eq!(state.mode, LocomotionMode::Sliding);
        assert_eq!(output.impulse, Some(Vec3::NEG_Z * config.slide_force));
        assert_eq!(output.desired_velocity, None);
        assert_eq!(output.collision_height, config.crouch_height);
        assert!(!state.can_sprint);

        // Impulse only once; the launch tick does not count toward the slide
        let output = tick(&mut state, &mut stamina, &config, &sprint, 0.5);
        assert_eq!(output.impulse, None);
        assert_eq!(state.mode, LocomotionMode::Sliding);
        assert_eq!(state.slide_elapsed, 0.5);

        let output = tick(&mut state, &mut stamina, &config, &sprint, 0.5);
        assert_eq!(output.impulse, None);
        assert_eq!(state.mode, LocomotionMode::Standing);
        assert!(state.sprint_blocked_until_run_released);
        assert!(!state.can_sprint);
    }

    #[test]
    fn test_short_sprint_crouches_instead_of_sliding() {
        let config = LocomotionConfig {
            min_run_time_before_slide: 1.5,
            ..default()
        };
        let mut state = LocomotionState::default();
        let mut stamina = Stamina::default();

        let sprint = sprinting_inputs();
        for _ in 0..2 {
            tick(&mut state, &mut stamina, &config, &sprint, 0.5);
        }

        let press = LocomotionInputs {
            crouch_pressed: true,
            ..sprint
        };
        tick(&mut state, &mut stamina, &config, &press, 0.5);
        assert_eq!(state.mode, LocomotionMode::Crouching);
    }

    #[test]
    fn test_no_slide_from_standstill() {
        let config = LocomotionConfig {
            min_run_time_before_slide: 0.0,
            ..default()
        };
        let mut state = LocomotionState::default();
        let mut stamina = Stamina::default();

        let press = LocomotionInputs {
            run_held: true,
            crouch_pressed: true,
            ..default()
        };
        tick(&mut state, &mut stamina, &config, &press, 1.0 / 60.0);
        assert_ne!(state.mode, LocomotionMode::Sliding);
    }

    #[test]
    fn test_sprint_latched_until_run_released() {
        let config = LocomotionConfig {
            min_run_time_before_slide: 0.0,
            slide_duration: 0.25,
            ..default()
        };
        let mut state = LocomotionState::default();
        let mut stamina = Stamina {
            max: 100.0,
            current: 100.0,
            ..default()
        };

        let sprint = sprinting_inputs();
        tick(&mut state, &mut stamina, &config, &sprint, 0.1);
        let press = LocomotionInputs {
            crouch_pressed: true,
            ..sprint
        };
        tick(&mut state, &mut stamina, &config, &press, 0.1);
        assert_eq!(state.mode, LocomotionMode::Sliding);

        for _ in 0..5 {
            tick(&mut state, &mut stamina, &config, &sprint, 0.1);
        }
        assert_eq!(state.mode, LocomotionMode::Standing);

        // Run still held → no sprint, no matter how long
        for _ in 0..10 {
            tick(&mut state, &mut stamina, &config, &sprint, 0.1);
            assert!(!state.can_sprint);
        }

        let released = LocomotionInputs {
            run_held: false,
            ..sprint
        };
        tick(&mut state, &mut stamina, &config, &released, 0.1);
        assert!(!state.sprint_blocked_until_run_released);

        tick(&mut state, &mut stamina, &config, &sprint, 0.1);
        assert!(state.can_sprint);
    }

    #[test]
    fn test_latch_clears_when_slide_ends_after_release() {
        let config = LocomotionConfig {
            min_run_time_before_slide: 0.0,
            slide_duration: 0.25,
            ..default()
        };
        let mut state = LocomotionState::default();
        let mut stamina = Stamina::default();

        let sprint = sprinting_inputs();
        tick(&mut state, &mut stamina, &config, &sprint, 0.1);
        let press = LocomotionInputs {
            crouch_pressed: true,
            ..sprint
        };
        tick(&mut state, &mut stamina, &config, &press, 0.1);
        assert_eq!(state.mode, LocomotionMode::Sliding);

        // Run released mid-slide, slide ends later
        let released = LocomotionInputs {
            run_held: false,
            ..sprint
        };
        for _ in 0..4 {
            tick(&mut state, &mut stamina, &config, &released, 0.1);
        }
        assert_eq!(state.mode, LocomotionMode::Standing);

        tick(&mut state, &mut stamina, &config, &sprint, 0.1);
        assert!(state.can_sprint);
    }

    #[test]
    fn test_run_pressed_right_after_slide_ends_released_is_not_latched() {
        let config = LocomotionConfig {
            min_run_time_before_slide: 0.0,
            slide_duration: 0.2,
            ..default()
        };
        let mut state = LocomotionState::default();
        let mut stamina = Stamina {
            max: 100.0,
            current: 100.0,
            ..default()
        };

        let sprint = sprinting_inputs();
        tick(&mut state, &mut stamina, &config, &sprint, 0.1);
        let press = LocomotionInputs {
            crouch_pressed: true,
            ..sprint
        };
        tick(&mut state, &mut stamina, &config, &press, 0.1);
        assert_eq!(state.mode, LocomotionMode::Sliding);

        // Run released; slide ends on the second released tick
        let released = LocomotionInputs {
            run_held: false,
            ..sprint
        };
        tick(&mut state, &mut stamina, &config, &released, 0.1);
        assert_eq!(state.mode, LocomotionMode::Sliding);
        tick(&mut state, &mut stamina, &config, &released, 0.1);
        assert_eq!(state.mode, LocomotionMode::Standing);
        assert!(!state.sprint_blocked_until_run_released);

        // Run pressed on the very next tick
        for i in 0..5 {
            tick(&mut state, &mut stamina, &config, &sprint, 0.1);
            assert!(!state.sprint_blocked_until_run_released, "tick {}", i);
            assert!(state.can_sprint, "tick {}", i);
        }
    }

    #[test]
    fn test_slide_end_blocked_falls_back_to_crouch() {
        let config = LocomotionConfig::default();
        let mut state = LocomotionState {
            mode: LocomotionMode::Sliding,
            run_held: true,
            ..default()
        };
        let mut stamina = Stamina::default();

        let output = state.advance(
            config.slide_duration,
            &sprinting_inputs(),
            &mut stamina,
            &config,
            &blocked,
        );

        assert_eq!(state.mode, LocomotionMode::Crouching);
        assert!(output.stand_refused);
        assert!(state.sprint_blocked_until_run_released);
        assert_eq!(output.collision_height, config.crouch_height);
    }

    #[test]
    fn test_crouch_press_while_sliding_is_ignored() {
        let config = LocomotionConfig::default();
        let mut state = LocomotionState {
            mode: LocomotionMode::Sliding,
            ..default()
        };
        let mut stamina = Stamina::default();

        let press = LocomotionInputs {
            crouch_pressed: true,
            ..sprinting_inputs()
        };
        let output = tick(&mut state, &mut stamina, &config, &press, 0.1);

        assert_eq!(state.mode, LocomotionMode::Sliding);
        assert_eq!(output.impulse, None);
        assert_eq!(output.transition, None);
    }

    #[test]
    fn test_sliding_drains_slide_rate() {
        let config = LocomotionConfig::default();
        let mut state = LocomotionState {
            mode: LocomotionMode::Sliding,
            ..default()
        };
        let mut stamina = Stamina::default();

        tick(&mut state, &mut stamina, &config, &sprinting_inputs(), 0.5);
        assert!((stamina.current - (5.0 - 1.5 * 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_lean_blocks_sprint_and_run_press_cancels_lean() {
        let config = LocomotionConfig::default();
        let mut state = LocomotionState::default();
        let mut stamina = Stamina::default();

        let lean = LocomotionInputs {
            lean_axis: 1.0,
            velocity: Vec3::new(0.0, 0.0, -5.0),
            ..default()
        };
        for _ in 0..60 {
            tick(&mut state, &mut stamina, &config, &lean, 1.0 / 60.0);
        }
        assert!(state.lean_roll < -15.0);
        assert!(state.is_leaning());

        let run = LocomotionInputs {
            run_held: true,
            ..lean
        };
        tick(&mut state, &mut stamina, &config, &run, 1.0 / 60.0);
        assert_eq!(state.lean_roll, 0.0);
        assert!(state.can_sprint);
    }

    #[test]
    fn test_slow_walk_speed() {
        let config = LocomotionConfig::default();
        let mut state = LocomotionState::default();
        let mut stamina = Stamina::default();

        let inputs = LocomotionInputs {
            move_input: Vec2::new(1.0, 0.0),
            walk_held: true,
            ..default()
        };
        let output = tick(&mut state, &mut stamina, &config, &inputs, 1.0 / 60.0);
        let velocity = output.desired_velocity.unwrap_or_default();
        assert!((velocity.x - config.slow_walk_speed).abs() < 1e-5);
    }

    #[test]
    fn test_nan_input_is_sanitized() {
        let config = LocomotionConfig::default();
        let mut state = LocomotionState::default();
        let mut stamina = Stamina::default();

        let inputs = LocomotionInputs {
            move_input: Vec2::new(f32::NAN, f32::INFINITY),
            lean_axis: f32::NAN,
            ..default()
        };
        let output = tick(&mut state, &mut stamina, &config, &inputs, 1.0 / 60.0);

        assert!(state.move_input.is_finite());
        assert_eq!(state.lean_input, 0.0);
        assert!(output.desired_velocity.is_some_and(|v| v.is_finite()));
    }
}
