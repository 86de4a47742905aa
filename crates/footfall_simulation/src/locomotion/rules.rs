//! State transition rules: pure decision functions.
//!
//! No side effects here; `LocomotionState::advance` sequences them.

use bevy::prelude::*;

use super::components::{LocomotionConfig, LocomotionMode, LocomotionState};
use crate::probe::ClearanceQuery;
use crate::stamina::Stamina;

/// Gap kept between the floor and the clearance capsule so the floor the
/// character stands on never counts as an obstruction
pub const CLEARANCE_SKIN: f32 = 0.05;

/// Clamp raw move input: NaN → 0, each axis to [-1, 1], length ≤ 1
pub fn sanitize_move_input(raw: Vec2) -> Vec2 {
    let x = if raw.x.is_finite() { raw.x.clamp(-1.0, 1.0) } else { 0.0 };
    let y = if raw.y.is_finite() { raw.y.clamp(-1.0, 1.0) } else { 0.0 };
    Vec2::new(x, y).clamp_length_max(1.0)
}

/// Clamp a scalar axis: NaN → 0, then [-1, 1]
pub fn sanitize_axis(raw: f32) -> f32 {
    if raw.is_finite() {
        raw.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Horizontal speed above the moving threshold?
pub fn is_moving(velocity: Vec3, config: &LocomotionConfig) -> bool {
    Vec3::new(velocity.x, 0.0, velocity.z).length() > config.moving_threshold
}

/// Sprint eligibility
///
/// run held ∧ moving ∧ Standing (not Crouching, not Sliding) ∧ stamina > 0
/// ∧ not latched after a slide ∧ not leaning
pub fn can_sprint(state: &LocomotionState, stamina: &Stamina) -> bool {
    state.run_held
        && state.is_moving
        && state.mode == LocomotionMode::Standing
        && stamina.current > 0.0
        && !state.sprint_blocked_until_run_released
        && !state.is_leaning()
}

/// Can a crouch press start a slide right now?
///
/// Requires an active sprint that has lasted at least
/// `min_run_time_before_slide`, ground contact, and not already sliding.
/// A slide can never start from a standstill (sprint requires moving).
pub fn can_start_slide(
    state: &LocomotionState,
    sprinting: bool,
    grounded: bool,
    config: &LocomotionConfig,
) -> bool {
    sprinting
        && grounded
        && state.mode != LocomotionMode::Sliding
        && state.run_duration >= config.min_run_time_before_slide
}

/// Target horizontal speed by priority
///
/// Sliding → `None` (no override), Crouching → crouch speed,
/// sprinting → sprint speed, slow-walk held → slow walk, else move speed.
pub fn target_speed(
    mode: LocomotionMode,
    sprinting: bool,
    walk_held: bool,
    config: &LocomotionConfig,
) -> Option<f32> {
    match mode {
        LocomotionMode::Sliding => None,
        LocomotionMode::Crouching => Some(config.crouch_speed),
        LocomotionMode::Standing if sprinting => Some(config.sprint_speed),
        LocomotionMode::Standing if walk_held => Some(config.slow_walk_speed),
        LocomotionMode::Standing => Some(config.move_speed),
    }
}

/// Desired velocity from body basis and move input
///
/// Input length (≤ 1) scales the speed, so half-tilted sticks walk slower.
/// Vertical velocity is passed through unchanged.
pub fn desired_velocity(move_input: Vec2, right: Vec3, forward: Vec3, speed: f32, vertical: f32) -> Vec3 {
    let right = Vec3::new(right.x, 0.0, right.z).normalize_or_zero();
    let forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();

    let direction = right * move_input.x + forward * move_input.y;
    let horizontal = direction.clamp_length_max(1.0) * speed;

    Vec3::new(horizontal.x, vertical, horizontal.z)
}

/// Slide launch impulse: along the current horizontal velocity
pub fn slide_impulse(velocity: Vec3, forward: Vec3, config: &LocomotionConfig) -> Vec3 {
    let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
    let fallback = Vec3::new(forward.x, 0.0, forward.z);
    let direction = horizontal.try_normalize().unwrap_or_else(|| fallback.normalize_or_zero());
    direction * config.slide_force
}

/// Capsule end points (sphere centers) for a standing character at `feet`
pub fn standing_capsule(feet: Vec3, config: &LocomotionConfig) -> (Vec3, Vec3) {
    let radius = config.capsule_radius;
    let bottom = feet + Vec3::Y * (radius + CLEARANCE_SKIN);
    let top = feet + Vec3::Y * (config.stand_height - radius).max(radius + CLEARANCE_SKIN);
    (bottom, top)
}

/// Clearance test for standing up at `feet`
pub fn can_stand_up(feet: Vec3, config: &LocomotionConfig, clearance: &dyn ClearanceQuery) -> bool {
    let (bottom, top) = standing_capsule(feet, config);
    clearance.is_capsule_clear(bottom, top, config.capsule_radius, config.obstacle_mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving_runner() -> (LocomotionState, Stamina) {
        let state = LocomotionState {
            run_held: true,
            is_moving: true,
            ..default()
        };
        (state, Stamina::default())
    }

    #[test]
    fn test_sanitize_move_input() {
        assert_eq!(sanitize_move_input(Vec2::new(3.0, 0.0)), Vec2::new(1.0, 0.0));
        assert_eq!(sanitize_move_input(Vec2::new(f32::NAN, 0.5)), Vec2::new(0.0, 0.5));
        let diagonal = sanitize_move_input(Vec2::new(1.0, 1.0));
        assert!((diagonal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_can_sprint_when_all_conditions_hold() {
        let (state, stamina) = moving_runner();
        assert!(can_sprint(&state, &stamina));
    }

    #[test]
    fn test_can_sprint_blockers() {
        let (state, stamina) = moving_runner();

        let mut crouched = state.clone();
        crouched.mode = LocomotionMode::Crouching;
        assert!(!can_sprint(&crouched, &stamina));

        let mut sliding = state.clone();
        sliding.mode = LocomotionMode::Sliding;
        assert!(!can_sprint(&sliding, &stamina));

        let mut latched = state.clone();
        latched.sprint_blocked_until_run_released = true;
        assert!(!can_sprint(&latched, &stamina));

        let mut leaning = state.clone();
        leaning.lean_roll = 12.0;
        assert!(!can_sprint(&leaning, &stamina));

        let mut still = state.clone();
        still.is_moving = false;
        assert!(!can_sprint(&still, &stamina));

        let empty = Stamina { current: 0.0, ..stamina };
        assert!(!can_sprint(&state, &empty));
    }

    #[test]
    fn test_target_speed_priority() {
        let config = LocomotionConfig::default();
        assert_eq!(target_speed(LocomotionMode::Sliding, true, true, &config), None);
        assert_eq!(target_speed(LocomotionMode::Crouching, true, false, &config), Some(2.0));
        assert_eq!(target_speed(LocomotionMode::Standing, true, true, &config), Some(10.0));
        assert_eq!(target_speed(LocomotionMode::Standing, false, true, &config), Some(2.0));
        assert_eq!(target_speed(LocomotionMode::Standing, false, false, &config), Some(5.0));
    }

    #[test]
    fn test_desired_velocity_keeps_vertical() {
        let velocity = desired_velocity(Vec2::new(0.0, 1.0), Vec3::X, Vec3::NEG_Z, 5.0, -3.0);
        assert!((velocity.z + 5.0).abs() < 1e-5);
        assert_eq!(velocity.y, -3.0);
        assert!(velocity.x.abs() < 1e-5);
    }

    #[test]
    fn test_desired_velocity_scales_with_input_magnitude() {
        let velocity = desired_velocity(Vec2::new(0.5, 0.0), Vec3::X, Vec3::NEG_Z, 4.0, 0.0);
        assert!((velocity.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_slide_requires_min_run_time() {
        let config = LocomotionConfig {
            min_run_time_before_slide: 1.5,
            ..default()
        };
        let mut state = LocomotionState::default();

        state.run_duration = 1.0;
        assert!(!can_start_slide(&state, true, true, &config));

        state.run_duration = 2.0;
        assert!(can_start_slide(&state, true, true, &config));
        assert!(!can_start_slide(&state, false, true, &config));
        assert!(!can_start_slide(&state, true, false, &config));
    }

    #[test]
    fn test_slide_impulse_follows_velocity() {
        let config = LocomotionConfig::default();
        let impulse = slide_impulse(Vec3::new(3.0, -1.0, 4.0), Vec3::NEG_Z, &config);
        assert!((impulse - Vec3::new(0.6, 0.0, 0.8) * config.slide_force).length() < 1e-4);
    }

    #[test]
    fn test_can_stand_up_delegates_to_query() {
        let config = LocomotionConfig::default();
        let open = |_: Vec3, _: Vec3, _: f32, _: u32| true;
        let blocked = |_: Vec3, _: Vec3, _: f32, _: u32| false;

        assert!(can_stand_up(Vec3::ZERO, &config, &open));
        assert!(!can_stand_up(Vec3::ZERO, &config, &blocked));
    }
}
