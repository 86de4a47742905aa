//! Frame-rate independent smoothing helpers.
//!
//! Two families are used by the feedback layers:
//! - **Exponential approach** (`approach_exp`): first-order lag with a rate
//!   constant in 1/s. After `5 / rate` seconds the remaining error is
//!   `e^-5 ≈ 0.67%` of the initial one regardless of tick size.
//! - **Critically damped spring** (`smooth_damp`): carries a velocity between
//!   calls, used for the aim zoom FOV.

use bevy::prelude::*;

/// Blend factor for one tick of exponential approach (`1 - e^(-rate·dt)`).
///
/// Always in [0, 1]; zero for non-positive `dt` or `rate`.
pub fn exp_factor(rate: f32, dt: f32) -> f32 {
    if dt <= 0.0 || rate <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate * dt).exp()
}

/// Move `current` toward `target` by one tick of exponential approach.
pub fn approach_exp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * exp_factor(rate, dt)
}

/// Vec3 variant of [`approach_exp`].
pub fn approach_exp_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current.lerp(target, exp_factor(rate, dt))
}

/// Spherical step toward `target` with the factor `rate·dt` clamped to [0, 1].
pub fn slerp_toward(current: Quat, target: Quat, rate: f32, dt: f32) -> Quat {
    let t = (rate * dt).clamp(0.0, 1.0);
    current.slerp(target, t).normalize()
}

/// Critically damped spring toward `target` (no overshoot).
///
/// `velocity` is owned by the caller and must persist between calls.
/// `smooth_time` is roughly the time to reach the target.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Overshoot guard: snap to target and derive the matching velocity
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    output
}
