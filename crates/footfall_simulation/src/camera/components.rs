//! Camera components: tuning, rig state, composed FOV.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::locomotion::{LocomotionMode, LocomotionView};
use crate::shared::approach_exp;

/// Camera tuning
///
/// Heights in m (above the feet), angles in degrees, rates in 1/s.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct CameraConfig {
    pub normal_fov: f32,
    pub sprint_fov: f32,
    /// Exponential rate of the locomotion FOV
    pub fov_rate: f32,
    /// Exponential rate of the return to base height when standing still
    pub height_rate: f32,

    pub walk_bob_speed: f32,
    pub walk_bob_amount: f32,
    pub sprint_bob_speed: f32,
    pub sprint_bob_amount: f32,

    pub stand_cam_y: f32,
    pub crouch_cam_y: f32,

    /// Degrees per look-delta count. Not scaled by frame time.
    pub sensitivity: f32,
    /// Pitch limit (±degrees)
    pub x_clamp: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            normal_fov: 60.0,
            sprint_fov: 80.0,
            fov_rate: 6.0,
            height_rate: 8.0,
            walk_bob_speed: 14.0,
            walk_bob_amount: 0.05,
            sprint_bob_speed: 18.0,
            sprint_bob_amount: 0.1,
            stand_cam_y: 1.6,
            crouch_cam_y: 0.8,
            sensitivity: 0.1,
            x_clamp: 50.0,
        }
    }
}

impl CameraConfig {
    /// Eye height for a mode (crouch eye height while sliding too)
    pub fn base_height(&self, mode: LocomotionMode) -> f32 {
        if mode.is_low() {
            self.crouch_cam_y
        } else {
            self.stand_cam_y
        }
    }

    /// (speed, amount) of the bob for the current gait
    pub fn bob_for(&self, sprinting: bool) -> (f32, f32) {
        if sprinting {
            (self.sprint_bob_speed, self.sprint_bob_amount)
        } else {
            (self.walk_bob_speed, self.walk_bob_amount)
        }
    }

    pub fn fov_target(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.sprint_fov
        } else {
            self.normal_fov
        }
    }
}

/// What the render layer applies to the camera this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraFrame {
    /// Local height above the feet
    pub height: f32,
    /// Locomotion FOV (before the aim zoom is composed in)
    pub fov: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// Lean roll (degrees)
    pub roll: f32,
}

/// Camera rig state (one per controlled character)
///
/// Yaw крутит всё тело, pitch и roll только камеру.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    pub bob_timer: f32,
    pub height: f32,
    pub fov: f32,
    /// Degrees, positive = turn left (counter-clockwise seen from above)
    pub yaw: f32,
    /// Degrees, positive = look up
    pub pitch: f32,
    pub roll: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl CameraRig {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            bob_timer: 0.0,
            height: config.stand_cam_y,
            fov: config.normal_fov,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    /// Apply one frame of look input
    ///
    /// Mouse right (+x) turns right, mouse up (+y) looks up.
    /// Non-finite deltas are ignored.
    pub fn apply_look(&mut self, look_delta: Vec2, config: &CameraConfig) {
        if !look_delta.is_finite() {
            return;
        }

        self.yaw -= look_delta.x * config.sensitivity;
        self.yaw = self.yaw.rem_euclid(360.0);

        let limit = config.x_clamp.abs();
        self.pitch = (self.pitch + look_delta.y * config.sensitivity).clamp(-limit, limit);
    }

    /// Advance bob/height/FOV smoothing by `dt`
    pub fn update(&mut self, dt: f32, view: &LocomotionView, config: &CameraConfig) -> CameraFrame {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let base = config.base_height(view.mode);

        if view.is_moving {
            let (speed, amount) = config.bob_for(view.can_sprint);
            self.bob_timer += dt * speed;
            self.height = base + self.bob_timer.sin() * amount;
        } else {
            self.bob_timer = 0.0;
            self.height = approach_exp(self.height, base, config.height_rate, dt);
        }

        self.fov = approach_exp(self.fov, config.fov_target(view.can_sprint), config.fov_rate, dt);
        self.roll = view.lean_roll;

        self.frame()
    }

    pub fn frame(&self) -> CameraFrame {
        CameraFrame {
            height: self.height,
            fov: self.fov,
            yaw: self.yaw,
            pitch: self.pitch,
            roll: self.roll,
        }
    }

    /// Body rotation (yaw only)
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Camera rotation relative to the body (pitch, then lean roll)
    pub fn local_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch.to_radians()) * Quat::from_rotation_z(self.roll.to_radians())
    }

    /// World-space camera rotation
    pub fn view_rotation(&self) -> Quat {
        self.body_rotation() * self.local_rotation()
    }
}

/// Final field of view handed to the renderer
///
/// Composed from the locomotion FOV and the aim zoom, see
/// [`compose_fov`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FieldOfView {
    pub degrees: f32,
}

impl Default for FieldOfView {
    fn default() -> Self {
        Self {
            degrees: CameraConfig::default().normal_fov,
        }
    }
}

/// Single FOV owner: blend locomotion FOV into the aim FOV by `aim_time`
///
/// aim_time 0 → locomotion FOV (sprint widening), 1 → aim zoom.
pub fn compose_fov(locomotion_fov: f32, aim_fov: f32, aim_time: f32) -> f32 {
    let t = if aim_time.is_finite() { aim_time.clamp(0.0, 1.0) } else { 0.0 };
    locomotion_fov + (aim_fov - locomotion_fov) * t
}
