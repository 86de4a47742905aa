//! Weapon feedback components.
//!
//! Per frame:
//! 1. Aim blend: `aim_time` → 0/1 at `aiming_speed`, root pose between anchors,
//!    aim FOV smooth-damped toward zoom/default.
//! 2. Aiming: sway snaps to identity, bob offset decays.
//!    Hip: sway slerps toward clamped look delta, bob follows gait.
//! 3. Local pose = base position + bob, rotation = sway.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::locomotion::LocomotionView;
use crate::shared::{approach_exp_vec3, slerp_toward, smooth_damp};

/// Weapon feedback tuning
///
/// Angles in degrees, rates in 1/s, FOV in degrees.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct WeaponConfig {
    /// Max sway per axis (degrees)
    pub sway_clamp: f32,
    /// Look delta → sway degrees
    pub sway_multiplier: f32,
    /// Slerp rate toward the sway target
    pub smoothing: f32,

    pub walk_bob_speed: f32,
    pub walk_bob_amount: f32,
    pub sprint_bob_speed: f32,
    pub sprint_bob_amount: f32,
    /// Decay rate of the bob offset after stopping
    pub bob_return_rate: f32,

    /// Weapon mesh position inside the root
    pub base_local_position: Vec3,
    /// Root pose relative to the camera (hip)
    pub default_anchor: Transform,
    /// Root pose relative to the camera (aiming down sights)
    pub aiming_anchor: Transform,
    pub aiming_speed: f32,

    pub zoom_fov: f32,
    pub default_fov: f32,
    pub fov_smooth_time: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            sway_clamp: 0.09,
            sway_multiplier: 0.02,
            smoothing: 3.0,
            walk_bob_speed: 14.0,
            walk_bob_amount: 0.05,
            sprint_bob_speed: 18.0,
            sprint_bob_amount: 0.1,
            bob_return_rate: 8.0,
            base_local_position: Vec3::ZERO,
            default_anchor: Transform::from_xyz(0.25, -0.22, -0.45),
            aiming_anchor: Transform::from_xyz(0.0, -0.12, -0.3),
            aiming_speed: 5.0,
            zoom_fov: 40.0,
            default_fov: 60.0,
            fov_smooth_time: 0.1,
        }
    }
}

impl WeaponConfig {
    pub fn bob_for(&self, sprinting: bool) -> (f32, f32) {
        if sprinting {
            (self.sprint_bob_speed, self.sprint_bob_amount)
        } else {
            (self.walk_bob_speed, self.walk_bob_amount)
        }
    }

    /// Sway target rotation from one frame of look delta
    pub fn sway_target(&self, look_delta: Vec2) -> Quat {
        if !look_delta.is_finite() {
            return Quat::IDENTITY;
        }
        let limit = self.sway_clamp.abs();
        let yaw = (look_delta.x * self.sway_multiplier).clamp(-limit, limit);
        let pitch = (look_delta.y * self.sway_multiplier).clamp(-limit, limit);

        Quat::from_axis_angle(Vec3::X, (-pitch).to_radians()) * Quat::from_axis_angle(Vec3::Y, yaw.to_radians())
    }
}

/// Which reticle the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum Reticle {
    #[default]
    Crosshair,
    Scope,
}

/// Capability gate: is the carried weapon usable right now
///
/// Неактивное оружие: прицеливание принудительно выключено, стрельба запрещена.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct EquippedWeapon {
    pub active: bool,
}

impl Default for EquippedWeapon {
    fn default() -> Self {
        Self { active: true }
    }
}

/// What the render layer applies to the weapon this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponFrame {
    /// Weapon root relative to the camera (anchor blend)
    pub root: Transform,
    /// Weapon mesh relative to the root (bob + sway)
    pub local: Transform,
    pub reticle: Reticle,
    pub aim_time: f32,
    pub aim_fov: f32,
}

/// Weapon feedback state (one per armed character)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WeaponRig {
    pub aiming: bool,
    /// 0 = hip, 1 = fully aimed
    pub aim_time: f32,
    /// Aim FOV (smooth-damped); composed with the camera FOV by aim_time
    pub aim_fov: f32,
    pub fov_velocity: f32,
    pub sway: Quat,
    pub bob_timer: f32,
    pub bob_offset: Vec3,
    pub root: Transform,
}

impl Default for WeaponRig {
    fn default() -> Self {
        Self::new(&WeaponConfig::default())
    }
}

impl WeaponRig {
    pub fn new(config: &WeaponConfig) -> Self {
        Self {
            aiming: false,
            aim_time: 0.0,
            aim_fov: config.default_fov,
            fov_velocity: 0.0,
            sway: Quat::IDENTITY,
            bob_timer: 0.0,
            bob_offset: Vec3::ZERO,
            root: config.default_anchor,
        }
    }

    pub fn reticle(&self) -> Reticle {
        if self.aiming {
            Reticle::Scope
        } else {
            Reticle::Crosshair
        }
    }

    /// Advance one frame
    pub fn update(
        &mut self,
        dt: f32,
        look_delta: Vec2,
        view: &LocomotionView,
        aim_held: bool,
        equipped: bool,
        config: &WeaponConfig,
    ) -> WeaponFrame {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.update_aim(dt, aim_held && equipped, config);

        if self.aiming {
            self.sway = Quat::IDENTITY;
            self.settle_bob(dt, config);
        } else {
            self.sway = slerp_toward(self.sway, config.sway_target(look_delta), config.smoothing, dt);
            if view.is_moving {
                let (speed, amount) = config.bob_for(view.can_sprint);
                self.bob_timer += dt * speed;
                self.bob_offset = Vec3::Y * self.bob_timer.sin() * amount;
            } else {
                self.settle_bob(dt, config);
            }
        }

        self.frame(config)
    }

    pub fn frame(&self, config: &WeaponConfig) -> WeaponFrame {
        WeaponFrame {
            root: self.root,
            local: Transform {
                translation: config.base_local_position + self.bob_offset,
                rotation: self.sway,
                scale: Vec3::ONE,
            },
            reticle: self.reticle(),
            aim_time: self.aim_time,
            aim_fov: self.aim_fov,
        }
    }

    fn update_aim(&mut self, dt: f32, aiming: bool, config: &WeaponConfig) {
        self.aiming = aiming;

        let direction = if aiming { 1.0 } else { -1.0 };
        self.aim_time = (self.aim_time + dt * config.aiming_speed * direction).clamp(0.0, 1.0);

        let from = config.default_anchor;
        let to = config.aiming_anchor;
        self.root = Transform {
            translation: from.translation.lerp(to.translation, self.aim_time),
            rotation: from.rotation.slerp(to.rotation, self.aim_time),
            scale: from.scale.lerp(to.scale, self.aim_time),
        };

        let target_fov = if aiming { config.zoom_fov } else { config.default_fov };
        self.aim_fov = smooth_damp(self.aim_fov, target_fov, &mut self.fov_velocity, config.fov_smooth_time, dt);
    }

    fn settle_bob(&mut self, dt: f32, config: &WeaponConfig) {
        self.bob_timer = 0.0;
        self.bob_offset = approach_exp_vec3(self.bob_offset, Vec3::ZERO, config.bob_return_rate, dt);
    }
}
