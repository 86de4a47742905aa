//! Tuning profile: every config component in one serde document.
//!
//! Missing fields fall back to defaults (`#[serde(default)]` on each config),
//! so a profile file only lists what it overrides:
//!
//! ```json
//! { "locomotion": { "sprint_speed": 12.0 }, "fire": { "class": "Pistol" } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::camera::CameraConfig;
use crate::locomotion::LocomotionConfig;
use crate::logger;
use crate::shooting::FireConfig;
use crate::stamina::StaminaConfig;
use crate::weapon::WeaponConfig;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningProfile {
    pub locomotion: LocomotionConfig,
    pub stamina: StaminaConfig,
    pub camera: CameraConfig,
    pub weapon: WeaponConfig,
    pub fire: FireConfig,
}

impl TuningProfile {
    /// Parse and validate a JSON profile
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let profile: TuningProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Read, parse and validate a JSON profile file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let profile = Self::from_json_str(&json).inspect_err(|err| {
            logger::log_error(&format!("Tuning profile {}: {}", path.display(), err));
        })?;

        logger::log_info(&format!("Loaded tuning profile {}", path.display()));
        Ok(profile)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the state machine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let loco = &self.locomotion;
        for (field, value) in [
            ("locomotion.move_speed", loco.move_speed),
            ("locomotion.slow_walk_speed", loco.slow_walk_speed),
            ("locomotion.sprint_speed", loco.sprint_speed),
            ("locomotion.crouch_speed", loco.crouch_speed),
            ("locomotion.crouch_height", loco.crouch_height),
            ("locomotion.capsule_radius", loco.capsule_radius),
            ("locomotion.lean_speed", loco.lean_speed),
            ("locomotion.slide_duration", loco.slide_duration),
            ("stamina.max", self.stamina.max),
            ("camera.fov_rate", self.camera.fov_rate),
            ("camera.height_rate", self.camera.height_rate),
            ("weapon.aiming_speed", self.weapon.aiming_speed),
            ("weapon.fov_smooth_time", self.weapon.fov_smooth_time),
            ("fire.fire_rate", self.fire.fire_rate),
            ("fire.range", self.fire.range),
        ] {
            positive(field, value)?;
        }

        for (field, value) in [
            ("locomotion.moving_threshold", loco.moving_threshold),
            ("locomotion.lean_angle", loco.lean_angle),
            ("locomotion.slide_force", loco.slide_force),
            ("locomotion.min_run_time_before_slide", loco.min_run_time_before_slide),
            ("locomotion.slide_friction", loco.slide_friction),
            ("locomotion.crouch_stomp_force", loco.crouch_stomp_force),
            ("stamina.drain_rate", self.stamina.drain_rate),
            ("stamina.recover_rate", self.stamina.recover_rate),
            ("stamina.slide_drain_rate", self.stamina.slide_drain_rate),
            ("camera.x_clamp", self.camera.x_clamp),
            ("weapon.sway_clamp", self.weapon.sway_clamp),
            ("weapon.smoothing", self.weapon.smoothing),
            ("weapon.bob_return_rate", self.weapon.bob_return_rate),
            ("fire.bullet_spread", self.fire.bullet_spread),
            ("fire.aiming_bullet_spread", self.fire.aiming_bullet_spread),
            ("fire.impact_force", self.fire.impact_force),
        ] {
            non_negative(field, value)?;
        }

        if loco.crouch_height >= loco.stand_height {
            return Err(ConfigError::invalid(
                "locomotion.crouch_height",
                format!("must be below stand_height ({})", loco.stand_height),
            ));
        }
        if loco.capsule_radius * 2.0 > loco.crouch_height {
            return Err(ConfigError::invalid(
                "locomotion.capsule_radius",
                format!("capsule diameter exceeds crouch_height ({})", loco.crouch_height),
            ));
        }

        for (field, value) in [
            ("camera.normal_fov", self.camera.normal_fov),
            ("camera.sprint_fov", self.camera.sprint_fov),
            ("weapon.zoom_fov", self.weapon.zoom_fov),
            ("weapon.default_fov", self.weapon.default_fov),
        ] {
            if !(value > 0.0 && value < 180.0) {
                return Err(ConfigError::invalid(field, format!("{} is outside (0, 180)", value)));
            }
        }

        if self.camera.x_clamp > 90.0 {
            return Err(ConfigError::invalid("camera.x_clamp", "must be at most 90 degrees"));
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} must be positive", value)))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} must be non-negative", value)))
    }
}
