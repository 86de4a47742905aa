//! Stamina component and tuning.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Stamina tuning (units per second)
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaConfig {
    pub max: f32,
    /// Drain while sprinting
    pub drain_rate: f32,
    /// Recovery while neither sprinting nor sliding
    pub recover_rate: f32,
    /// Drain while sliding (replaces the sprint drain)
    pub slide_drain_rate: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            max: 5.0,
            drain_rate: 1.0,
            recover_rate: 0.5,
            slide_drain_rate: 1.5,
        }
    }
}

/// Выносливость (stamina) для sprint/slide
///
/// Инвариант: 0.0 ≤ current ≤ max (clamped every update)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    pub drain_rate: f32,
    pub recover_rate: f32,
    pub slide_drain_rate: f32,
}

impl Default for Stamina {
    fn default() -> Self {
        Self::from_config(&StaminaConfig::default())
    }
}

impl Stamina {
    /// Full stamina with the given tuning
    pub fn from_config(config: &StaminaConfig) -> Self {
        let max = config.max.max(0.0);
        Self {
            current: max,
            max,
            drain_rate: config.drain_rate,
            recover_rate: config.recover_rate,
            slide_drain_rate: config.slide_drain_rate,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Fraction of max in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    /// Integrate one tick.
    ///
    /// - sliding → `slide_drain_rate`
    /// - sprinting → `drain_rate`
    /// - otherwise → `recover_rate`
    ///
    /// Sliding and sprinting never coincide; sliding wins if a caller passes both.
    pub fn update(&mut self, delta_time: f32, can_sprint: bool, is_sliding: bool) -> f32 {
        let delta_time = delta_time.max(0.0);

        let rate = if is_sliding {
            -self.slide_drain_rate
        } else if can_sprint {
            -self.drain_rate
        } else {
            self.recover_rate
        };

        self.current = (self.current + rate * delta_time).clamp(0.0, self.max);
        self.current
    }
}
