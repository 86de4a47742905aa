//! Fire configuration and the automatic fire timer.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::probe::HITSCAN_MASK;

/// Weapon class
///
/// Только Rifle стреляет очередью при удержании спуска.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum WeaponClass {
    Pistol,
    #[default]
    Rifle,
}

impl WeaponClass {
    pub fn is_automatic(&self) -> bool {
        matches!(self, WeaponClass::Rifle)
    }
}

/// Hitscan fire tuning
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct FireConfig {
    pub class: WeaponClass,
    pub damage: u32,
    /// Max ray length (m)
    pub range: f32,
    /// Force applied along the camera forward on hit
    pub impact_force: f32,
    /// Per-axis random offset added to the aim direction (hip)
    pub bullet_spread: f32,
    /// Same while aiming down sights
    pub aiming_bullet_spread: f32,
    /// Seconds between automatic shots
    pub fire_rate: f32,
    /// Muzzle relative to the camera (camera space, -Z forward)
    pub muzzle_offset: Vec3,
    pub hit_mask: u32,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self::preset(WeaponClass::Rifle)
    }
}

impl FireConfig {
    /// Class presets
    pub fn preset(class: WeaponClass) -> Self {
        match class {
            WeaponClass::Rifle => Self {
                class,
                damage: 12,
                range: 100.0,
                impact_force: 30.0,
                bullet_spread: 0.07,
                aiming_bullet_spread: 0.02,
                fire_rate: 0.1,
                muzzle_offset: Vec3::new(0.25, -0.15, -0.9),
                hit_mask: HITSCAN_MASK,
            },
            WeaponClass::Pistol => Self {
                class,
                damage: 20,
                range: 50.0,
                impact_force: 15.0,
                bullet_spread: 0.04,
                aiming_bullet_spread: 0.01,
                fire_rate: 0.25,
                muzzle_offset: Vec3::new(0.2, -0.15, -0.6),
                hit_mask: HITSCAN_MASK,
            },
        }
    }

    pub fn spread(&self, aiming: bool) -> f32 {
        if aiming {
            self.aiming_bullet_spread
        } else {
            self.bullet_spread
        }
    }
}

/// Counter slack for float accumulation of fixed ticks
const FIRE_EPSILON: f32 = 1e-5;

/// Cancellable repeating fire timer
///
/// Каждый запуск очереди получает новый run-token. Отмена (отпускание спуска)
/// проверяется перед каждым повтором, так что после отмены не выходит ни
/// одного выстрела; выстрелы с устаревшим токеном отбрасываются.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct AutoFireTimer {
    /// Token of the running burst (None = idle)
    pub run: Option<u64>,
    /// Time left until the next repeat
    pub countdown: f32,
    last_token: u64,
}

impl AutoFireTimer {
    pub fn is_active(&self) -> bool {
        self.run.is_some()
    }

    /// Start a new burst, returns its token
    pub fn start(&mut self, interval: f32) -> u64 {
        self.last_token += 1;
        self.run = Some(self.last_token);
        self.countdown = interval;
        self.last_token
    }

    pub fn cancel(&mut self) {
        self.run = None;
        self.countdown = 0.0;
    }

    /// Advance by `dt`; returns how many shots fire this tick
    ///
    /// - press while idle → 1 shot immediately, even if the trigger is
    ///   already up (tap shorter than a tick); repeats start only while held
    /// - trigger up → cancel, no repeats
    /// - held while running → one shot per elapsed `interval`
    pub fn advance(&mut self, dt: f32, held: bool, pressed: bool, interval: f32) -> u32 {
        if !held {
            let tap = pressed && !self.is_active();
            self.cancel();
            return u32::from(tap);
        }

        if !self.is_active() {
            if pressed {
                self.start(interval);
                return 1;
            }
            return 0;
        }

        // Нулевой интервал → без повторов
        if interval <= 0.0 {
            return 0;
        }

        self.countdown -= dt.max(0.0);
        let mut shots = 0;
        while self.is_active() && self.countdown <= FIRE_EPSILON {
            shots += 1;
            self.countdown += interval;
        }
        shots
    }

    /// Does a shot stamped with `token` still belong to the running burst?
    pub fn accepts(&self, token: Option<u64>) -> bool {
        match token {
            Some(token) => self.run == Some(token),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rifle_is_automatic() {
        assert!(WeaponClass::Rifle.is_automatic());
        assert!(!WeaponClass::Pistol.is_automatic());
        assert_eq!(FireConfig::default().class, WeaponClass::Rifle);
    }

    #[test]
    fn test_auto_fire_four_shots_in_035s() {
        let mut timer = AutoFireTimer::default();
        let interval = 0.1;
        let dt = 0.05;

        let mut shots = timer.advance(0.0, true, true, interval);
        assert_eq!(shots, 1);

        // 7 × 0.05 = 0.35s удержания
        for _ in 0..7 {
            shots += timer.advance(dt, true, false, interval);
        }
        assert_eq!(shots, 4);

        // Отпускание: ни одного выстрела после
        assert_eq!(timer.advance(dt, false, false, interval), 0);
        assert!(!timer.is_active());
        for _ in 0..10 {
            assert_eq!(timer.advance(dt, false, false, interval), 0);
        }
    }

    #[test]
    fn test_auto_fire_at_fixed_rate_60hz() {
        let mut timer = AutoFireTimer::default();
        let dt = 1.0 / 60.0;

        let mut shots = timer.advance(dt, true, true, 0.1);
        // 21 тик × 1/60 = 0.35s
        for _ in 0..21 {
            shots += timer.advance(dt, true, false, 0.1);
        }
        assert_eq!(shots, 4);
    }

    #[test]
    fn test_new_burst_gets_new_token() {
        let mut timer = AutoFireTimer::default();

        timer.advance(0.0, true, true, 0.1);
        let first = timer.run;
        assert!(timer.accepts(first));

        timer.advance(0.0, false, false, 0.1);
        assert!(!timer.accepts(first));

        timer.advance(0.0, true, true, 0.1);
        assert_ne!(timer.run, first);
        assert!(!timer.accepts(first));
        assert!(timer.accepts(None));
    }

    #[test]
    fn test_tap_released_within_tick_fires_once() {
        let mut timer = AutoFireTimer::default();
        let dt = 1.0 / 60.0;

        assert_eq!(timer.advance(dt, false, true, 0.1), 1);
        assert!(!timer.is_active());
        for _ in 0..30 {
            assert_eq!(timer.advance(dt, false, false, 0.1), 0);
        }
    }

    #[test]
    fn test_held_without_press_does_not_start() {
        let mut timer = AutoFireTimer::default();
        assert_eq!(timer.advance(1.0, true, false, 0.1), 0);
        assert!(!timer.is_active());
    }
}
