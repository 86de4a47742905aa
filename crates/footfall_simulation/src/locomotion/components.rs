//! Locomotion components: mode, tuning, per-character state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::probe::CLEARANCE_MASK;

/// Locomotion mode (mutually exclusive)
///
/// Sliding is its own mode, not a flag on top of Crouching; it uses
/// crouch-sized collision geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum LocomotionMode {
    #[default]
    Standing,
    Crouching,
    Sliding,
}

impl LocomotionMode {
    /// Crouch-sized collision geometry (Crouching and Sliding)
    pub fn is_low(&self) -> bool {
        matches!(self, LocomotionMode::Crouching | LocomotionMode::Sliding)
    }
}

/// Locomotion tuning
///
/// Speeds in m/s, heights in m, angles in degrees, rates in 1/s.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct LocomotionConfig {
    pub move_speed: f32,
    pub slow_walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,

    /// Horizontal speed above which the character counts as moving
    pub moving_threshold: f32,

    pub stand_height: f32,
    pub crouch_height: f32,
    pub capsule_radius: f32,
    /// Collision layers that block standing up
    pub obstacle_mask: u32,

    pub lean_angle: f32,
    pub lean_speed: f32,

    pub slide_force: f32,
    pub slide_duration: f32,
    pub min_run_time_before_slide: f32,
    /// Horizontal velocity decay while sliding (headless body only)
    pub slide_friction: f32,

    /// Downward impulse when dropping into a crouch on the ground
    pub crouch_stomp_force: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            slow_walk_speed: 2.0,
            sprint_speed: 10.0,
            crouch_speed: 2.0,
            moving_threshold: 0.1,
            stand_height: 2.0,
            crouch_height: 1.0,
            capsule_radius: 0.4,
            obstacle_mask: CLEARANCE_MASK,
            lean_angle: 20.0,
            lean_speed: 10.0,
            slide_force: 8.0,
            slide_duration: 1.0,
            min_run_time_before_slide: 0.5,
            slide_friction: 2.0,
            crouch_stomp_force: 5.0,
        }
    }
}

impl LocomotionConfig {
    /// Collision capsule height for a mode
    pub fn height_for(&self, mode: LocomotionMode) -> f32 {
        if mode.is_low() {
            self.crouch_height
        } else {
            self.stand_height
        }
    }
}

/// Lean roll below this (degrees) counts as neutral
pub const LEAN_ACTIVE_DEGREES: f32 = 1.0;

/// Per-character locomotion state (one per character, lives as long as it does)
///
/// `can_sprint` and `is_moving` are recomputed every tick and cached here only
/// for readers (camera/weapon feedback); they are never used as inputs to the
/// next tick's decision.
#[derive(Component, Debug, Clone, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct LocomotionState {
    pub mode: LocomotionMode,

    /// Last move input (each axis clamped to [-1, 1], length ≤ 1)
    pub move_input: Vec2,
    pub run_held: bool,
    pub walk_held: bool,
    /// Lean axis in [-1, 1]
    pub lean_input: f32,
    /// Current lean roll in degrees (smoothed toward the input target)
    pub lean_roll: f32,

    pub is_moving: bool,
    pub can_sprint: bool,

    /// Continuous sprint time; 0 the instant sprint stops
    pub run_duration: f32,
    /// Time since the current slide began
    pub slide_elapsed: f32,
    /// Set when a slide ends, cleared only by releasing run
    pub sprint_blocked_until_run_released: bool,
}

impl LocomotionState {
    pub fn is_leaning(&self) -> bool {
        self.lean_roll.abs() > LEAN_ACTIVE_DEGREES
    }

    /// Read-only snapshot handed to the feedback layers
    pub fn view(&self) -> LocomotionView {
        LocomotionView {
            mode: self.mode,
            is_moving: self.is_moving,
            can_sprint: self.can_sprint,
            lean_roll: self.lean_roll,
        }
    }
}

/// What camera/weapon feedback needs to know about locomotion
///
/// Passed explicitly to the feedback components each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocomotionView {
    pub mode: LocomotionMode,
    pub is_moving: bool,
    pub can_sprint: bool,
    pub lean_roll: f32,
}

/// Collision capsule the physics layer should use
///
/// Written with `set_if_neq`, so `Changed<CapsuleShape>` fires only on
/// stand/crouch transitions.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CapsuleShape {
    pub height: f32,
    pub radius: f32,
}

impl Default for CapsuleShape {
    fn default() -> Self {
        let config = LocomotionConfig::default();
        Self {
            height: config.stand_height,
            radius: config.capsule_radius,
        }
    }
}

/// Inputs for one fixed tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionInputs {
    pub move_input: Vec2,
    pub run_held: bool,
    pub walk_held: bool,
    pub lean_axis: f32,
    /// Edge: crouch pressed since the last tick
    pub crouch_pressed: bool,
    pub grounded: bool,
    /// Current physics velocity
    pub velocity: Vec3,
    /// Body basis (horizontal)
    pub right: Vec3,
    pub forward: Vec3,
    /// Bottom of the collision capsule
    pub feet_position: Vec3,
}

impl Default for LocomotionInputs {
    fn default() -> Self {
        Self {
            move_input: Vec2::ZERO,
            run_held: false,
            walk_held: false,
            lean_axis: 0.0,
            crouch_pressed: false,
            grounded: true,
            velocity: Vec3::ZERO,
            right: Vec3::X,
            forward: Vec3::NEG_Z,
            feet_position: Vec3::ZERO,
        }
    }
}

/// Mode change that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: LocomotionMode,
    pub to: LocomotionMode,
}

/// Result of one fixed tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocomotionOutput {
    /// Velocity for the physics layer to apply; `None` while sliding
    /// (the launch impulse and physics govern). Vertical component is the
    /// input velocity's, passed through.
    pub desired_velocity: Option<Vec3>,
    /// One-shot impulse (slide launch, crouch stomp)
    pub impulse: Option<Vec3>,
    pub collision_height: f32,
    pub transition: Option<ModeTransition>,
    /// A stand-up attempt was refused by the clearance test this tick
    pub stand_refused: bool,
    /// Stamina hit zero this tick
    pub stamina_depleted: bool,
}
