//! Camera domain: first-person look, head bob, locomotion FOV
//!
//! Содержит:
//! - components (CameraConfig, CameraRig, CameraFrame, FieldOfView)
//! - systems (apply_mouse_look, update_camera_feedback, compose_field_of_view)
//!
//! Variable-step (Update): чисто визуальный слой, читает LocomotionState,
//! ничего в нём не меняет.

use bevy::prelude::*;

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::*;

/// Camera feedback Plugin
///
/// Регистрирует только типы; системы ставит `SimulationPlugin` в общую
/// Update-цепочку (look → camera → weapon → FOV → clear look delta).
pub struct CameraFeedbackPlugin;

impl Plugin for CameraFeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraConfig>()
            .register_type::<CameraRig>()
            .register_type::<FieldOfView>();
    }
}
