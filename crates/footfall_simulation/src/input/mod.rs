//! Input domain: device-agnostic player input
//!
//! Содержит:
//! - PlayerInputEvent (что прислал адаптер устройства за кадр)
//! - PlayerInput (component: уровни + защёлкнутые нажатия до fixed tick)
//! - apply_player_input (PreUpdate), clear_look_delta (конец Update)
//!
//! Адаптер (Godot, winit, скрипт сценария) шлёт события; gameplay читает только
//! компонент.

pub mod components;
pub mod events;
pub mod systems;

pub use components::*;
pub use events::*;
pub use systems::*;
