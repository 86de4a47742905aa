//! Stamina domain: sprint/slide budget
//!
//! Содержит:
//! - StaminaConfig (tuning: max, drain, recover, slide drain)
//! - Stamina (component: current level + integration)
//!
//! Integration is driven by the locomotion tick (it needs the resolved
//! `can_sprint` and mode of the same tick), so this domain has no systems.

pub mod components;

pub use components::*;
