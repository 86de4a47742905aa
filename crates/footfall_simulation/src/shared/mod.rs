//! Shared domain: cross-cutting helpers
//!
//! Содержит:
//! - smoothing (exponential approach, critically damped smooth_damp)

pub mod smoothing;

pub use smoothing::*;
