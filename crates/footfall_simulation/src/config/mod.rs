//! Config domain: tuning profiles
//!
//! Содержит:
//! - error (ConfigError)
//! - profile (TuningProfile: все config-компоненты + JSON загрузка + валидация)

pub mod error;
pub mod profile;

pub use error::*;
pub use profile::*;
