//! Player domain: controlled character marker + spawn helper

pub mod spawn;

pub use spawn::*;
