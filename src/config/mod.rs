//! Configuration module for Quire
//!
//! Editor preferences (formatting, history capacity, highlighting) and the
//! key/value stores that persist them between sessions.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
