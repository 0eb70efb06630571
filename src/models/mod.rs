//! Data models shared across turfbook
//!
//! - Position: caller-supplied geographic coordinates
//! - Sport: the fixed sport vocabulary and its registration status

pub mod position;
pub mod sport;

pub use position::Position;
pub use sport::{Sport, SportStatus};
