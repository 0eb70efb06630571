//! `turfbook` - nearby turf discovery and match registration relay
//!
//! This library provides the venue catalog and distance ranking used to
//! suggest turfs close to a player, validation for the registration forms
//! submitted from the site, and the email relay that forwards them.

pub mod api;
pub mod config;
pub mod email;
pub mod error;
pub mod logging;
pub mod models;
pub mod registration;
pub mod venues;
pub mod web;

// Re-export core types for public API
pub use config::TurfbookConfig;
pub use email::{Notification, Notifier};
pub use error::TurfbookError;
pub use models::{Position, Sport};
pub use venues::{CatalogSource, NearbyQuery, RankedVenue, VenueRecord, distance_km, rank};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TurfbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
