//! Caller-supplied geographic position

use serde::{Deserialize, Serialize};

use crate::{Result, TurfbookError};

/// A point on the earth, typically the device location reported by the browser
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Position {
    /// Create a position without range checks
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a position, rejecting non-finite or out-of-range coordinates
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(TurfbookError::validation(
                "Location coordinates must be numbers",
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(TurfbookError::validation(format!(
                "Latitude {latitude} is out of range"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(TurfbookError::validation(format!(
                "Longitude {longitude} is out of range"
            )));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Great-circle distance to another position in kilometers
    #[must_use]
    pub fn distance_to(&self, other: &Position) -> f64 {
        crate::venues::distance_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    /// Format position as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
