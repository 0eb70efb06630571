//! Nearby venue ranking
//!
//! Ranking filters the catalog down to venues offering the requested
//! activity and orders them by distance from the caller, nearest first.
//! It is a pure function of (catalog snapshot, activity, position): the same
//! inputs always produce the same ordered result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::{VenueRecord, parse_catalog};
use crate::models::Position;

/// A catalog venue together with its distance from the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedVenue {
    pub name: String,
    pub supported_activities: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}

impl RankedVenue {
    fn from_record(record: VenueRecord, distance_km: f64) -> Self {
        Self {
            name: record.name,
            supported_activities: record.supported_activities,
            latitude: record.latitude,
            longitude: record.longitude,
            distance_km,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }

    /// Distance rounded to two decimals, e.g. `0.97 km`
    #[must_use]
    pub fn distance_label(&self) -> String {
        format!("{:.2} km", self.distance_km)
    }
}

/// A ranking request owned by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyQuery {
    pub activity: String,
    pub position: Position,
}

impl NearbyQuery {
    #[must_use]
    pub fn new(activity: impl Into<String>, position: Position) -> Self {
        Self {
            activity: activity.into(),
            position,
        }
    }

    #[must_use]
    pub fn rank(&self, catalog_text: &str) -> Vec<RankedVenue> {
        rank(catalog_text, &self.activity, self.position)
    }
}

/// Parse `catalog_text` and rank the venues offering `activity` by distance
/// from `position`.
#[must_use]
pub fn rank(catalog_text: &str, activity: &str, position: Position) -> Vec<RankedVenue> {
    rank_records(parse_catalog(catalog_text), activity, position)
}

/// Rank already parsed records. Ties keep catalog order.
#[must_use]
pub fn rank_records(
    records: Vec<VenueRecord>,
    activity: &str,
    position: Position,
) -> Vec<RankedVenue> {
    let total = records.len();
    let mut ranked: Vec<RankedVenue> = records
        .into_iter()
        .filter(|record| record.offers(activity))
        .map(|record| {
            let distance = position.distance_to(&record.position());
            RankedVenue::from_record(record, distance)
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    debug!(
        activity,
        position = %position.format_coordinates(),
        "{} of {} venues offer the activity",
        ranked.len(),
        total
    );
    ranked
}
