//! Venue catalog parsing
//!
//! The catalog is a flat text resource: one header line followed by one venue
//! per line, `name,supported_activities,latitude,longitude`. Fields carry no
//! escaping, so a line is split on every comma.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Position;

/// A venue (turf) as listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueRecord {
    pub name: String,
    /// Free text naming the activities offered, e.g. `Cricket;Football`
    pub supported_activities: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl VenueRecord {
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }

    /// Case-insensitive substring match against the supported activities
    #[must_use]
    pub fn offers(&self, activity: &str) -> bool {
        self.supported_activities
            .to_lowercase()
            .contains(&activity.to_lowercase())
    }
}

/// Parse raw catalog text into venue records.
///
/// Never fails: rows with fewer than four fields, an empty name, or a
/// coordinate that is not a finite number are skipped.
#[must_use]
pub fn parse_catalog(text: &str) -> Vec<VenueRecord> {
    let records: Vec<VenueRecord> = text
        .split('\n')
        .enumerate()
        .skip(1)
        .filter_map(|(line_no, line)| {
            let record = parse_row(line);
            if record.is_none() && !line.trim().is_empty() {
                debug!(line = line_no + 1, "Skipping malformed catalog row");
            }
            record
        })
        .collect();

    debug!("Parsed {} venues from catalog", records.len());
    records
}

fn parse_row(line: &str) -> Option<VenueRecord> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 4 {
        return None;
    }

    let name = fields[0].trim();
    if name.is_empty() {
        return None;
    }

    let latitude = parse_coordinate(fields[2])?;
    let longitude = parse_coordinate(fields[3])?;

    Some(VenueRecord {
        name: name.to_string(),
        supported_activities: fields[1].trim().to_string(),
        latitude,
        longitude,
    })
}

fn parse_coordinate(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
