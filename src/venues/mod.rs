//! Venue module
//!
//! Turf catalog loading and nearby-venue ranking:
//! - Parsing the flat `turfs.csv` catalog
//! - Great-circle distance between coordinates
//! - Filtering by activity and ordering by distance
//! - Acquiring the catalog text from disk or over HTTP

pub mod catalog;
pub mod distance;
pub mod ranker;
pub mod source;

pub use catalog::{VenueRecord, parse_catalog};
pub use distance::distance_km;
pub use ranker::{NearbyQuery, RankedVenue, rank, rank_records};
pub use source::CatalogSource;
