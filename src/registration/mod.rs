//! Registration requests submitted from the site
//!
//! One request type per flow. Each `validate` returns the trimmed, normalised
//! request or a validation error whose message is shown to the user as is.

pub mod booking;
pub mod match_form;
pub mod turf;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TurfbookError;

pub use booking::{Booking, BookingEntry, IndividualBooking, TeamBooking};
pub use match_form::{MatchRegistration, RegisterType};
pub use turf::TurfRegistration;

/// Players per team, captain included
pub const TEAM_SIZE: usize = 11;

/// Cricket player roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerType {
    Batsman,
    Bowler,
    Allrounder,
    #[serde(rename = "Batsman-Keeper")]
    BatsmanKeeper,
}

impl PlayerType {
    pub const ALL: [PlayerType; 4] = [
        PlayerType::Batsman,
        PlayerType::Bowler,
        PlayerType::Allrounder,
        PlayerType::BatsmanKeeper,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PlayerType::Batsman => "Batsman",
            PlayerType::Bowler => "Bowler",
            PlayerType::Allrounder => "Allrounder",
            PlayerType::BatsmanKeeper => "Batsman-Keeper",
        }
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayerType {
    type Err = TurfbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PlayerType::ALL
            .into_iter()
            .find(|player_type| player_type.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TurfbookError::validation(format!("Unknown player type: {wanted}")))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}
