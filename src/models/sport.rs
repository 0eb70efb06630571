//! Sport vocabulary offered on the site

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::TurfbookError;

/// Sports listed on the site, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sport {
    Cricket,
    Football,
    Badminton,
    Volleyball,
    Basketball,
    Hockey,
    TableTennis,
    Chess,
    Carom,
    Swimming,
    Tennis,
    Pickleball,
}

/// Whether registrations for a sport are open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SportStatus {
    Active,
    Upcoming,
}

impl Sport {
    pub const ALL: [Sport; 12] = [
        Sport::Cricket,
        Sport::Football,
        Sport::Badminton,
        Sport::Volleyball,
        Sport::Basketball,
        Sport::Hockey,
        Sport::TableTennis,
        Sport::Chess,
        Sport::Carom,
        Sport::Swimming,
        Sport::Tennis,
        Sport::Pickleball,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Sport::Cricket => "Cricket",
            Sport::Football => "Football",
            Sport::Badminton => "Badminton",
            Sport::Volleyball => "Volleyball",
            Sport::Basketball => "Basketball",
            Sport::Hockey => "Hockey",
            Sport::TableTennis => "Table Tennis",
            Sport::Chess => "Chess",
            Sport::Carom => "Carom",
            Sport::Swimming => "Swimming",
            Sport::Tennis => "Tennis",
            Sport::Pickleball => "Pickleball",
        }
    }

    #[must_use]
    pub const fn status(self) -> SportStatus {
        match self {
            Sport::Cricket
            | Sport::Football
            | Sport::Pickleball
            | Sport::Swimming
            | Sport::Volleyball
            | Sport::Basketball
            | Sport::Badminton => SportStatus::Active,
            Sport::Hockey | Sport::TableTennis | Sport::Chess | Sport::Carom | Sport::Tennis => {
                SportStatus::Upcoming
            }
        }
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self.status(), SportStatus::Active)
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sport {
    type Err = TurfbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Sport::ALL
            .into_iter()
            .find(|sport| sport.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TurfbookError::validation(format!("Unknown sport: {wanted}")))
    }
}

impl fmt::Display for SportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SportStatus::Active => f.write_str("Active"),
            SportStatus::Upcoming => f.write_str("Upcoming"),
        }
    }
}
