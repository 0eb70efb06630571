//! Match bookings by a logged-in user, either as a single player joining a
//! team or as a complete team.

use serde::{Deserialize, Serialize};

use super::{PlayerType, TEAM_SIZE, is_blank, trim_in_place};
use crate::{Result, TurfbookError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Email of the authenticated submitter
    #[serde(alias = "userEmail", default)]
    pub user_email: String,
    #[serde(flatten)]
    pub entry: BookingEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum BookingEntry {
    Individual(IndividualBooking),
    Team(TeamBooking),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualBooking {
    pub full_name: String,
    pub team_name: String,
    pub player_type: String,
    pub whatsapp_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBooking {
    pub team_name: String,
    pub captain_name: String,
    /// Teammates, with or without the captain as the first entry; blank
    /// slots are allowed on input
    #[serde(default)]
    pub players: Vec<String>,
    pub whatsapp_number: String,
}

impl BookingEntry {
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            BookingEntry::Individual(_) => "individual",
            BookingEntry::Team(_) => "team",
        }
    }
}

impl Booking {
    pub fn validate(mut self) -> Result<Self> {
        if is_blank(&self.user_email) {
            return Err(TurfbookError::validation("Login required"));
        }
        trim_in_place(&mut self.user_email);

        self.entry = match self.entry {
            BookingEntry::Individual(individual) => BookingEntry::Individual(individual.validate()?),
            BookingEntry::Team(team) => BookingEntry::Team(team.validate()?),
        };
        Ok(self)
    }
}

impl IndividualBooking {
    pub fn validate(mut self) -> Result<Self> {
        if [
            &self.full_name,
            &self.team_name,
            &self.player_type,
            &self.whatsapp_number,
        ]
        .into_iter()
        .any(|field| is_blank(field))
        {
            return Err(TurfbookError::validation("Please fill all fields"));
        }

        self.player_type = self.player_type.parse::<PlayerType>()?.name().to_string();
        trim_in_place(&mut self.full_name);
        trim_in_place(&mut self.team_name);
        trim_in_place(&mut self.whatsapp_number);
        Ok(self)
    }
}

impl TeamBooking {
    pub fn validate(mut self) -> Result<Self> {
        if [&self.team_name, &self.captain_name, &self.whatsapp_number]
            .into_iter()
            .any(|field| is_blank(field))
        {
            return Err(TurfbookError::validation("All fields are required"));
        }

        self.players = self
            .players
            .iter()
            .map(|player| player.trim())
            .filter(|player| !player.is_empty())
            .map(str::to_string)
            .collect();

        // The site posts the full roster with the captain leading it
        if self
            .players
            .first()
            .is_some_and(|first| first.eq_ignore_ascii_case(self.captain_name.trim()))
        {
            self.players.remove(0);
        }

        if 1 + self.players.len() != TEAM_SIZE {
            return Err(TurfbookError::validation(format!(
                "Exactly {TEAM_SIZE} players required (including Captain)"
            )));
        }

        trim_in_place(&mut self.team_name);
        trim_in_place(&mut self.captain_name);
        trim_in_place(&mut self.whatsapp_number);
        Ok(self)
    }

    /// Captain first, then the teammates
    #[must_use]
    pub fn roster(&self) -> Vec<&str> {
        std::iter::once(self.captain_name.as_str())
            .chain(self.players.iter().map(String::as_str))
            .collect()
    }
}
