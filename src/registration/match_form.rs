//! Unified match registration: an individual or a team signing up for a
//! sport at a chosen turf.

use serde::{Deserialize, Serialize};

use super::{PlayerType, is_blank, trim_in_place};
use crate::models::Sport;
use crate::{Result, TurfbookError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegisterType {
    #[default]
    Individual,
    Team,
}

impl RegisterType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            RegisterType::Individual => "Individual",
            RegisterType::Team => "Team",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRegistration {
    #[serde(default)]
    pub register_type: RegisterType,
    /// Team name, only meaningful for team registrations
    #[serde(default)]
    pub your_name: Option<String>,
    pub full_name: String,
    pub email: String,
    pub whatsapp_number: String,
    pub sport: String,
    /// Only meaningful for cricket
    #[serde(default)]
    pub player_type: Option<String>,
    pub turf_name: String,
}

impl MatchRegistration {
    /// Check required fields and normalise the submission
    pub fn validate(mut self) -> Result<Self> {
        if [
            &self.full_name,
            &self.email,
            &self.whatsapp_number,
            &self.sport,
            &self.turf_name,
        ]
        .into_iter()
        .any(|field| is_blank(field))
        {
            return Err(TurfbookError::validation(
                "Please fill all required fields.",
            ));
        }

        self.your_name = match self.register_type {
            RegisterType::Team => match self.your_name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => Some(name.to_string()),
                _ => return Err(TurfbookError::validation("Please enter your name.")),
            },
            RegisterType::Individual => None,
        };

        let sport: Sport = self.sport.parse()?;
        if !sport.is_active() {
            return Err(TurfbookError::validation(format!(
                "Registration for {sport} is not open yet."
            )));
        }
        self.sport = sport.name().to_string();

        self.player_type = if sport == Sport::Cricket {
            match self.player_type.as_deref() {
                Some(value) if !is_blank(value) => {
                    Some(value.parse::<PlayerType>()?.name().to_string())
                }
                _ => return Err(TurfbookError::validation("Please select player type.")),
            }
        } else {
            None
        };

        trim_in_place(&mut self.full_name);
        trim_in_place(&mut self.email);
        trim_in_place(&mut self.whatsapp_number);
        trim_in_place(&mut self.turf_name);

        Ok(self)
    }
}
