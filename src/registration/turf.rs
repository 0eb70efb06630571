use serde::{Deserialize, Serialize};

use super::{is_blank, trim_in_place};
use crate::{Result, TurfbookError};

/// A turf owner listing their venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurfRegistration {
    pub name: String,
    pub mobile: String,
    pub district: String,
    pub state: String,
}

impl TurfRegistration {
    pub fn validate(mut self) -> Result<Self> {
        if [&self.name, &self.mobile, &self.district, &self.state]
            .into_iter()
            .any(|field| is_blank(field))
        {
            return Err(TurfbookError::validation("Please fill all fields"));
        }

        trim_in_place(&mut self.name);
        trim_in_place(&mut self.mobile);
        trim_in_place(&mut self.district);
        trim_in_place(&mut self.state);
        Ok(self)
    }
}
