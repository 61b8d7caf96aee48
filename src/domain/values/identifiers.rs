use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// First MLB season on record; nothing earlier can have a card.
const MIN_SEASON: u16 = 1876;
const MAX_SEASON: u16 = 2500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct SeasonYear(u16);

impl SeasonYear {
    pub fn new(year: u16) -> Result<Self, DomainError> {
        if !(MIN_SEASON..=MAX_SEASON).contains(&year) {
            return Err(DomainError::InvalidInput(format!(
                "Season year must be between {MIN_SEASON} and {MAX_SEASON}, got {year}"
            )));
        }
        Ok(SeasonYear(year))
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for SeasonYear {
    type Error = DomainError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        SeasonYear::new(value)
    }
}

impl From<SeasonYear> for u16 {
    fn from(year: SeasonYear) -> Self {
        year.0
    }
}

impl fmt::Display for SeasonYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marketplace identifier of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardExternalId(Uuid);

impl CardExternalId {
    pub fn new(id: Uuid) -> Self {
        CardExternalId(id)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for CardExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The marketplace hands these out without dashes
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for CardExternalId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(CardExternalId)
            .map_err(|e| DomainError::InvalidInput(format!("Invalid card external ID '{s}': {e}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MlbId(u32);

impl MlbId {
    pub fn new(id: u32) -> Result<Self, DomainError> {
        if id == 0 {
            return Err(DomainError::InvalidInput(
                "MLB ID must be a positive integer".to_string(),
            ));
        }
        Ok(MlbId(id))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for MlbId {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        MlbId::new(value)
    }
}

impl From<MlbId> for u32 {
    fn from(id: MlbId) -> Self {
        id.0
    }
}

impl fmt::Display for MlbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
