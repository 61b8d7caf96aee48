use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_RATING: u8 = 40;
const MAX_RATING: u8 = 99;

/// Card tier, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Bronze,
    Silver,
    Gold,
    Diamond,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => write!(f, "common"),
            Rarity::Bronze => write!(f, "bronze"),
            Rarity::Silver => write!(f, "silver"),
            Rarity::Gold => write!(f, "gold"),
            Rarity::Diamond => write!(f, "diamond"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OverallRating(u8);

impl OverallRating {
    pub fn new(rating: u8) -> Result<Self, DomainError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(DomainError::InvalidInput(format!(
                "The overall rating of {rating} is not between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        Ok(OverallRating(rating))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn rarity(&self) -> Rarity {
        match self.0 {
            85..=99 => Rarity::Diamond,
            80..=84 => Rarity::Gold,
            75..=79 => Rarity::Silver,
            65..=74 => Rarity::Bronze,
            _ => Rarity::Common,
        }
    }
}

impl TryFrom<u8> for OverallRating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        OverallRating::new(value)
    }
}

impl From<OverallRating> for u8 {
    fn from(rating: OverallRating) -> Self {
        rating.0
    }
}

impl fmt::Display for OverallRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
