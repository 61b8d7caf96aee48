use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Predicted marketplace demand, ordered from biggest loss to biggest gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Demand {
    Loss,
    Low,
    Stable,
    Gain,
    High,
}

impl Demand {
    /// Stable ordinal used for persistence.
    pub fn ordinal(&self) -> i64 {
        match self {
            Demand::Loss => -2,
            Demand::Low => -1,
            Demand::Stable => 0,
            Demand::Gain => 1,
            Demand::High => 2,
        }
    }

    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            -2 => Some(Demand::Loss),
            -1 => Some(Demand::Low),
            0 => Some(Demand::Stable),
            1 => Some(Demand::Gain),
            2 => Some(Demand::High),
            _ => None,
        }
    }

    pub fn is_positive(&self) -> bool {
        *self > Demand::Stable
    }

    pub fn is_negative(&self) -> bool {
        *self < Demand::Stable
    }
}

impl fmt::Display for Demand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Demand::Loss => write!(f, "loss"),
            Demand::Low => write!(f, "low"),
            Demand::Stable => write!(f, "stable"),
            Demand::Gain => write!(f, "gain"),
            Demand::High => write!(f, "high"),
        }
    }
}

impl FromStr for Demand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loss" => Ok(Demand::Loss),
            "low" => Ok(Demand::Low),
            "stable" => Ok(Demand::Stable),
            "gain" => Ok(Demand::Gain),
            "high" => Ok(Demand::High),
            _ => Err(format!("Unknown demand: {s}")),
        }
    }
}
