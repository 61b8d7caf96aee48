use crate::domain::values::demand::Demand;
use crate::domain::values::position::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only registry of how scarce each position is in the marketplace.
/// Higher tier means fewer good cards play the position. Positions that are
/// not listed sit at tier 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionScarcity {
    tiers: HashMap<Position, u8>,
}

impl PositionScarcity {
    pub fn new(tiers: HashMap<Position, u8>) -> Self {
        Self { tiers }
    }

    pub fn tier(&self, position: Position) -> u8 {
        self.tiers.get(&position).copied().unwrap_or(0)
    }

    /// Moving to a scarcer position raises demand, one tier is a `Gain`,
    /// two or more is `High`. Symmetric on the way down.
    pub fn demand_for_change(&self, old_position: Position, new_position: Position) -> Demand {
        let delta = i16::from(self.tier(new_position)) - i16::from(self.tier(old_position));
        match delta {
            d if d >= 2 => Demand::High,
            1 => Demand::Gain,
            0 => Demand::Stable,
            -1 => Demand::Low,
            _ => Demand::Loss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PositionScarcity {
        PositionScarcity::new(HashMap::from([
            (Position::Catcher, 3),
            (Position::Shortstop, 2),
            (Position::CenterField, 1),
        ]))
    }

    #[test]
    fn test_unlisted_position_is_tier_zero() {
        assert_eq!(registry().tier(Position::DesignatedHitter), 0);
    }

    #[test]
    fn test_demand_follows_scarcity_delta() {
        let r = registry();
        assert_eq!(r.demand_for_change(Position::FirstBase, Position::Catcher), Demand::High);
        assert_eq!(r.demand_for_change(Position::Shortstop, Position::Catcher), Demand::Gain);
        assert_eq!(r.demand_for_change(Position::LeftField, Position::RightField), Demand::Stable);
        assert_eq!(r.demand_for_change(Position::CenterField, Position::LeftField), Demand::Low);
        assert_eq!(r.demand_for_change(Position::Catcher, Position::DesignatedHitter), Demand::Loss);
    }

    #[test]
    fn test_deserializes_from_position_codes() {
        let r: PositionScarcity = serde_json::from_str(r#"{"C": 3, "SS": 2}"#).unwrap();
        assert_eq!(r.tier(Position::Catcher), 3);
        assert_eq!(r.tier(Position::Shortstop), 2);
    }
}
