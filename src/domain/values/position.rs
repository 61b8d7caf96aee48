use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "IF")]
    Infield,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
    #[serde(rename = "OF")]
    OutField,
    #[serde(rename = "DH")]
    DesignatedHitter,
    #[serde(rename = "PH")]
    PinchHitter,
    #[serde(rename = "PR")]
    PinchRunner,
    #[serde(rename = "TWP")]
    TwoWayPlayer,
    #[serde(rename = "SP")]
    StartingPitcher,
    #[serde(rename = "RP")]
    ReliefPitcher,
    #[serde(rename = "CP")]
    ClosingPitcher,
    #[serde(rename = "NONE")]
    None,
}

impl Position {
    pub fn is_only_pitcher(&self) -> bool {
        matches!(
            self,
            Position::Pitcher
                | Position::StartingPitcher
                | Position::ReliefPitcher
                | Position::ClosingPitcher
        )
    }

    pub fn is_only_batter(&self) -> bool {
        !self.is_only_pitcher() && !self.is_two_way_player() && *self != Position::None
    }

    pub fn is_two_way_player(&self) -> bool {
        *self == Position::TwoWayPlayer
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::Infield => "IF",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
            Position::OutField => "OF",
            Position::DesignatedHitter => "DH",
            Position::PinchHitter => "PH",
            Position::PinchRunner => "PR",
            Position::TwoWayPlayer => "TWP",
            Position::StartingPitcher => "SP",
            Position::ReliefPitcher => "RP",
            Position::ClosingPitcher => "CP",
            Position::None => "NONE",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "P" => Ok(Position::Pitcher),
            "C" => Ok(Position::Catcher),
            "1B" => Ok(Position::FirstBase),
            "2B" => Ok(Position::SecondBase),
            "3B" => Ok(Position::ThirdBase),
            "SS" => Ok(Position::Shortstop),
            "IF" => Ok(Position::Infield),
            "LF" => Ok(Position::LeftField),
            "CF" => Ok(Position::CenterField),
            "RF" => Ok(Position::RightField),
            "OF" => Ok(Position::OutField),
            "DH" => Ok(Position::DesignatedHitter),
            "PH" => Ok(Position::PinchHitter),
            "PR" => Ok(Position::PinchRunner),
            "TWP" => Ok(Position::TwoWayPlayer),
            "SP" => Ok(Position::StartingPitcher),
            "RP" => Ok(Position::ReliefPitcher),
            "CP" => Ok(Position::ClosingPitcher),
            "NONE" => Ok(Position::None),
            _ => Err(format!("Unknown position: {s}")),
        }
    }
}
