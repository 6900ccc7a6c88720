use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }

    /// +1 for longs, -1 for shorts. Multiplying a price move by this gives
    /// the move in the trade's favour.
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

/// Outcome of a closed trade. There is no breakeven category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Win,
    Loss,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Win => write!(f, "win"),
            TradeStatus::Loss => write!(f, "loss"),
        }
    }
}

impl TradeStatus {
    pub fn from_pnl(pnl: f64) -> Self {
        if pnl > 0.0 {
            TradeStatus::Win
        } else {
            TradeStatus::Loss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Short).unwrap();
        assert_eq!(json, "\"short\"");
        let back: Direction = serde_json::from_str("\"long\"").unwrap();
        assert_eq!(back, Direction::Long);
    }

    #[test]
    fn status_from_pnl_treats_zero_as_loss() {
        assert_eq!(TradeStatus::from_pnl(12.5), TradeStatus::Win);
        assert_eq!(TradeStatus::from_pnl(0.0), TradeStatus::Loss);
        assert_eq!(TradeStatus::from_pnl(-3.0), TradeStatus::Loss);
    }
}
