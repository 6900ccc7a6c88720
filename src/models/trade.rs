use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::analytics::round2;
use crate::models::{Direction, TradeStatus};

/// A closed trade as recorded in the journal.
///
/// Timestamps keep the UTC offset they were journaled in, so `hour()` and
/// `date_naive()` on them are the trader's local wall clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub symbol: String,
    pub direction: Direction,
    pub open_date: DateTime<FixedOffset>,
    pub close_date: DateTime<FixedOffset>,
    pub entry_price: f64,
    pub exit_price: f64,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub quantity: f64,
    /// Realized P&L, precomputed by whoever recorded the trade.
    #[serde(rename = "netPL")]
    pub net_pl: f64,
    pub status: TradeStatus,
    #[serde(default)]
    pub strategy_id: Option<u64>,
    #[serde(default)]
    pub followed_rules: Vec<u64>,
    #[serde(default)]
    pub notes: String,
}

impl Trade {
    pub fn is_win(&self) -> bool {
        self.status == TradeStatus::Win
    }

    pub fn hold_duration(&self) -> Duration {
        self.close_date - self.open_date
    }

    /// Local calendar day the trade closed on.
    pub fn close_day(&self) -> NaiveDate {
        self.close_date.date_naive()
    }

    /// Local hour (0-23) the trade closed in.
    pub fn close_hour(&self) -> u32 {
        self.close_date.hour()
    }

    /// Price move in units of the planned risk (entry to stop).
    ///
    /// `None` without a stop, or when the stop sits on the entry price.
    pub fn r_multiple(&self) -> Option<f64> {
        let stop = self.stop_loss?;
        let risk = (self.entry_price - stop) * self.direction.sign();
        if risk == 0.0 {
            return None;
        }
        let reward = (self.exit_price - self.entry_price) * self.direction.sign();
        Some(round2(reward / risk))
    }

    pub fn follows_rule(&self, rule_id: u64) -> bool {
        self.followed_rules.contains(&rule_id)
    }
}

/// Keep only the trades that closed on `date` (local day).
pub fn filter_by_day(trades: &[Trade], date: NaiveDate) -> Vec<Trade> {
    trades
        .iter()
        .filter(|t| t.close_day() == date)
        .cloned()
        .collect()
}
