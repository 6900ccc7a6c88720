use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::{mean, percentage, profit_factor, round2};
use crate::models::Trade;

/// First and last hourly bucket of the intraday P&L series.
pub const FIRST_BUCKET_HOUR: u32 = 9;
pub const LAST_BUCKET_HOUR: u32 = 16;

/// Summary of one trading day, shaped for the dashboard panels.
///
/// `timestamps` and `net_cumulative_pl` are parallel and always hold one
/// entry per hour from 09:00 to 16:00.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetrics {
    pub date: NaiveDate,
    pub timestamps: Vec<String>,
    #[serde(rename = "netCumulativePL")]
    pub net_cumulative_pl: Vec<f64>,
    pub profit_factor: f64,
    pub win_percentage: f64,
    pub average_win: f64,
    pub average_loss: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
}

impl DailyMetrics {
    /// Zeroed metrics for a day without trades.
    pub fn empty(date: NaiveDate) -> Self {
        let timestamps = bucket_labels();
        let net_cumulative_pl = vec![0.0; timestamps.len()];
        Self {
            date,
            timestamps,
            net_cumulative_pl,
            profit_factor: 0.0,
            win_percentage: 0.0,
            average_win: 0.0,
            average_loss: 0.0,
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
        }
    }

    /// Cumulative P&L at the 16:00 bucket.
    pub fn closing_pl(&self) -> f64 {
        self.net_cumulative_pl.last().copied().unwrap_or(0.0)
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(50));
        println!("  DAILY METRICS  {}", self.date.format("%Y-%m-%d (%A)"));
        println!("{}", "=".repeat(50));
        println!("  Trades:        {}", self.total_trades);
        println!(
            "  Win/Loss:      {} / {}",
            self.winning_trades, self.losing_trades
        );
        println!("  Win Rate:      {:.1}%", self.win_percentage);
        println!("  Avg Win:       ${:.2}", self.average_win);
        println!("  Avg Loss:      ${:.2}", self.average_loss);
        println!("  Profit Factor: {:.2}", self.profit_factor);
        println!();
        println!("  INTRADAY P&L");
        println!("  ───────────────────────────────────");
        for (label, pl) in self.timestamps.iter().zip(&self.net_cumulative_pl) {
            println!("  {}  ${:+.2}", label, pl);
        }
        println!("{}", "=".repeat(50));
    }
}

fn bucket_labels() -> Vec<String> {
    (FIRST_BUCKET_HOUR..=LAST_BUCKET_HOUR)
        .map(|h| format!("{:02}:00", h))
        .collect()
}

/// Summarize the trades of one day.
///
/// `date` only labels the result; filtering trades to that day is the
/// caller's job (see [`crate::models::filter_by_day`]). Win/loss comes from
/// each trade's `status`, never from the sign of its P&L.
pub fn aggregate(trades: &[Trade], date: NaiveDate) -> DailyMetrics {
    if trades.is_empty() {
        return DailyMetrics::empty(date);
    }

    debug_assert!(
        trades.iter().all(|t| t.close_date >= t.open_date),
        "trade closed before it opened"
    );

    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.close_date);

    // Trades closing after the last bucket hour land in no bucket.
    let net_cumulative_pl: Vec<f64> = (FIRST_BUCKET_HOUR..=LAST_BUCKET_HOUR)
        .map(|hour| {
            round2(
                sorted
                    .iter()
                    .filter(|t| t.close_hour() <= hour)
                    .map(|t| t.net_pl)
                    .sum(),
            )
        })
        .collect();

    let (wins, losses): (Vec<&Trade>, Vec<&Trade>) =
        sorted.iter().copied().partition(|t| t.is_win());

    let gross_win: f64 = wins.iter().map(|t| t.net_pl).sum();
    let gross_loss: f64 = losses.iter().map(|t| t.net_pl).sum::<f64>().abs();

    DailyMetrics {
        date,
        timestamps: bucket_labels(),
        net_cumulative_pl,
        profit_factor: profit_factor(gross_win, gross_loss),
        win_percentage: percentage(wins.len(), sorted.len()),
        average_win: round2(mean(wins.iter().map(|t| t.net_pl))),
        average_loss: round2(mean(losses.iter().map(|t| t.net_pl.abs()))),
        total_trades: sorted.len(),
        winning_trades: wins.len(),
        losing_trades: losses.len(),
    }
}
