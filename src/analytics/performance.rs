use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::analytics::{mean, percentage, profit_factor, round2};
use crate::models::Trade;

/// Account-level performance over any number of days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    // Performance
    pub initial_balance: f64,
    pub final_balance: f64,
    pub total_pnl: f64,
    pub total_return_pct: f64,

    // Trades
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub profit_factor: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    pub avg_trade: f64,
    pub avg_r_multiple: f64,

    // Risk
    pub max_drawdown: f64,
    pub max_drawdown_pct: f64,
    pub sharpe_ratio: f64,

    /// Balance after each trade, in close order.
    pub equity_curve: Vec<(DateTime<FixedOffset>, f64)>,
}

impl PerformanceSummary {
    pub fn from_trades(trades: &[Trade], initial_balance: f64) -> Self {
        let mut sorted: Vec<&Trade> = trades.iter().collect();
        sorted.sort_by_key(|t| t.close_date);

        let total_trades = sorted.len();
        let total_pnl: f64 = sorted.iter().map(|t| t.net_pl).sum();
        let final_balance = initial_balance + total_pnl;

        let (wins, losses): (Vec<&Trade>, Vec<&Trade>) =
            sorted.iter().copied().partition(|t| t.is_win());
        let gross_win: f64 = wins.iter().map(|t| t.net_pl).sum();
        let gross_loss: f64 = losses.iter().map(|t| t.net_pl).sum::<f64>().abs();

        let best_trade = sorted
            .iter()
            .map(|t| t.net_pl)
            .fold(f64::NEG_INFINITY, f64::max);
        let worst_trade = sorted
            .iter()
            .map(|t| t.net_pl)
            .fold(f64::INFINITY, f64::min);

        let avg_r_multiple = mean(sorted.iter().filter_map(|t| t.r_multiple()));

        let mut balance = initial_balance;
        let equity_curve: Vec<(DateTime<FixedOffset>, f64)> = sorted
            .iter()
            .map(|t| {
                balance += t.net_pl;
                (t.close_date, balance)
            })
            .collect();

        let (max_drawdown, max_drawdown_pct) = max_drawdown(initial_balance, &equity_curve);
        let sharpe_ratio = compute_sharpe(initial_balance, &equity_curve);

        PerformanceSummary {
            initial_balance,
            final_balance: round2(final_balance),
            total_pnl: round2(total_pnl),
            total_return_pct: if initial_balance > 0.0 {
                round2(total_pnl / initial_balance * 100.0)
            } else {
                0.0
            },
            total_trades,
            winning_trades: wins.len(),
            losing_trades: losses.len(),
            win_rate: percentage(wins.len(), total_trades),
            avg_win: round2(mean(wins.iter().map(|t| t.net_pl))),
            avg_loss: round2(mean(losses.iter().map(|t| t.net_pl.abs()))),
            profit_factor: profit_factor(gross_win, gross_loss),
            best_trade: if total_trades > 0 { best_trade } else { 0.0 },
            worst_trade: if total_trades > 0 { worst_trade } else { 0.0 },
            avg_trade: if total_trades > 0 {
                round2(total_pnl / total_trades as f64)
            } else {
                0.0
            },
            avg_r_multiple: round2(avg_r_multiple),
            max_drawdown: round2(max_drawdown),
            max_drawdown_pct: round2(max_drawdown_pct),
            sharpe_ratio: round2(sharpe_ratio),
            equity_curve,
        }
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(50));
        println!("  PERFORMANCE");
        println!("{}", "=".repeat(50));
        println!("  Initial:       ${:.2}", self.initial_balance);
        println!("  Final:         ${:.2}", self.final_balance);
        println!("  PnL:           ${:+.2}", self.total_pnl);
        println!("  Return:        {:+.1}%", self.total_return_pct);
        println!();
        println!("  TRADES");
        println!("  ───────────────────────────────────");
        println!("  Total:         {}", self.total_trades);
        println!(
            "  Win/Loss:      {} / {}",
            self.winning_trades, self.losing_trades
        );
        println!("  Win Rate:      {:.1}%", self.win_rate);
        println!("  Avg Win:       ${:.2}", self.avg_win);
        println!("  Avg Loss:      ${:.2}", self.avg_loss);
        println!("  Best:          ${:+.2}", self.best_trade);
        println!("  Worst:         ${:+.2}", self.worst_trade);
        println!("  Avg Trade:     ${:+.2}", self.avg_trade);
        println!("  Avg R:         {:+.2}R", self.avg_r_multiple);
        println!("  Profit Factor: {:.2}", self.profit_factor);
        println!();
        println!("  RISK");
        println!("  ───────────────────────────────────");
        println!(
            "  Max DD:        ${:.2} ({:.1}%)",
            self.max_drawdown, self.max_drawdown_pct
        );
        println!("  Sharpe:        {:.2}", self.sharpe_ratio);
        println!("{}", "=".repeat(50));
    }
}

/// Largest peak-to-trough fall of the balance, as (amount, % of peak).
fn max_drawdown(initial_balance: f64, equity_curve: &[(DateTime<FixedOffset>, f64)]) -> (f64, f64) {
    let mut peak = initial_balance;
    let mut max_dd = 0.0;
    let mut max_dd_pct = 0.0;

    for &(_, balance) in equity_curve {
        if balance > peak {
            peak = balance;
        }
        let dd = peak - balance;
        if dd > max_dd {
            max_dd = dd;
            max_dd_pct = if peak > 0.0 { dd / peak * 100.0 } else { 0.0 };
        }
    }

    (max_dd, max_dd_pct)
}

fn compute_sharpe(initial_balance: f64, equity_curve: &[(DateTime<FixedOffset>, f64)]) -> f64 {
    if equity_curve.is_empty() {
        return 0.0;
    }

    // End-of-day balances, seeded with the opening balance
    let mut daily_values: Vec<f64> = vec![initial_balance];
    let mut last_day = None;
    for (ts, val) in equity_curve {
        let day = ts.date_naive();
        if last_day == Some(day) {
            if let Some(last) = daily_values.last_mut() {
                *last = *val;
            }
        } else {
            daily_values.push(*val);
            last_day = Some(day);
        }
    }

    // Need at least two daily returns
    if daily_values.len() < 3 {
        return 0.0;
    }

    let returns: Vec<f64> = daily_values
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();

    if returns.len() < 2 {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        return 0.0;
    }

    // Annualized over ~252 trading days
    mean / std_dev * 252.0_f64.sqrt()
}
