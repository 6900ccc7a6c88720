pub mod calendar;
pub mod daily;
pub mod performance;

pub use calendar::{daily_calendar, month_calendar, CalendarDay};
pub use daily::{aggregate, DailyMetrics};
pub use performance::PerformanceSummary;

/// Reported instead of an unbounded ratio when there are wins but no losses.
/// The dashboard gauge is scaled so that 3 fills it.
pub const PROFIT_FACTOR_CAP: f64 = 3.0;

/// Gross profit over gross loss magnitude, rounded to 2 decimals.
///
/// `gross_loss` is a magnitude. With no losses the result is
/// [`PROFIT_FACTOR_CAP`] if anything was won, else 0.
pub fn profit_factor(gross_win: f64, gross_loss: f64) -> f64 {
    if gross_loss == 0.0 {
        if gross_win > 0.0 {
            PROFIT_FACTOR_CAP
        } else {
            0.0
        }
    } else {
        round2(gross_win / gross_loss)
    }
}

/// Percentage of `part` in `total`, 1 decimal. 0 for an empty total.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(part as f64 / total as f64 * 100.0)
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

// Adding +0.0 turns -0.0 (an empty f64 sum, or a rounded tiny negative)
// into 0.0 so it never reaches the dashboard as "-0.0".
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0 + 0.0
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0 + 0.0
}
