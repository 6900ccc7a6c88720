use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use std::path::PathBuf;

use crate::config::Config;
use crate::models::{Direction, Trade, TradeStatus};

/// A timestamp at the given local wall-clock time, EST (UTC-5).
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    let est = FixedOffset::west_opt(5 * 3600).unwrap();
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
        .and_local_timezone(est)
        .unwrap()
}

/// A long trade held for 10 minutes and closed at `close`, with a 1-point stop.
pub fn make_trade(close: DateTime<FixedOffset>, net_pl: f64, status: TradeStatus) -> Trade {
    let quantity = 10.0;
    let entry = 100.0;
    Trade {
        id: 0,
        symbol: "SPY".to_string(),
        direction: Direction::Long,
        open_date: close - Duration::minutes(10),
        close_date: close,
        entry_price: entry,
        exit_price: entry + net_pl / quantity,
        stop_loss: Some(entry - 1.0),
        quantity,
        net_pl,
        status,
        strategy_id: None,
        followed_rules: Vec::new(),
        notes: String::new(),
    }
}

/// A unique journal path in the temp dir for this process.
pub fn temp_journal_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "trade_journal_test_{}_{}.json",
        name,
        std::process::id()
    ))
}

/// A Config suitable for testing: fixed seed, journal in the temp dir.
pub fn default_test_config() -> Config {
    Config {
        journal_file: temp_journal_path("config").to_string_lossy().to_string(),
        timezone: chrono_tz::America::New_York,
        initial_balance: 10_000.0,
        demo_seed: 42,
        demo_days: 5,
        demo_trades_per_day: 4,
        log_level: "ERROR".to_string(),
    }
}
