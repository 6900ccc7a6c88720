use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use trade_journal::models::{Direction, Trade, TradeStatus};

/// A timestamp on the given local wall clock, EST (UTC-5).
pub fn est(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
        .and_local_timezone(FixedOffset::west_opt(5 * 3600).unwrap())
        .unwrap()
}

/// A trade closed at `close`, classified by the sign of its P&L.
pub fn closed_trade(close: DateTime<FixedOffset>, net_pl: f64) -> Trade {
    Trade {
        id: 0,
        symbol: "NQ".to_string(),
        direction: Direction::Short,
        open_date: close - Duration::minutes(25),
        close_date: close,
        entry_price: 18_000.0,
        exit_price: 18_000.0 - net_pl / 20.0,
        stop_loss: Some(18_010.0),
        quantity: 1.0,
        net_pl,
        status: TradeStatus::from_pnl(net_pl),
        strategy_id: None,
        followed_rules: Vec::new(),
        notes: String::new(),
    }
}
