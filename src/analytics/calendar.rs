use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analytics::round2;
use crate::models::Trade;

/// One cell of the P&L calendar heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    #[serde(rename = "netPL")]
    pub net_pl: f64,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
}

impl CalendarDay {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            net_pl: 0.0,
            trades: 0,
            wins: 0,
            losses: 0,
        }
    }

    pub fn is_green(&self) -> bool {
        self.net_pl > 0.0
    }
}

/// Per-day totals for every local close day that has trades, oldest first.
pub fn daily_calendar(trades: &[Trade]) -> Vec<CalendarDay> {
    let mut days: BTreeMap<NaiveDate, CalendarDay> = BTreeMap::new();

    for t in trades {
        let date = t.close_day();
        let cell = days.entry(date).or_insert_with(|| CalendarDay::new(date));
        cell.trades += 1;
        cell.net_pl += t.net_pl;
        if t.is_win() {
            cell.wins += 1;
        } else {
            cell.losses += 1;
        }
    }

    days.into_values()
        .map(|mut cell| {
            cell.net_pl = round2(cell.net_pl);
            cell
        })
        .collect()
}

/// [`daily_calendar`] restricted to one month.
pub fn month_calendar(trades: &[Trade], year: i32, month: u32) -> Vec<CalendarDay> {
    daily_calendar(trades)
        .into_iter()
        .filter(|d| d.date.year() == year && d.date.month() == month)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeStatus;
    use crate::test_helpers::{at, make_trade};

    #[test]
    fn groups_by_close_day_and_sorts() {
        let trades = vec![
            make_trade(at(2024, 3, 6, 10, 0), 40.0, TradeStatus::Win),
            make_trade(at(2024, 3, 4, 10, 0), 25.0, TradeStatus::Win),
            make_trade(at(2024, 3, 4, 14, 30), -10.0, TradeStatus::Loss),
        ];
        let cal = daily_calendar(&trades);
        assert_eq!(cal.len(), 2);
        assert_eq!(cal[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(cal[0].net_pl, 15.0);
        assert_eq!(cal[0].trades, 2);
        assert_eq!(cal[0].wins, 1);
        assert_eq!(cal[0].losses, 1);
        assert!(cal[0].is_green());
        assert_eq!(cal[1].net_pl, 40.0);
    }

    #[test]
    fn month_filter() {
        let trades = vec![
            make_trade(at(2024, 2, 29, 10, 0), 5.0, TradeStatus::Win),
            make_trade(at(2024, 3, 1, 10, 0), -5.0, TradeStatus::Loss),
        ];
        let march = month_calendar(&trades, 2024, 3);
        assert_eq!(march.len(), 1);
        assert!(!march[0].is_green());
    }

    #[test]
    fn empty_journal_has_empty_calendar() {
        assert!(daily_calendar(&[]).is_empty());
    }
}
