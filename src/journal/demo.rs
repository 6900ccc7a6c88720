use anyhow::Result;
use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::analytics::round2;
use crate::config::Config;
use crate::journal::TradeSource;
use crate::models::{Direction, Trade, TradeStatus};
use crate::strategy::{Strategy, StrategyError};

/// (symbol, reference price, contracts/shares range)
const INSTRUMENTS: &[(&str, f64, (u32, u32))] = &[
    ("ES", 5100.0, (1, 3)),
    ("NQ", 18000.0, (1, 2)),
    ("SPY", 510.0, (10, 100)),
    ("AAPL", 175.0, (10, 200)),
    ("TSLA", 180.0, (10, 150)),
];

const DEMO_STRATEGY_ID: u64 = 1;
const WIN_PROBABILITY: f64 = 0.55;

const FIRST_OPEN_MINUTE: u32 = 9 * 60 + 30;
const LAST_OPEN_MINUTE: u32 = 15 * 60 + 30;
const LAST_CLOSE_MINUTE: u32 = 16 * 60 + 59;

/// Plausible intraday trades for dashboards and tests. The same seed always
/// yields the same journal.
pub struct DemoSource {
    anchor: NaiveDate,
    tz: Tz,
    seed: u64,
    days: usize,
    max_trades_per_day: usize,
}

impl DemoSource {
    pub fn new(anchor: NaiveDate, tz: Tz, seed: u64) -> Self {
        Self {
            anchor,
            tz,
            seed,
            days: 20,
            max_trades_per_day: 6,
        }
    }

    pub fn from_config(cfg: &Config, anchor: NaiveDate) -> Self {
        Self::new(anchor, cfg.timezone, cfg.demo_seed)
            .with_days(cfg.demo_days)
            .with_max_trades_per_day(cfg.demo_trades_per_day)
    }

    pub fn with_days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }

    pub fn with_max_trades_per_day(mut self, max: usize) -> Self {
        self.max_trades_per_day = max.max(1);
        self
    }

    /// The weekdays covered, oldest first, ending at the anchor (or the last
    /// weekday before it).
    pub fn trading_days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::with_capacity(self.days);
        let mut day = self.anchor;
        while days.len() < self.days {
            if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                days.push(day);
            }
            day -= Duration::days(1);
        }
        days.reverse();
        days
    }

    pub fn strategy(&self) -> Result<Strategy, StrategyError> {
        let mut s = Strategy::new(DEMO_STRATEGY_ID, "Opening drive pullback")
            .with_description("Trade the first pullback after a strong opening drive");
        for (group, rules) in [
            ("Setup", ["Opening drive > 0.5% in first 30m", "Above VWAP"].as_slice()),
            ("Entry", ["Pullback holds 20 EMA", "Enter on candle close"].as_slice()),
            ("Risk", ["Stop below pullback low", "Risk under 1% of account"].as_slice()),
        ] {
            s.add_group(group)?;
            for rule in rules {
                s.add_rule(group, rule)?;
            }
        }
        Ok(s)
    }

    pub fn generate(&self) -> Result<Vec<Trade>, StrategyError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let rule_ids: Vec<u64> = self.strategy()?.rules().map(|r| r.id).collect();
        let mut trades = Vec::new();

        for day in self.trading_days() {
            let count = rng.gen_range(1..=self.max_trades_per_day);
            for _ in 0..count {
                let id = trades.len() as u64 + 1;
                if let Some(trade) = self.make_trade(&mut rng, day, id, &rule_ids) {
                    trades.push(trade);
                }
            }
        }

        trades.sort_by_key(|t| t.close_date);
        Ok(trades)
    }

    fn make_trade(
        &self,
        rng: &mut StdRng,
        day: NaiveDate,
        id: u64,
        rule_ids: &[u64],
    ) -> Option<Trade> {
        let &(symbol, reference, (min_qty, max_qty)) = INSTRUMENTS.choose(rng)?;
        let direction = if rng.gen_bool(0.5) {
            Direction::Long
        } else {
            Direction::Short
        };

        let entry = round2(reference * rng.gen_range(0.97..1.03));
        let risk = entry * rng.gen_range(0.002..0.006);
        let stop = round2(entry - direction.sign() * risk);
        let r = if rng.gen_bool(WIN_PROBABILITY) {
            rng.gen_range(0.3..3.0)
        } else {
            rng.gen_range(-1.1..-0.1)
        };
        let exit = round2(entry + direction.sign() * r * risk);
        let quantity = rng.gen_range(min_qty..=max_qty) as f64;
        let net_pl = round2((exit - entry) * direction.sign() * quantity);

        let open_minute = rng.gen_range(FIRST_OPEN_MINUTE..=LAST_OPEN_MINUTE);
        let close_minute = (open_minute + rng.gen_range(2..=90)).min(LAST_CLOSE_MINUTE);
        let open_date = self.local(day, open_minute)?;
        let close_date = self.local(day, close_minute)?;

        let followed_rules = rule_ids
            .iter()
            .copied()
            .filter(|_| rng.gen_bool(0.8))
            .collect();

        Some(Trade {
            id,
            symbol: symbol.to_string(),
            direction,
            open_date,
            close_date,
            entry_price: entry,
            exit_price: exit,
            stop_loss: Some(stop),
            quantity,
            net_pl,
            status: TradeStatus::from_pnl(net_pl),
            strategy_id: Some(DEMO_STRATEGY_ID),
            followed_rules,
            notes: String::new(),
        })
    }

    fn local(&self, day: NaiveDate, minute_of_day: u32) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        let time = NaiveTime::from_hms_opt(minute_of_day / 60, minute_of_day % 60, 0)?;
        let local = self.tz.from_local_datetime(&day.and_time(time)).earliest()?;
        Some(local.fixed_offset())
    }
}

#[async_trait]
impl TradeSource for DemoSource {
    async fn load_trades(&mut self) -> Result<Vec<Trade>> {
        Ok(self.generate()?)
    }

    async fn load_strategies(&mut self) -> Result<Vec<Strategy>> {
        Ok(vec![self.strategy()?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn source() -> DemoSource {
        let anchor = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(); // Friday
        DemoSource::new(anchor, chrono_tz::America::New_York, 7).with_days(10)
    }

    #[test]
    fn same_seed_same_trades() {
        assert_eq!(source().generate().unwrap(), source().generate().unwrap());
    }

    #[test]
    fn different_seed_different_trades() {
        let other = DemoSource::new(source().anchor, source().tz, 8).with_days(10);
        assert_ne!(source().generate().unwrap(), other.generate().unwrap());
    }

    #[test]
    fn skips_weekends() {
        let days = source().trading_days();
        assert_eq!(days.len(), 10);
        assert!(days
            .iter()
            .all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)));
        assert_eq!(days.last(), Some(&source().anchor));
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn trades_are_well_formed() {
        let trades = source().generate().unwrap();
        assert!(!trades.is_empty());
        for t in &trades {
            assert!(t.close_date >= t.open_date);
            assert!((9..=16).contains(&t.close_date.hour()));
            assert!(t.entry_price > 0.0 && t.exit_price > 0.0);
            assert_eq!(t.status, TradeStatus::from_pnl(t.net_pl));
            assert!(t.r_multiple().is_some());
            assert_eq!(t.strategy_id, Some(DEMO_STRATEGY_ID));
        }
        let mut ids: Vec<u64> = trades.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), trades.len());
    }

    #[test]
    fn timestamps_carry_local_offset() {
        let trades = source().generate().unwrap();
        // March 2024 before the DST switch on the 10th: EST
        assert!(trades
            .iter()
            .all(|t| t.close_date.offset().local_minus_utc() == -5 * 3600));
    }

    #[test]
    fn demo_strategy_has_six_rules() {
        let s = source().strategy().unwrap();
        assert_eq!(s.groups.len(), 3);
        assert_eq!(s.rule_count(), 6);
        let ids: Vec<u64> = s.rules().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn trade_source_builds_strategy_and_trades() {
        let mut s = source();
        let strategies = s.load_strategies().await.unwrap();
        assert_eq!(strategies.len(), 1);
        assert_eq!(strategies[0].rule_count(), 6);
        let trades = s.load_trades().await.unwrap();
        assert!(trades
            .iter()
            .flat_map(|t| &t.followed_rules)
            .all(|id| (1..=6).contains(id)));
    }
}
