use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Journal
    pub journal_file: String,
    /// Trader's local timezone, used for "today" and demo timestamps.
    pub timezone: Tz,

    // Performance
    pub initial_balance: f64,

    // Demo data
    pub demo_seed: u64,
    pub demo_days: usize,
    pub demo_trades_per_day: usize,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            journal_file: env("JOURNAL_FILE", "data/journal.json"),
            timezone: env("JOURNAL_TZ", DEFAULT_TIMEZONE.name())
                .parse()
                .unwrap_or(DEFAULT_TIMEZONE),
            initial_balance: env("INITIAL_BALANCE", "10000")
                .parse()
                .unwrap_or(10_000.0),
            demo_seed: env("DEMO_SEED", "42").parse().unwrap_or(42),
            demo_days: env("DEMO_DAYS", "20").parse().unwrap_or(20),
            demo_trades_per_day: env("DEMO_TRADES_PER_DAY", "6").parse().unwrap_or(6),
            log_level: env("LOG_LEVEL", "info"),
        }
    }

    /// Current calendar day in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::default_test_config;

    #[test]
    fn test_config_uses_eastern_time() {
        let cfg = default_test_config();
        assert_eq!(cfg.timezone.name(), "America/New_York");
        assert_eq!(cfg.initial_balance, 10_000.0);
    }

    #[test]
    fn timezone_names_parse() {
        let tz: chrono_tz::Tz = "Europe/London".parse().unwrap();
        assert_eq!(tz, chrono_tz::Europe::London);
        assert!("Mars/Olympus_Mons".parse::<chrono_tz::Tz>().is_err());
    }
}
