use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use trade_journal::analytics::{self, CalendarDay, PerformanceSummary};
use trade_journal::config::Config;
use trade_journal::journal::{DemoSource, JsonJournal, TradeSource};
use trade_journal::models::filter_by_day;
use trade_journal::strategy::StrategyReport;

const USAGE: &str = "usage: trade-journal [YYYY-MM-DD] [--json]";

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let mut date = None;
    let mut json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            s => {
                let parsed = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .with_context(|| format!("invalid date '{}'\n{}", s, USAGE))?;
                date = Some(parsed);
            }
        }
    }
    let date = date.unwrap_or_else(|| cfg.today());

    let journal = JsonJournal::new(&cfg.journal_file);
    let mut source: Box<dyn TradeSource> = if journal.exists() {
        info!("Using journal {}", journal.path().display());
        Box::new(journal)
    } else {
        warn!(
            "No journal at {}, showing demo data (seed {})",
            cfg.journal_file, cfg.demo_seed
        );
        Box::new(DemoSource::from_config(&cfg, date))
    };

    let trades = source.load_trades().await?;
    let strategies = source.load_strategies().await?;

    let day_trades = filter_by_day(&trades, date);
    info!("{} of {} trades closed on {}", day_trades.len(), trades.len(), date);
    let metrics = analytics::aggregate(&day_trades, date);

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    metrics.print_summary();
    PerformanceSummary::from_trades(&trades, cfg.initial_balance).print_summary();
    print_calendar(&analytics::month_calendar(&trades, date.year(), date.month()));

    for strategy in &strategies {
        StrategyReport::build(strategy, &trades).print_summary();
    }

    Ok(())
}

fn print_calendar(days: &[CalendarDay]) {
    let Some(first) = days.first() else {
        return;
    };

    println!("\n{}", "=".repeat(50));
    println!("  CALENDAR  {}", first.date.format("%B %Y"));
    println!("{}", "=".repeat(50));
    for d in days {
        let marker = if d.is_green() { "+" } else { "-" };
        println!(
            "  {} {}  ${:>+10.2}  {} trades ({}W/{}L)",
            marker,
            d.date.format("%a %d"),
            d.net_pl,
            d.trades,
            d.wins,
            d.losses
        );
    }
    println!("{}", "=".repeat(50));
}
