use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::journal::TradeSource;
use crate::models::Trade;
use crate::strategy::Strategy;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("failed to access journal {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("journal {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode journal {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk layout of the journal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalFile {
    #[serde(default)]
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub strategies: Vec<Strategy>,
}

/// A journal kept in a single JSON file. A missing file is an empty journal.
pub struct JsonJournal {
    path: PathBuf,
}

impl JsonJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub async fn read(&self) -> Result<JournalFile, JournalError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No journal at {}, starting empty", self.path.display());
                return Ok(JournalFile::default());
            }
            Err(source) => {
                return Err(JournalError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let journal: JournalFile =
            serde_json::from_str(&raw).map_err(|source| JournalError::Parse {
                path: self.path.clone(),
                source,
            })?;
        info!(
            "Loaded {} trades and {} strategies from {}",
            journal.trades.len(),
            journal.strategies.len(),
            self.path.display()
        );
        Ok(journal)
    }

    pub async fn write(&self, journal: &JournalFile) -> Result<(), JournalError> {
        let io_err = |source: std::io::Error| JournalError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(journal).map_err(|source| JournalError::Encode {
            path: self.path.clone(),
            source,
        })?;
        tokio::fs::write(&self.path, json).await.map_err(io_err)?;
        debug!("Saved journal to {}", self.path.display());
        Ok(())
    }

    /// Append a trade, giving it the next free id. Returns that id.
    pub async fn record_trade(&self, mut trade: Trade) -> Result<u64, JournalError> {
        let mut journal = self.read().await?;
        let id = journal.trades.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        trade.id = id;
        info!(
            "Journaled trade #{} {} {} ${:+.2}",
            id, trade.symbol, trade.direction, trade.net_pl
        );
        journal.trades.push(trade);
        self.write(&journal).await?;
        Ok(id)
    }

    /// Insert the strategy, or replace the stored one with the same id.
    pub async fn save_strategy(&self, strategy: Strategy) -> Result<(), JournalError> {
        let mut journal = self.read().await?;
        match journal.strategies.iter_mut().find(|s| s.id == strategy.id) {
            Some(existing) => *existing = strategy,
            None => journal.strategies.push(strategy),
        }
        self.write(&journal).await
    }
}

#[async_trait]
impl TradeSource for JsonJournal {
    async fn load_trades(&mut self) -> Result<Vec<Trade>> {
        Ok(self.read().await?.trades)
    }

    async fn load_strategies(&mut self) -> Result<Vec<Strategy>> {
        Ok(self.read().await?.strategies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeStatus;
    use crate::test_helpers::{at, make_trade, temp_journal_path};

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let journal = JsonJournal::new(temp_journal_path("missing"));
        assert!(!journal.exists());
        let file = journal.read().await.unwrap();
        assert_eq!(file, JournalFile::default());
    }

    #[tokio::test]
    async fn record_trade_assigns_ids_and_persists() {
        let path = temp_journal_path("record");
        let journal = JsonJournal::new(&path);

        let first = journal
            .record_trade(make_trade(at(2024, 3, 4, 10, 0), 40.0, TradeStatus::Win))
            .await
            .unwrap();
        let second = journal
            .record_trade(make_trade(at(2024, 3, 4, 11, 0), -15.0, TradeStatus::Loss))
            .await
            .unwrap();
        assert_eq!((first, second), (1, 2));

        let mut reopened = JsonJournal::new(&path);
        let trades = reopened.load_trades().await.unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[1].net_pl, -15.0);
        assert_eq!(trades[1].close_hour(), 11);

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn save_strategy_upserts() {
        let path = temp_journal_path("strategy");
        let journal = JsonJournal::new(&path);

        let mut s = Strategy::new(3, "Gap fill");
        journal.save_strategy(s.clone()).await.unwrap();
        s.add_group("Entry").unwrap();
        s.add_rule("Entry", "Gap > 1%").unwrap();
        journal.save_strategy(s).await.unwrap();

        let mut reopened = JsonJournal::new(&path);
        let strategies = reopened.load_strategies().await.unwrap();
        assert_eq!(strategies.len(), 1);
        assert_eq!(strategies[0].rule_count(), 1);

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_error() {
        let path = temp_journal_path("garbage");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonJournal::new(&path).read().await.unwrap_err();
        assert!(matches!(err, JournalError::Parse { .. }));
        let _ = std::fs::remove_file(path);
    }
}
