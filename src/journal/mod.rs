pub mod demo;
pub mod store;

pub use demo::DemoSource;
pub use store::{JournalError, JournalFile, JsonJournal};

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Trade;
use crate::strategy::Strategy;

/// Where journaled trades come from. Implementations return every trade they
/// hold; narrowing to a day is left to the caller.
#[async_trait]
pub trait TradeSource: Send + Sync {
    async fn load_trades(&mut self) -> Result<Vec<Trade>>;
    async fn load_strategies(&mut self) -> Result<Vec<Strategy>>;
}
