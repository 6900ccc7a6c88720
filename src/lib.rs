pub mod analytics;
pub mod config;
pub mod journal;
pub mod models;
pub mod strategy;
#[cfg(test)]
pub mod test_helpers;
