pub mod direction;
pub mod trade;

pub use direction::*;
pub use trade::{filter_by_day, Trade};
