//! Display formatting helpers for chart axes, tooltips and stat tiles.

pub mod num;

pub use num::{format_compact, format_number, format_price, format_rate_percent};
