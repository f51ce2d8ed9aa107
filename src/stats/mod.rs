//! Stats module - Wishlist summary metrics

mod calculator;

pub use calculator::{MetricsCalculator, MetricsError, WishlistMetrics};
