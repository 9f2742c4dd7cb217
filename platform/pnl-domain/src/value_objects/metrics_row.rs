use chrono::{DateTime, Utc};

/// One sample of account performance, as written by the trading bot.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub timestamp: DateTime<Utc>,
    pub total_profit_loss: f64,
    pub unrealized_profit: f64,
    pub unrealized_loss: f64,
}

impl MetricsRow {
    /// X coordinate on the time axis (epoch seconds).
    pub fn x(&self) -> f64 {
        self.timestamp.timestamp() as f64
    }
}
