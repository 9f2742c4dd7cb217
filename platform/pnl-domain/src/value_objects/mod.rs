pub mod metrics_row;
pub mod series;
