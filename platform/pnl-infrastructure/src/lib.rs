pub mod metrics_csv;
