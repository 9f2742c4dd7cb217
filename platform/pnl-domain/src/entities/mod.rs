pub mod metrics_table;
