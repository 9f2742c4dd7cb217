//! Filesystem adapter for `metrics.csv`.
//!
//! The file has a header row with `Timestamp`, `TotalProfitLoss`,
//! `UnrealizedProfit` and `UnrealizedLoss`; other columns are ignored when
//! reading. Rows are appended one at a time by the trading bot, so the
//! writer only emits the header when the file is empty.

mod timestamp;

pub use timestamp::parse_timestamp;

use chrono::SecondsFormat;
use pnl_domain::entities::metrics_table::MetricsTable;
use pnl_domain::repositories::metrics::{MetricsSink, MetricsSource};
use pnl_domain::value_objects::metrics_row::MetricsRow;
use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::time::Instant;

pub const DEFAULT_METRICS_PATH: &str = "metrics.csv";

pub const HEADER: [&str; 4] = [
    "Timestamp",
    "TotalProfitLoss",
    "UnrealizedProfit",
    "UnrealizedLoss",
];

#[derive(Debug, Deserialize)]
struct MetricsRecord {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "TotalProfitLoss")]
    total_profit_loss: f64,
    #[serde(rename = "UnrealizedProfit")]
    unrealized_profit: f64,
    #[serde(rename = "UnrealizedLoss")]
    unrealized_loss: f64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvMetricsStore;

impl CsvMetricsStore {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsSource for CsvMetricsStore {
    fn load_metrics(&self, path: &Path) -> Result<MetricsTable, String> {
        let start = Instant::now();
        let result = load_csv(path);
        record_metrics("read", start, &result);
        if let Ok(table) = &result {
            metrics::counter!("pnl.infra.metrics_csv.rows_total").increment(table.len() as u64);
        }
        result
    }
}

impl MetricsSink for CsvMetricsStore {
    fn append_metrics(&self, path: &Path, row: &MetricsRow) -> Result<(), String> {
        let start = Instant::now();
        let result = append_csv(path, row);
        record_metrics("write", start, &result);
        result
    }
}

fn record_metrics<T>(op: &'static str, start: Instant, result: &Result<T, String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "pnl.infra.metrics_csv.calls_total",
        "op" => op,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("pnl.infra.metrics_csv.duration_ms", "op" => op, "result" => result_label)
        .record(start.elapsed().as_millis() as f64);
}

pub fn load_csv(path: &Path) -> Result<MetricsTable, String> {
    let file = File::open(path)
        .map_err(|err| format!("failed to open metrics CSV {}: {}", path.display(), err))?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|err| format!("failed to read metrics CSV header {}: {}", path.display(), err))?
        .clone();
    let missing: Vec<&str> = HEADER
        .iter()
        .copied()
        .filter(|name| !headers.iter().any(|h| h == *name))
        .collect();
    if !missing.is_empty() {
        return Err(format!(
            "metrics CSV {} is missing required column(s): {}",
            path.display(),
            missing.join(", ")
        ));
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<MetricsRecord>().enumerate() {
        let line = idx + 1;
        let record =
            result.map_err(|err| format!("failed to parse metrics CSV row {line}: {err}"))?;
        let timestamp = parse_timestamp(&record.timestamp)
            .map_err(|err| format!("failed to parse metrics CSV row {line}: {err}"))?;
        rows.push(MetricsRow {
            timestamp,
            total_profit_loss: record.total_profit_loss,
            unrealized_profit: record.unrealized_profit,
            unrealized_loss: record.unrealized_loss,
        });
    }

    tracing::info!(path = %path.display(), rows = rows.len(), "loaded metrics CSV");
    Ok(MetricsTable::new(rows))
}

pub fn append_csv(path: &Path, row: &MetricsRow) -> Result<(), String> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|err| format!("failed to create directory {}: {}", dir.display(), err))?;
    }

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|err| format!("failed to open metrics CSV {}: {}", path.display(), err))?;
    let is_empty = file
        .metadata()
        .map_err(|err| format!("failed to stat metrics CSV {}: {}", path.display(), err))?
        .len()
        == 0;

    let mut wtr = csv::Writer::from_writer(file);
    if is_empty {
        wtr.write_record(HEADER)
            .map_err(|err| format!("failed to write metrics CSV header: {}", err))?;
    }
    wtr.write_record([
        row.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        format!("{:.2}", row.total_profit_loss),
        format!("{:.2}", row.unrealized_profit),
        format!("{:.2}", row.unrealized_loss),
    ])
    .map_err(|err| format!("failed to write metrics CSV record: {}", err))?;
    wtr.flush()
        .map_err(|err| format!("failed to flush metrics CSV {}: {}", path.display(), err))?;

    tracing::debug!(path = %path.display(), wrote_header = is_empty, "appended metrics row");
    Ok(())
}
