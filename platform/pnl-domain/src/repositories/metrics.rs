use crate::entities::metrics_table::MetricsTable;
use crate::value_objects::metrics_row::MetricsRow;
use std::path::Path;

pub trait MetricsSource {
    fn load_metrics(&self, path: &Path) -> Result<MetricsTable, String>;
}

pub trait MetricsSink {
    fn append_metrics(&self, path: &Path, row: &MetricsRow) -> Result<(), String>;
}
