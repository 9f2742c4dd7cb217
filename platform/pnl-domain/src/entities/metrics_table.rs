use crate::services::bounds::{time_bounds, value_bounds};
use crate::value_objects::metrics_row::MetricsRow;
use crate::value_objects::series::{Series, SeriesKind};

/// Rows of a metrics file in file order. Read once, never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsTable {
    rows: Vec<MetricsRow>,
}

impl MetricsTable {
    pub fn new(rows: Vec<MetricsRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MetricsRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, kind: SeriesKind) -> Series {
        let points = self
            .rows
            .iter()
            .map(|row| {
                let y = match kind {
                    SeriesKind::TotalProfitLoss => row.total_profit_loss,
                    SeriesKind::UnrealizedProfit => row.unrealized_profit,
                    SeriesKind::UnrealizedLoss => row.unrealized_loss,
                };
                (row.x(), y)
            })
            .collect();
        Series { kind, points }
    }

    /// The three plotted series, in legend order.
    pub fn series(&self) -> Vec<Series> {
        SeriesKind::ALL
            .iter()
            .map(|kind| self.column(*kind))
            .collect()
    }

    pub fn time_bounds(&self) -> (f64, f64) {
        time_bounds(self.rows.iter().map(MetricsRow::x))
    }

    pub fn value_bounds(&self) -> (f64, f64) {
        value_bounds(&self.series())
    }
}

#[cfg(test)]
mod tests {
    use super::MetricsTable;
    use crate::value_objects::metrics_row::MetricsRow;
    use crate::value_objects::series::SeriesKind;
    use chrono::{TimeZone, Utc};

    fn row(day: u32, total: f64, profit: f64, loss: f64) -> MetricsRow {
        MetricsRow {
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            total_profit_loss: total,
            unrealized_profit: profit,
            unrealized_loss: loss,
        }
    }

    #[test]
    fn series_follow_legend_order_and_row_order() {
        let table = MetricsTable::new(vec![row(1, 100.0, 20.0, -5.0), row(2, 150.0, 25.0, -10.0)]);
        let series = table.series();

        let labels: Vec<&str> = series.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec!["Total Profit/Loss", "Unrealized Profit", "Unrealized Loss"]
        );

        let day1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().timestamp() as f64;
        assert_eq!(series[0].points[0], (day1, 100.0));
        assert_eq!(series[1].points[1].1, 25.0);
        assert_eq!(series[2].points[1].1, -10.0);
    }

    #[test]
    fn empty_table_yields_three_empty_series_and_default_bounds() {
        let table = MetricsTable::default();
        let series = table.series();
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|s| s.is_empty()));
        assert_eq!(table.time_bounds(), (0.0, 1.0));
        assert_eq!(table.value_bounds(), (0.0, 1.0));
    }

    #[test]
    fn time_bounds_cover_rows_outside_file_order() {
        let table = MetricsTable::new(vec![
            row(2, 1.0, 1.0, 1.0),
            row(1, 1.0, 1.0, 1.0),
            row(3, 1.0, 1.0, 1.0),
        ]);
        let (min, max) = table.time_bounds();
        assert_eq!(min, table.rows()[1].x());
        assert_eq!(max, table.rows()[2].x());
        for series in table.series() {
            assert!(series.points.iter().all(|(x, _)| *x >= min && *x <= max));
        }
    }

    #[test]
    fn time_bounds_cover_first_and_last_row() {
        let table = MetricsTable::new(vec![row(1, 1.0, 1.0, 1.0), row(3, 1.0, 1.0, 1.0)]);
        let (min, max) = table.time_bounds();
        assert_eq!(min, table.rows()[0].x());
        assert_eq!(max, table.rows()[1].x());
        assert_eq!(table.column(SeriesKind::UnrealizedLoss).points.len(), 2);
    }
}
