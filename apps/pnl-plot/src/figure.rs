//! The performance chart: three line series against a shared time axis.
//!
//! Rendering only reads the prepared [`Figure`], so drawing the same table
//! into the same area always produces the same buffer.

use chrono::DateTime;
use pnl_domain::entities::metrics_table::MetricsTable;
use pnl_domain::value_objects::series::{Series, SeriesKind};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Frame;

pub const TITLE: &str = "Performance Metrics Over Time";
pub const X_AXIS_TITLE: &str = "Time";
pub const Y_AXIS_TITLE: &str = "Value";

/// Figure width to height, in visual units.
pub const ASPECT: (u32, u32) = (10, 6);

/// A terminal cell is roughly twice as tall as it is wide.
const CELL_HEIGHT_TO_WIDTH: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    series: Vec<Series>,
    x_bounds: (f64, f64),
    y_bounds: (f64, f64),
}

impl Figure {
    pub fn from_table(table: &MetricsTable) -> Self {
        Self {
            series: table.series(),
            x_bounds: table.time_bounds(),
            y_bounds: table.value_bounds(),
        }
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn x_bounds(&self) -> (f64, f64) {
        self.x_bounds
    }

    pub fn y_bounds(&self) -> (f64, f64) {
        self.y_bounds
    }

    /// Draws the figure centered in `area` at the fixed aspect ratio.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (x_min, x_max) = self.x_bounds;
        let (y_min, y_max) = self.y_bounds;

        let datasets: Vec<Dataset> = self
            .series
            .iter()
            .map(|series| {
                Dataset::default()
                    .name(series.label())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(series_color(series.kind)))
                    .data(&series.points)
            })
            .collect();

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(Line::from(TITLE).centered())
                    .borders(Borders::ALL),
            )
            .x_axis(
                Axis::default()
                    .title(X_AXIS_TITLE)
                    .bounds([x_min, x_max])
                    .labels(time_labels(x_min, x_max)),
            )
            .y_axis(
                Axis::default()
                    .title(Y_AXIS_TITLE)
                    .bounds([y_min, y_max])
                    .labels(value_labels(y_min, y_max)),
            )
            .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)));

        frame.render_widget(chart, figure_area(area));
    }
}

fn series_color(kind: SeriesKind) -> Color {
    match kind {
        SeriesKind::TotalProfitLoss => Color::Cyan,
        SeriesKind::UnrealizedProfit => Color::Green,
        SeriesKind::UnrealizedLoss => Color::Red,
    }
}

/// Largest rectangle centered in `area` whose visual aspect is [`ASPECT`].
pub fn figure_area(area: Rect) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let (aspect_w, aspect_h) = ASPECT;
    let width = u32::from(area.width);
    let height = u32::from(area.height);

    let (fig_w, fig_h) = if width * aspect_h >= height * aspect_w * CELL_HEIGHT_TO_WIDTH {
        (
            height * aspect_w * CELL_HEIGHT_TO_WIDTH / aspect_h,
            height,
        )
    } else {
        (
            width,
            width * aspect_h / (aspect_w * CELL_HEIGHT_TO_WIDTH),
        )
    };
    let fig_w = fig_w.clamp(1, width);
    let fig_h = fig_h.clamp(1, height);

    Rect {
        x: area.x + ((width - fig_w) / 2) as u16,
        y: area.y + ((height - fig_h) / 2) as u16,
        width: fig_w as u16,
        height: fig_h as u16,
    }
}

fn time_labels(min: f64, max: f64) -> Vec<Line<'static>> {
    let mid = (min + max) / 2.0;
    vec![
        Line::from(format_time(min)),
        Line::from(format_time(mid)),
        Line::from(format_time(max)),
    ]
}

fn format_time(x: f64) -> String {
    DateTime::from_timestamp(x.round() as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| format!("{x:.0}"))
}

fn value_labels(min: f64, max: f64) -> Vec<Line<'static>> {
    let mid = min / 2.0 + max / 2.0;
    vec![
        Line::from(format_value(min)),
        Line::from(format_value(mid)),
        Line::from(format_value(max)),
    ]
}

fn format_value(y: f64) -> String {
    if y.abs() < 1e9 {
        format!("{y:.2}")
    } else {
        format!("{y:.2e}")
    }
}
