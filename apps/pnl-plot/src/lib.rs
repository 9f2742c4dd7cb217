mod app;
pub mod figure;
pub mod logging;

use crate::app::App;
use crate::figure::Figure;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use parking_lot::Mutex;
use pnl_domain::entities::metrics_table::MetricsTable;
use pnl_domain::repositories::metrics::{MetricsSink, MetricsSource};
use pnl_domain::value_objects::metrics_row::MetricsRow;
use pnl_infrastructure::metrics_csv::CsvMetricsStore;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone)]
pub struct PlotOpts {
    pub input: PathBuf,
    pub logs: Arc<Mutex<logging::CapturedLogs>>,
}

/// Loads the metrics file, shows the figure and blocks until it is closed.
pub fn run(opts: PlotOpts) -> Result<(), String> {
    let table = load_table(&opts.input)?;
    show(&table, opts)
}

pub fn load_table(path: &Path) -> Result<MetricsTable, String> {
    CsvMetricsStore::new().load_metrics(path)
}

pub fn append_row(path: &Path, row: &MetricsRow) -> Result<(), String> {
    CsvMetricsStore::new().append_metrics(path, row)?;
    tracing::info!(path = %path.display(), timestamp = %row.timestamp, "appended metrics row");
    Ok(())
}

fn show(table: &MetricsTable, opts: PlotOpts) -> Result<(), String> {
    let app = App::new(
        Figure::from_table(table),
        opts.input,
        table.len(),
        opts.logs,
    );

    enable_raw_mode().map_err(|err| format!("failed to enable raw mode: {err}"))?;

    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(format!("failed to enter alternate screen: {err}"));
    }

    let result = init_and_run(app);

    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
    let _ = disable_raw_mode();
    let _ = stdout.execute(crossterm::cursor::Show);

    result
}

fn init_and_run(mut app: App) -> Result<(), String> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|err| format!("failed to init terminal: {err}"))?;
    terminal
        .hide_cursor()
        .map_err(|err| format!("failed to hide cursor: {err}"))?;
    terminal
        .clear()
        .map_err(|err| format!("failed to clear screen: {err}"))?;

    tracing::debug!("figure displayed");
    run_loop(&mut terminal, &mut app)
}

fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), String> {
    loop {
        if app.dirty {
            terminal
                .draw(|frame| app.draw(frame))
                .map_err(|err| format!("terminal draw failed: {err}"))?;
            app.dirty = false;
        }

        let event = crossterm::event::read()
            .map_err(|err| format!("failed to read terminal event: {err}"))?;
        if app.on_event(event) {
            tracing::debug!("figure closed");
            return Ok(());
        }
    }
}
