use crate::figure::Figure;
use crate::logging::CapturedLogs;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use parking_lot::Mutex;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::path::PathBuf;
use std::sync::Arc;

pub struct App {
    figure: Figure,
    input: PathBuf,
    rows: usize,
    logs: Arc<Mutex<CapturedLogs>>,
    pub dirty: bool,
}

impl App {
    pub fn new(
        figure: Figure,
        input: PathBuf,
        rows: usize,
        logs: Arc<Mutex<CapturedLogs>>,
    ) -> Self {
        Self {
            figure,
            input,
            rows,
            logs,
            dirty: true,
        }
    }

    /// Returns `true` when the user asked to close the figure.
    pub fn on_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
                _ => false,
            },
            Event::Resize(_, _) => {
                self.dirty = true;
                false
            }
            _ => false,
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)].as_ref())
            .split(frame.area());

        self.figure.render(frame, chunks[0]);

        let mut spans = vec![
            Span::styled("q/Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                " close | {} ({} rows)",
                self.input.display(),
                self.rows
            )),
        ];
        if let Some(line) = self.logs.lock().last() {
            spans.push(Span::styled(
                format!(" | {line}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
        metrics::counter!("pnl.plot.draws_total").increment(1);
    }
}
