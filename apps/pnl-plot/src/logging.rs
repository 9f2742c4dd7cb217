//! Log capture while the figure owns the terminal.
//!
//! Raw mode and the alternate screen make stderr output unreadable, so every
//! formatted event is held here instead. The footer shows the newest line and
//! `replay_to_stderr` prints the rest once the terminal is restored.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Default)]
pub struct CapturedLogs {
    lines: Vec<String>,
}

impl CapturedLogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores each non-blank line of one formatted event.
    pub fn record(&mut self, text: &str) {
        self.lines.extend(
            text.lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

/// `MakeWriter` handing out one buffer per event; the event is recorded when
/// the buffer is dropped.
#[derive(Clone)]
pub struct CaptureWriter {
    logs: Arc<Mutex<CapturedLogs>>,
}

impl CaptureWriter {
    pub fn new(logs: Arc<Mutex<CapturedLogs>>) -> Self {
        Self { logs }
    }
}

impl<'a> MakeWriter<'a> for CaptureWriter {
    type Writer = EventBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        EventBuffer {
            logs: self.logs.clone(),
            bytes: Vec::new(),
        }
    }
}

pub struct EventBuffer {
    logs: Arc<Mutex<CapturedLogs>>,
    bytes: Vec<u8>,
}

impl Write for EventBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventBuffer {
    fn drop(&mut self) {
        if !self.bytes.is_empty() {
            self.logs.lock().record(&String::from_utf8_lossy(&self.bytes));
        }
    }
}

pub fn replay_to_stderr(logs: &Mutex<CapturedLogs>) {
    let lines = logs.lock().take_lines();
    let mut stderr = io::stderr().lock();
    for line in lines {
        let _ = writeln!(stderr, "{line}");
    }
}
