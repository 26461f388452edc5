//! Human-readable report output.
//!
//! Status lines look like `[SUCCESS] Root endpoint working`, with the tag
//! colored per [`Status`]. Detail lines are indented two spaces. Diagnostics
//! go through `tracing` on stderr; this module only ever writes the report.

use console::Style;
use parking_lot::Mutex;
use std::fmt::Display;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Success,
    Warning,
    Error,
}

impl Status {
    pub fn tag(&self) -> &'static str {
        match self {
            Status::Info => "INFO",
            Status::Success => "SUCCESS",
            Status::Warning => "WARNING",
            Status::Error => "ERROR",
        }
    }

    fn style(&self) -> Style {
        match self {
            Status::Info => Style::new().blue(),
            Status::Success => Style::new().green(),
            Status::Warning => Style::new().yellow().bold(),
            Status::Error => Style::new().red(),
        }
    }
}

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Cloneable handle to the report sink.
#[derive(Clone)]
pub struct Console {
    color: bool,
    sink: Sink,
}

impl Console {
    pub fn stdout(color: bool) -> Self {
        Self::with_writer(color, io::stdout())
    }

    pub fn with_writer(color: bool, writer: impl Write + Send + 'static) -> Self {
        let writer: Box<dyn Write + Send> = Box::new(writer);
        Self {
            color,
            sink: Arc::new(Mutex::new(writer)),
        }
    }

    /// Console without colors that records everything it prints.
    pub fn capture() -> (Self, Captured) {
        let captured = Captured::default();
        (Self::with_writer(false, captured.clone()), captured)
    }

    pub fn status(&self, status: Status, message: impl Display) {
        let tag = format!("[{}]", status.tag());
        let tag = if self.color {
            status.style().force_styling(true).apply_to(tag).to_string()
        } else {
            tag
        };
        self.write_line(format_args!("{tag} {message}"));
    }

    pub fn info(&self, message: impl Display) {
        self.status(Status::Info, message);
    }

    pub fn success(&self, message: impl Display) {
        self.status(Status::Success, message);
    }

    pub fn warning(&self, message: impl Display) {
        self.status(Status::Warning, message);
    }

    pub fn error(&self, message: impl Display) {
        self.status(Status::Error, message);
    }

    /// `  Label: value`
    pub fn detail(&self, label: &str, value: impl Display) {
        self.write_line(format_args!("  {label}: {value}"));
    }

    pub fn rule(&self, ch: char, width: usize) {
        let line = ch.to_string().repeat(width);
        self.write_line(format_args!("{line}"));
    }

    pub fn blank(&self) {
        self.write_line(format_args!(""));
    }

    fn write_line(&self, args: std::fmt::Arguments<'_>) {
        let mut sink = self.sink.lock();
        // A closed stdout (e.g. `| head`) must not abort the run.
        let _ = writeln!(sink, "{args}");
        let _ = sink.flush();
    }
}

/// Shared in-memory buffer behind [`Console::capture`].
#[derive(Clone, Default)]
pub struct Captured {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Captured {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for Captured {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
