//! Console output for the import run.
//!
//! Every user-facing line goes through a [`Console`], which writes it to its
//! sink and keeps a copy so callers can inspect what was reported.

use std::io::{self, Stdout, Write};

/// Log level, rendered as a line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Info => "",
            LogLevel::Success => "✅ ",
            LogLevel::Warning => "⚠️  ",
            LogLevel::Error => "❌ ",
        }
    }
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Indentation level (for nested lines)
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// The line as written to the console.
    pub fn render(&self) -> String {
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{}{}", indent, self.level.prefix(), self.message)
    }
}

/// Writes log entries to a sink and remembers them.
///
/// A failed write does not interrupt the run; the first failure is kept
/// and can be collected with [`Console::take_error`].
pub struct Console<W: Write> {
    out: W,
    history: Vec<LogEntry>,
    write_error: Option<io::Error>,
}

impl Console<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out, history: Vec::new(), write_error: None }
    }

    /// Write an entry and record it.
    pub fn log(&mut self, entry: LogEntry) {
        let result = writeln!(self.out, "{}", entry.render());
        self.record(result);
        self.history.push(entry);
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.write_error.get_or_insert(e);
        }
    }

    /// First write failure since the last call, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.write_error.take()
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::info(msg));
    }

    pub fn success(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::success(msg));
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::warning(msg));
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::error(msg));
    }

    pub fn info_indent(&mut self, msg: impl Into<String>, indent: u8) {
        self.log(LogEntry::info(msg).with_indent(indent));
    }

    pub fn blank(&mut self) {
        let result = writeln!(self.out);
        self.record(result);
    }

    /// Write a question without a trailing newline and flush it.
    pub fn prompt(&mut self, question: &str) -> io::Result<()> {
        write!(self.out, "{}", question)?;
        self.out.flush()
    }

    /// Everything logged so far.
    pub fn entries(&self) -> &[LogEntry] {
        &self.history
    }

    /// Number of entries at `level`.
    pub fn count(&self, level: LogLevel) -> usize {
        self.history.iter().filter(|e| e.level == level).count()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
