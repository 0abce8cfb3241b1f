//! Severity-coded log channel.
//!
//! Every [`Simulator`](crate::core::Simulator) owns one channel; there is no
//! process-wide log state. Hosts drain the channel after each step or run,
//! which returns the accumulated entries and clears them.

use serde::Serialize;

/// Severity of a log entry. The numeric values are part of the host
/// protocol and appear verbatim in drained entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LogCode {
    /// Informational progress messages.
    Info = 200,
    /// Trace-level detail (flushes, memory diagnostics).
    Trace = 300,
    /// Recoverable or advisory problems (runaway execution, bad encodings).
    Warning = 400,
    /// Fatal errors that halted the run.
    Error = 404,
}

/// One drained log record.
#[derive(Clone, Debug, Serialize)]
pub struct LogEntry {
    /// Severity code (200, 300, 400, or 404).
    pub code: u16,
    /// Message text.
    pub message: String,
}

/// Accumulating log channel owned by a simulator instance.
#[derive(Default)]
pub struct LogChannel {
    entries: Vec<LogEntry>,
}

impl LogChannel {
    /// Appends an entry with the given severity.
    pub fn push(&mut self, code: LogCode, message: impl Into<String>) {
        self.entries.push(LogEntry {
            code: code as u16,
            message: message.into(),
        });
    }

    /// Returns all accumulated entries and clears the channel.
    pub fn drain(&mut self) -> Vec<LogEntry> {
        std::mem::take(&mut self.entries)
    }

    /// True when nothing has been logged since the last drain.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears the channel without returning the entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
