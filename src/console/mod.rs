//! Job output sink.
//!
//! Everything the approver-facing job log shows (approver list, decision,
//! input parameters, error lines) goes through a [`Console`]. Diagnostics go
//! through `tracing` instead.

use std::io::Write;
use std::sync::Mutex;

/// Capability to emit one line of job output.
pub trait Console: Send + Sync {
    fn emit(&self, line: &str);
}

/// Writes job output to standard output.
#[derive(Debug, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn emit(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout is not worth failing the job over.
        let _ = writeln!(stdout, "{}", line);
        let _ = stdout.flush();
    }
}

/// Collects emitted lines in memory (for testing and embedding).
#[derive(Debug, Default)]
pub struct RecordingConsole {
    lines: Mutex<Vec<String>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Console for RecordingConsole {
    fn emit(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
    }
}
