//! The log sink: severity threshold, output format, and destinations.
//!
//! A sink owns its destinations outright — there is no shared logger
//! registry, so any number of independent sinks can coexist in one process.
//! The console (stderr) destination is always attached; a file destination
//! only when the configuration carries a path.

use crate::file_writer::FileWriter;
use crate::format;
use passlog_core::record::now_timestamp;
use passlog_core::{LogFormat, LogRecord, PasslogError, Severity, SinkConfig};
use serde_json::json;
use std::io::{self, Write};
use tracing::error;

/// Formats request records and dispatches them to the configured
/// destinations.
///
/// Emission is fire-and-forget: once constructed, a sink never surfaces an
/// error to its caller. Encoding and destination failures are reported
/// through `tracing::error!` and swallowed, so logging can never fail a
/// request.
pub struct LogSink {
    level: Severity,
    format: LogFormat,
    file: Option<FileWriter>,
}

impl LogSink {
    /// Build a sink from its configuration. Fails only when a configured
    /// log file cannot be opened.
    pub fn new(config: &SinkConfig) -> Result<Self, PasslogError> {
        let mut sink = Self {
            level: config.level,
            format: config.format,
            file: None,
        };
        sink.configure(config)?;
        Ok(sink)
    }

    /// Apply a configuration. Idempotent: applying the same configuration
    /// twice never duplicates a destination. The console is structural; the
    /// file writer is kept when the path is unchanged, replaced when it
    /// differs, and dropped when the new configuration has no path.
    pub fn configure(&mut self, config: &SinkConfig) -> Result<(), PasslogError> {
        self.level = config.level;
        self.format = config.format;

        match &config.file {
            Some(path) => {
                let unchanged = self.file.as_ref().is_some_and(|w| w.path() == path);
                if !unchanged {
                    self.file = Some(FileWriter::open(path)?);
                }
            }
            None => self.file = None,
        }
        Ok(())
    }

    /// Severity threshold below which records are dropped.
    pub fn level(&self) -> Severity {
        self.level
    }

    /// Write one summary record at the given severity.
    ///
    /// Records below the severity threshold are dropped. Callers derive the
    /// severity from the response status via [`Severity::from_status`].
    pub fn emit(&self, record: &LogRecord, severity: Severity) {
        if severity < self.level {
            return;
        }
        match format::encode(record, self.format) {
            Ok(line) => self.dispatch(&line),
            Err(e) => error!(error = %e, "Failed to encode log record"),
        }
    }

    /// Write a raw message at error severity, outside the per-request
    /// summary — used for unhandled failures in the downstream pipeline.
    ///
    /// In structured mode the message is wrapped in a minimal JSON object so
    /// the output stream stays line-parseable.
    pub fn emit_error(&self, message: &str) {
        // Error is the top severity; it always clears the threshold.
        let line = match self.format {
            LogFormat::Structured => json!({
                "timestamp": now_timestamp(),
                "level": Severity::Error.as_str(),
                "message": message,
            })
            .to_string(),
            LogFormat::Text => format!(
                "level={} message={:?} timestamp={}",
                Severity::Error.as_str(),
                message,
                now_timestamp()
            ),
        };
        self.dispatch(&line);
    }

    /// Flush the file destination. Each line is already flushed on write;
    /// exposed for shutdown symmetry.
    pub fn flush(&self) {
        if let Some(writer) = &self.file {
            if let Err(e) = writer.flush() {
                error!(error = %e, "Failed to flush log file");
            }
        }
    }

    /// One atomic line write per destination. Destination failures are
    /// reported on the diagnostic console and swallowed.
    fn dispatch(&self, line: &str) {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        {
            let mut console = io::stderr().lock();
            if let Err(e) = console.write_all(buf.as_bytes()) {
                error!(error = %e, "Failed to write log line to console");
            }
        }

        if let Some(writer) = &self.file {
            if let Err(e) = writer.write_line(line) {
                error!(
                    error = %e,
                    path = %writer.path().display(),
                    "Failed to write log line to file"
                );
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
