//! Append-only log file destination.
//!
//! When `SinkConfig.file` is set, formatted lines are appended to the
//! specified file. Missing parent directories are created when the writer
//! opens.
//!
//! Thread-safe: uses a `Mutex<BufWriter>` internally so concurrent request
//! handlers can write without interleaving partial lines — each emission is
//! one `write_all` of the full `line\n` buffer, flushed before the lock is
//! released.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// An append-only log file writer.
///
/// Call [`FileWriter::write_line`] to append one formatted line.
pub struct FileWriter {
    path: PathBuf,
    inner: Mutex<BufWriter<File>>,
}

impl FileWriter {
    /// Open (or create) the log file in append mode.
    pub fn open(path: &Path) -> io::Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        info!(path = %path.display(), "Log file writer opened");

        Ok(Self {
            path: path.to_path_buf(),
            inner: Mutex::new(BufWriter::new(file)),
        })
    }

    /// The path this writer appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a single line (newline added here).
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        let mut writer = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer lock poisoned"))?;
        writer.write_all(&buf)?;
        writer.flush()
    }

    /// Flush buffered data to disk.
    pub fn flush(&self) -> io::Result<()> {
        let mut writer = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer lock poisoned"))?;
        writer.flush()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
