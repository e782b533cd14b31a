use crate::severity::Severity;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output encoding for emitted log lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One compact JSON object per line, present fields only.
    Structured,
    /// Fixed-order `key=value` line.
    Text,
}

/// Sink settings — applied once at construction, not mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Minimum severity an entry needs to be written.
    #[serde(default = "default_level")]
    pub level: Severity,
    #[serde(default = "default_format")]
    pub format: LogFormat,
    /// Optional log file. Missing parent directories are created when the
    /// sink opens it; the console destination is always present.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Configuration for the demo server binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default)]
    pub log: SinkConfig,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_level() -> Severity {
    Severity::Info
}
fn default_format() -> LogFormat {
    LogFormat::Structured
}
fn default_listen() -> String {
    "0.0.0.0:8000".into()
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            file: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            log: SinkConfig::default(),
        }
    }
}

// ── Impls ─────────────────────────────────────────────────────

impl SinkConfig {
    /// Convenience for programmatic construction alongside serde loading.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file merged with `PASSLOG_*`
    /// environment overrides (e.g. `PASSLOG_LOG_LEVEL=warning`).
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: ServerConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("PASSLOG_").split("_"))
            .extract()?;
        Ok(config)
    }
}
