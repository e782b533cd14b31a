use thiserror::Error;

/// Unified error type for Passlog.
///
/// Only construction-time operations (opening a log file, loading
/// configuration) and record encoding produce these; the per-request
/// logging path never surfaces an error to the caller.
#[derive(Error, Debug)]
pub enum PasslogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}
