pub mod config;
pub mod error;
pub mod record;
pub mod severity;

pub use config::{LogFormat, ServerConfig, SinkConfig};
pub use error::PasslogError;
pub use record::LogRecord;
pub use severity::Severity;
