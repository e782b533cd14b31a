use passlog_core::{LogFormat, LogRecord, PasslogError};

/// Encode a record in the configured output format.
pub fn encode(record: &LogRecord, format: LogFormat) -> Result<String, PasslogError> {
    match format {
        LogFormat::Structured => structured(record),
        LogFormat::Text => Ok(text(record)),
    }
}

/// One compact JSON object per line — exactly the present fields, no extra
/// whitespace. Absent optionals are omitted by the record's serde attributes.
pub fn structured(record: &LogRecord) -> Result<String, PasslogError> {
    Ok(serde_json::to_string(record)?)
}

/// Fixed-order `key=value` line:
/// `method=<M> path=<P> status=<S> duration=<D>ms timestamp=<T>`.
pub fn text(record: &LogRecord) -> String {
    format!(
        "method={} path={} status={} duration={:.2}ms timestamp={}",
        record.method, record.path, record.status, record.duration_ms, record.timestamp
    )
}
