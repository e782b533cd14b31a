use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single request summary, built once per request/response cycle.
///
/// Serialized field order matches declaration order. Optional fields are
/// omitted from the output entirely when absent — never emitted as `null`
/// or an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// ISO-8601 UTC timestamp with millisecond precision and trailing `Z`,
    /// e.g. `2024-01-01T00:00:00.000Z`.
    pub timestamp: String,
    /// HTTP method (uppercase: `GET`, `POST`, …).
    pub method: String,
    /// Request path, without the query string.
    pub path: String,
    /// Raw query string. `None` when the request carried none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_params: Option<String>,
    /// HTTP response status code.
    pub status: u16,
    /// Wall time spent in the rest of the pipeline, in milliseconds,
    /// rounded to 2 decimal places. Never negative.
    pub duration_ms: f64,
    /// Client IP address (no port). `None` when the transport does not
    /// expose a peer address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_host: Option<String>,
    /// `User-Agent` header value. `None` when absent or not valid UTF-8.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl LogRecord {
    /// Create a record stamped with the current time; optional fields start
    /// empty and are filled in by the caller.
    pub fn new(method: impl Into<String>, path: impl Into<String>, status: u16, duration_ms: f64) -> Self {
        Self {
            timestamp: now_timestamp(),
            method: method.into(),
            path: path.into(),
            query_params: None,
            status,
            duration_ms: round2(duration_ms),
            client_host: None,
            user_agent: None,
        }
    }
}

/// Current UTC time as ISO-8601 with millisecond precision and trailing `Z`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Round to 2 decimal places, clamping tiny negatives to zero.
pub fn round2(ms: f64) -> f64 {
    let rounded = (ms * 100.0).round() / 100.0;
    if rounded < 0.0 { 0.0 } else { rounded }
}
