//! Request interceptor: wraps exactly one request/response cycle and hands
//! a summary record to the sink.
//!
//! Installed as an axum layer via `middleware::from_fn_with_state`. The
//! interceptor measures the continuation with a monotonic clock, recovers
//! unhandled panics from downstream handlers into a generic 500 response,
//! and emits a cancellation record when the request future is dropped
//! before the continuation resolves (client disconnect).
//!
//! The interceptor holds no cross-request state; each invocation owns its
//! local captures, so concurrent requests cannot interfere.

use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use passlog_core::{LogRecord, Severity};
use passlog_sink::LogSink;
use serde_json::json;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Status recorded for requests cancelled before a response was produced
/// (nginx's client-closed-request convention). Falls in the 4xx band, so
/// cancelled requests log at warning severity.
const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Log one summary record per request/response cycle.
///
/// Install with `axum::middleware::from_fn_with_state(sink, log_requests)`.
/// Severity follows the response status: 5xx → error, 4xx → warning,
/// everything else → info. A panic in the downstream pipeline is converted
/// to a generic 500 response and logged as a separate raw error line before
/// the summary; logging itself can never fail the request.
pub async fn log_requests(
    State(sink): State<Arc<LogSink>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let mut guard = CancelGuard::new(Arc::clone(&sink), start, RequestMeta::capture(&request));

    let response = match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            sink.emit_error(&format!(
                "Unhandled exception: {}",
                panic_message(panic.as_ref())
            ));
            internal_error_response()
        }
    };

    if let Some(meta) = guard.disarm() {
        let status = response.status().as_u16();
        let record = meta.into_record(status, elapsed_ms(start));
        sink.emit(&record, Severity::from_status(status));
    }

    response
}

/// Milliseconds elapsed since `start`. Monotonic, so never negative.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// The generic response substituted when the downstream pipeline fails.
fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"detail": "Internal server error"})),
    )
        .into_response()
}

/// Best-effort extraction of a panic payload's message.
fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

// ── Request metadata ─────────────────────────────────────────────────────────

/// Request fields captured before the request is consumed by the rest of
/// the pipeline.
struct RequestMeta {
    method: String,
    path: String,
    query_params: Option<String>,
    client_host: Option<String>,
    user_agent: Option<String>,
}

impl RequestMeta {
    fn capture(request: &Request) -> Self {
        let query_params = request
            .uri()
            .query()
            .filter(|q| !q.is_empty())
            .map(str::to_string);
        // Present when the server is built with connect-info; absent under
        // plain in-process calls.
        let client_host = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());
        // Non-UTF-8 header values are treated as absent.
        let user_agent = request
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query_params,
            client_host,
            user_agent,
        }
    }

    fn into_record(self, status: u16, duration_ms: f64) -> LogRecord {
        let mut record = LogRecord::new(self.method, self.path, status, duration_ms);
        record.query_params = self.query_params;
        record.client_host = self.client_host;
        record.user_agent = self.user_agent;
        record
    }
}

// ── Cancellation guard ───────────────────────────────────────────────────────

/// Emits a summary record when the request future is dropped before the
/// response is ready. A completed request disarms the guard first, so no
/// request produces both a cancelled record and a normal summary.
struct CancelGuard {
    sink: Arc<LogSink>,
    start: Instant,
    meta: Option<RequestMeta>,
}

impl CancelGuard {
    fn new(sink: Arc<LogSink>, start: Instant, meta: RequestMeta) -> Self {
        Self {
            sink,
            start,
            meta: Some(meta),
        }
    }

    /// Take back the captured metadata, leaving the drop handler nothing
    /// to log.
    fn disarm(&mut self) -> Option<RequestMeta> {
        self.meta.take()
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if let Some(meta) = self.meta.take() {
            debug!(
                method = %meta.method,
                path = %meta.path,
                "Request cancelled before completion"
            );
            let record = meta.into_record(CLIENT_CLOSED_REQUEST, elapsed_ms(self.start));
            self.sink
                .emit(&record, Severity::from_status(CLIENT_CLOSED_REQUEST));
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
