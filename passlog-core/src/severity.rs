use serde::{Deserialize, Serialize};

/// Log severity, ordered for threshold comparison.
///
/// Serialized lowercase (`"debug"`, `"info"`, `"warning"`, `"error"`) so it
/// can be written straight into config files. Per-request summary entries
/// only ever use the upper three; `debug` exists as the most permissive
/// sink threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Severity of a request summary, derived from the response status:
    /// 5xx → error, 4xx → warning, everything else → info.
    pub fn from_status(status: u16) -> Self {
        match status {
            500..=599 => Severity::Error,
            400..=499 => Severity::Warning,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Status banding ───────────────────────────────────────────

    #[test]
    fn server_errors_map_to_error() {
        assert_eq!(Severity::from_status(500), Severity::Error);
        assert_eq!(Severity::from_status(503), Severity::Error);
        assert_eq!(Severity::from_status(599), Severity::Error);
    }

    #[test]
    fn client_errors_map_to_warning() {
        assert_eq!(Severity::from_status(400), Severity::Warning);
        assert_eq!(Severity::from_status(404), Severity::Warning);
        assert_eq!(Severity::from_status(499), Severity::Warning);
    }

    #[test]
    fn everything_else_maps_to_info() {
        assert_eq!(Severity::from_status(100), Severity::Info);
        assert_eq!(Severity::from_status(200), Severity::Info);
        assert_eq!(Severity::from_status(204), Severity::Info);
        assert_eq!(Severity::from_status(301), Severity::Info);
        assert_eq!(Severity::from_status(399), Severity::Info);
    }

    // ── Ordering (threshold comparison) ──────────────────────────

    #[test]
    fn ordering_matches_threshold_semantics() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    // ── Serde ────────────────────────────────────────────────────

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Info).unwrap(), "\"info\"");
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
    }

    #[test]
    fn deserializes_from_lowercase() {
        let s: Severity = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(s, Severity::Error);
        let s: Severity = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(s, Severity::Debug);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Info.as_str(), "info");
    }
}
