//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths
//! when a command fails.

use anyhow::{Context, Result};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen in
/// practice — `serde_json` only fails on non-finite floats and maps with
/// non-string keys, neither of which appear here).
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_schema() {
        let out = format_error("cannot parse org.yaml", "resolve_failed").expect("format");
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["error"], true);
        assert_eq!(value["message"], "cannot parse org.yaml");
        assert_eq!(value["code"], "resolve_failed");
    }
}
