//! Typed domain error enums.
//!
//! Policy rejections are never errors — they become audit records on the
//! effective configuration. The enums here cover the genuine failure
//! surfaces: a missing workspace and an unreadable project document.
//! All types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

/// Errors raised while resolving an effective configuration.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Workspace directory not found: {0}")]
    WorkspaceNotFound(String),

    #[error("Cannot read project configuration {path}: {reason}")]
    ProjectConfig { path: String, reason: String },
}

// ── Unit tests ───────────────────────────────────────────────────────────────
