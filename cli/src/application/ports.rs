//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `archon_common` — never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use archon_common::{OrgConfig, ProjectConfig};

// ── Policy document stores ───────────────────────────────────────────────────

/// Abstracts loading of the organization policy document.
pub trait OrgConfigStore {
    /// Load the organization policy, falling back to defaults when the
    /// document does not exist.
    fn load(&self) -> Result<OrgConfig>;
    /// The path the policy is loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be determined (no home
    /// directory).
    fn path(&self) -> Result<PathBuf>;
}

/// Abstracts the single project-configuration read the resolver may do.
pub trait ProjectConfigStore {
    /// Load the project document for a workspace directory.
    ///
    /// Returns `None` when the workspace carries no project document —
    /// that is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the document exists but cannot be read or
    /// parsed; this must propagate to the caller rather than being
    /// swallowed.
    fn load(&self, workspace: &Path) -> Result<Option<ProjectConfig>>;
}

// ── Filesystem metadata port ─────────────────────────────────────────────────

/// Abstracts the filesystem metadata checks the stdio command gates
/// need, so policy evaluation stays testable without a real filesystem.
pub trait PathInspector {
    /// Canonical, symlink-resolved form of `path`.
    ///
    /// Implementations fall back to returning `path` unchanged when
    /// resolution fails — a dangling symlink must not bypass the prefix
    /// gate through a resolution error.
    fn resolve(&self, path: &Path) -> PathBuf;
    /// Whether `path` exists on the host.
    fn exists(&self, path: &Path) -> bool;
    /// Whether `path` is executable on the host.
    fn is_executable(&self, path: &Path) -> bool;
}
