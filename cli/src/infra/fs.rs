//! Host filesystem implementation of the `PathInspector` port.

use std::path::{Path, PathBuf};

use crate::application::ports::PathInspector;

/// Inspects paths on the machine evaluating the policy.
pub struct HostPathInspector;

impl PathInspector for HostPathInspector {
    fn resolve(&self, path: &Path) -> PathBuf {
        // Resolution failure (dangling symlink, nonexistent path) falls
        // back to the original string so it stays subject to the prefix
        // gate instead of bypassing it.
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    #[cfg(unix)]
    fn is_executable(&self, path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(&self, path: &Path) -> bool {
        path.exists()
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
