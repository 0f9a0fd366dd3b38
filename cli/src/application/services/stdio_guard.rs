//! Stdio MCP command validation.
//!
//! Stdio endpoints run a local subprocess with a writable workspace
//! mount, network access, and credentials in the environment, so they
//! pass through an ordered, short-circuiting gate sequence: feature
//! gate, absolute-path gate, resolved-prefix gate. Once all blocking
//! gates pass, host-side existence/executability checks run but only
//! ever warn — the command executes inside the sandbox container, not
//! on the host evaluating this policy.

use std::path::Path;

use archon_common::SecurityPolicy;

use crate::application::ports::PathInspector;

/// Outcome of validating one stdio command. Ephemeral — the resolver
/// folds it into the audit trail and drops it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StdioValidation {
    /// The gate's reason when a blocking gate failed.
    pub blocked: Option<String>,
    /// Advisory host-side findings; never block.
    pub warnings: Vec<String>,
}

impl StdioValidation {
    fn blocked(reason: String) -> Self {
        Self {
            blocked: Some(reason),
            warnings: Vec::new(),
        }
    }

    /// Whether a blocking gate failed.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.blocked.is_some()
    }
}

/// Run the stdio gate sequence for `command` under the org security
/// policy.
#[must_use]
pub fn validate_stdio_command(
    security: &SecurityPolicy,
    command: &str,
    paths: &impl PathInspector,
) -> StdioValidation {
    // Gate 1: stdio endpoints are opt-in per organization.
    if !security.allow_stdio_mcp {
        return StdioValidation::blocked(
            "stdio MCP servers are disabled by organization policy".to_string(),
        );
    }

    // Gate 2: relative paths resolve against an attacker-influenced
    // working directory; reject them outright.
    let cmd_path = Path::new(command);
    if !cmd_path.is_absolute() {
        return StdioValidation::blocked(format!(
            "stdio command must be an absolute path: {command}"
        ));
    }

    // Gate 3: resolved-prefix containment, component-wise. Both sides
    // are canonicalized (with fallback to the unresolved form) so a
    // symlinked command cannot point outside the allowed trees and a
    // sibling like /opt/allowed-evil never matches prefix /opt/allowed.
    if !security.allowed_stdio_prefixes.is_empty() {
        let resolved = paths.resolve(cmd_path);
        let command_dir = resolved.parent().unwrap_or(&resolved);
        let permitted = security.allowed_stdio_prefixes.iter().any(|prefix| {
            let resolved_prefix = paths.resolve(Path::new(prefix));
            command_dir.starts_with(&resolved_prefix)
        });
        if !permitted {
            return StdioValidation::blocked(format!(
                "stdio command {command} is outside the allowed prefixes: {}",
                security.allowed_stdio_prefixes.join(", ")
            ));
        }
    }

    // Advisory checks only from here on.
    let mut warnings = Vec::new();
    let resolved = paths.resolve(cmd_path);
    if !paths.exists(&resolved) {
        warnings.push(format!("stdio command not found on host: {command}"));
    } else if !paths.is_executable(&resolved) {
        warnings.push(format!("stdio command is not executable on host: {command}"));
    }

    StdioValidation {
        blocked: None,
        warnings,
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
