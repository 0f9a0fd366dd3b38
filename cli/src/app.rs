//! Application context — unified state passed to every command handler.
//!
//! Constructed once in `Cli::run()` and passed as `&AppContext` to all
//! command handlers, so adding a cross-cutting concern is one field
//! change here with zero command signatures touched.

use crate::infra::config::{YamlOrgConfigStore, YamlProjectConfigStore};
use crate::infra::fs::HostPathInspector;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Organization policy store.
    pub org_store: YamlOrgConfigStore,
    /// Workspace project policy store.
    pub project_store: YamlProjectConfigStore,
    /// Host filesystem inspector for stdio command gates.
    pub paths: HostPathInspector,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            org_store: YamlOrgConfigStore,
            project_store: YamlProjectConfigStore,
            paths: HostPathInspector,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }
}
