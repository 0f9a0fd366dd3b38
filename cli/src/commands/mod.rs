//! Command implementations

pub mod config;
pub mod explain;
pub mod resolve;
pub mod version;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::OrgConfigStore as _;
use crate::application::services::resolver;
use crate::domain::config::EffectiveConfig;
use crate::domain::ResolveError;
use crate::output::json;

/// Scope shared by `resolve` and `explain`: which team and workspace the
/// effective configuration is computed for.
#[derive(Args)]
pub struct ScopeArgs {
    /// Team whose profile applies
    #[arg(long, env = "ARCHON_TEAM")]
    pub team: Option<String>,

    /// Workspace directory carrying an optional project configuration
    #[arg(long)]
    pub workspace: Option<PathBuf>,
}

/// Load the organization policy and resolve the effective configuration
/// for the given scope.
pub(crate) fn resolve_scope(app: &AppContext, scope: &ScopeArgs) -> Result<EffectiveConfig> {
    if let Some(dir) = scope.workspace.as_deref()
        && !dir.is_dir()
    {
        return Err(ResolveError::WorkspaceNotFound(dir.display().to_string()).into());
    }
    let org = app.org_store.load()?;
    let team = scope.team.as_deref().unwrap_or("");
    resolver::resolve_for_workspace(
        &org,
        team,
        scope.workspace.as_deref(),
        &app.project_store,
        &app.paths,
    )
}

/// Report a command failure on the `--json` path as an error envelope,
/// or pass the error through for the human path.
pub(crate) fn fail(app: &AppContext, err: anyhow::Error, code: &str) -> Result<ExitCode> {
    if app.is_json() {
        println!("{}", json::format_error(&format!("{err:#}"), code)?);
        return Ok(ExitCode::FAILURE);
    }
    Err(err)
}
