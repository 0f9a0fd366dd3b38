//! `archon resolve` — compute the effective configuration.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::{fail, resolve_scope, ScopeArgs};
use crate::output::human::HumanRenderer;

/// Run the resolve command.
pub fn run(app: &AppContext, scope: &ScopeArgs) -> Result<ExitCode> {
    let effective = match resolve_scope(app, scope) {
        Ok(effective) => effective,
        Err(err) => return fail(app, err, "resolve_failed"),
    };

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&effective)?);
    } else {
        HumanRenderer::new(&app.output).render_effective(&effective);
    }
    Ok(ExitCode::SUCCESS)
}
