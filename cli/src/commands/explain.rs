//! `archon explain` — render the full audit trail for a resolution.

use std::process::ExitCode;

use anyhow::Result;
use serde_json::json;

use crate::app::AppContext;
use crate::commands::{fail, resolve_scope, ScopeArgs};
use crate::output::human::HumanRenderer;

/// Run the explain command.
pub fn run(app: &AppContext, scope: &ScopeArgs) -> Result<ExitCode> {
    let effective = match resolve_scope(app, scope) {
        Ok(effective) => effective,
        Err(err) => return fail(app, err, "explain_failed"),
    };

    if app.is_json() {
        // The explain view is the audit trail alone; the settings payload
        // comes from `resolve`.
        let trail = json!({
            "decisions": effective.decisions,
            "blockedItems": effective.blocked_items,
            "deniedAdditions": effective.denied_additions,
            "warnings": effective.warnings,
        });
        println!("{}", serde_json::to_string_pretty(&trail)?);
    } else {
        HumanRenderer::new(&app.output).render_explain(&effective);
    }
    Ok(ExitCode::SUCCESS)
}
