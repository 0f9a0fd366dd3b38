//! `archon config` — show the loaded organization policy.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::OrgConfigStore as _;
use crate::commands::fail;
use crate::output::human::HumanRenderer;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the organization policy summary
    Show,
    /// Print the organization policy path
    Path,
}

/// Run the config command.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show(app),
        ConfigCommand::Path => path(app),
    }
}

fn show(app: &AppContext) -> Result<ExitCode> {
    let path = app.org_store.path()?;
    let org = match app.org_store.load() {
        Ok(org) => org,
        Err(err) => return fail(app, err, "config_unreadable"),
    };
    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&org)?);
    } else {
        HumanRenderer::new(&app.output).render_org_config(&org, &path);
    }
    Ok(ExitCode::SUCCESS)
}

fn path(app: &AppContext) -> Result<ExitCode> {
    let path = app.org_store.path()?;
    println!("{}", path.display());
    Ok(ExitCode::SUCCESS)
}
