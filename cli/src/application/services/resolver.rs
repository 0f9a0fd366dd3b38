//! The effective-configuration resolver.
//!
//! Merges organization defaults, team additions, and project additions
//! under the organization security policy, producing the effective
//! configuration plus a complete, append-ordered audit trail. Policy
//! rejections never raise errors — every rejection becomes a structured
//! record on the result. The sole error surface is reading an external
//! project-configuration document.
//!
//! Four tiers run in fixed order: org defaults, team additions, project
//! additions, endpoint materialization. At every tier the same gate
//! sequence applies to additions: security block, delegation, allowlist,
//! and (for stdio endpoints) the stdio gate sequence. A security block
//! always pre-empts a delegation denial.

use std::path::Path;

use anyhow::Result;
use archon_common::{McpServerEntry, McpTransport, OrgConfig, ProjectConfig, TeamProfile};
use serde_json::json;

use crate::application::ports::{PathInspector, ProjectConfigStore};
use crate::application::services::stdio_guard;
use crate::domain::config::{
    BlockedItem, ConfigDecision, DeniedAddition, EffectiveConfig, McpServer, RequestedBy,
    TargetType, SOURCE_ORG_DEFAULTS, SOURCE_ORG_SECURITY, SOURCE_PROJECT, team_source,
};
use crate::domain::{delegation, pattern, security};

// ── Entry points ─────────────────────────────────────────────────────────────

/// Resolve for a workspace directory: load the adjacent project document
/// (if any) through the store, then resolve.
///
/// # Errors
///
/// Returns an error when the workspace carries a project document that
/// cannot be read or parsed.
pub fn resolve_for_workspace(
    org: &OrgConfig,
    team: &str,
    workspace: Option<&Path>,
    projects: &impl ProjectConfigStore,
    paths: &impl PathInspector,
) -> Result<EffectiveConfig> {
    let project = match workspace {
        Some(dir) => projects.load(dir)?,
        None => None,
    };
    Ok(resolve(org, team, project.as_ref(), paths))
}

/// Resolve the effective configuration for a team and optional project.
///
/// A pure function of its inputs: every call builds a fresh result, so
/// identical inputs produce structurally equal output.
#[must_use]
pub fn resolve(
    org: &OrgConfig,
    team: &str,
    project: Option<&ProjectConfig>,
    paths: &impl PathInspector,
) -> EffectiveConfig {
    let mut effective = EffectiveConfig::default();

    apply_org_defaults(org, &mut effective);

    let profile = org.profile(team);
    if let Some(profile) = profile {
        apply_team_additions(org, team, profile, paths, &mut effective);
    }

    if let Some(project) = project {
        apply_project_additions(org, profile, project, paths, &mut effective);
    }

    effective
}

// ── Tier 1: organization defaults ────────────────────────────────────────────

fn apply_org_defaults(org: &OrgConfig, effective: &mut EffectiveConfig) {
    for name in &org.defaults.enabled_plugins {
        if let Some(pat) = security::blocked_plugin(&org.security, name) {
            block(effective, name, pat, TargetType::Plugin);
            continue;
        }
        // A default turned off by defaults.disabledPlugins is a
        // configuration choice, not a security event: skip silently.
        if pattern::match_blocked(name, &org.defaults.disabled_plugins).is_some() {
            continue;
        }
        effective.plugins.insert(name.clone());
        effective.decisions.push(decision(
            "plugins",
            json!(name),
            "organization default",
            SOURCE_ORG_DEFAULTS,
        ));
    }

    if let Some(policy) = &org.defaults.network_policy {
        effective.network_policy = Some(policy.clone());
        effective.decisions.push(decision(
            "networkPolicy",
            json!(policy),
            "organization default",
            SOURCE_ORG_DEFAULTS,
        ));
    }
    if let Some(hours) = org.defaults.session.timeout_hours {
        effective.session_config.timeout_hours = Some(hours);
        effective.decisions.push(decision(
            "session.timeoutHours",
            json!(hours),
            "organization default",
            SOURCE_ORG_DEFAULTS,
        ));
    }
    // autoResume is seeded without a decision entry.
    if let Some(auto) = org.defaults.session.auto_resume {
        effective.session_config.auto_resume = Some(auto);
    }
}

// ── Tier 2: team additions ───────────────────────────────────────────────────

fn apply_team_additions(
    org: &OrgConfig,
    team: &str,
    profile: &TeamProfile,
    paths: &impl PathInspector,
    effective: &mut EffectiveConfig,
) {
    let source = team_source(team);

    let plugin_gate = AdditionGate {
        source: source.clone(),
        requested_by: RequestedBy::Team,
        denial: (!delegation::is_team_delegated_for_plugins(org, team))
            .then(|| "team is not delegated for additional plugins".to_string()),
        accept_reason: "team addition",
    };
    for name in &profile.additional_plugins {
        add_plugin(org, name, &plugin_gate, effective);
    }

    let mcp_gate = AdditionGate {
        source: source.clone(),
        requested_by: RequestedBy::Team,
        denial: (!delegation::is_team_delegated_for_mcp(org, team))
            .then(|| "team is not delegated for additional MCP servers".to_string()),
        accept_reason: "team addition",
    };
    for entry in &profile.additional_mcp_servers {
        add_mcp_server(org, entry, &mcp_gate, paths, effective);
    }

    // Session settings need no delegation: the team override always
    // lands and is always audited.
    if let Some(hours) = profile.session.timeout_hours {
        effective.session_config.timeout_hours = Some(hours);
        effective.decisions.push(decision(
            "session.timeoutHours",
            json!(hours),
            "team override",
            &source,
        ));
    }
}

// ── Tier 3: project additions ────────────────────────────────────────────────

fn apply_project_additions(
    org: &OrgConfig,
    profile: Option<&TeamProfile>,
    project: &ProjectConfig,
    paths: &impl PathInspector,
    effective: &mut EffectiveConfig,
) {
    let denial = delegation::is_project_delegated(org, profile)
        .err()
        .map(str::to_string);

    let gate = AdditionGate {
        source: SOURCE_PROJECT.to_string(),
        requested_by: RequestedBy::Project,
        denial,
        accept_reason: "project addition",
    };
    for name in &project.additional_plugins {
        add_plugin(org, name, &gate, effective);
    }
    for entry in &project.additional_mcp_servers {
        add_mcp_server(org, entry, &gate, paths, effective);
    }

    // Unlike collection additions, a non-delegated project session
    // override is dropped with no audit record at all.
    if let Some(hours) = project.session.timeout_hours
        && gate.denial.is_none()
    {
        effective.session_config.timeout_hours = Some(hours);
        effective.decisions.push(decision(
            "session.timeoutHours",
            json!(hours),
            "project override",
            SOURCE_PROJECT,
        ));
    }
}

// ── Shared gate sequence ─────────────────────────────────────────────────────

/// How one tier's additions are gated and audited.
struct AdditionGate {
    source: String,
    requested_by: RequestedBy,
    /// The delegation denial reason for this tier, when not delegated.
    denial: Option<String>,
    accept_reason: &'static str,
}

fn add_plugin(
    org: &OrgConfig,
    name: &str,
    gate: &AdditionGate,
    effective: &mut EffectiveConfig,
) {
    if let Some(pat) = security::blocked_plugin(&org.security, name) {
        block(effective, name, pat, TargetType::Plugin);
        return;
    }
    if let Some(reason) = &gate.denial {
        deny(effective, name, gate, reason.clone(), TargetType::Plugin);
        return;
    }
    if !security::plugin_allowed(&org.defaults, name) {
        deny(
            effective,
            name,
            gate,
            "not in the organization plugin allowlist".to_string(),
            TargetType::Plugin,
        );
        return;
    }
    effective.plugins.insert(name.to_string());
    effective.decisions.push(decision(
        "plugins",
        json!(name),
        gate.accept_reason,
        &gate.source,
    ));
}

fn add_mcp_server(
    org: &OrgConfig,
    entry: &McpServerEntry,
    gate: &AdditionGate,
    paths: &impl PathInspector,
    effective: &mut EffectiveConfig,
) {
    if let Some(pat) = security::blocked_mcp_server(&org.security, entry) {
        block(effective, &entry.name, pat, TargetType::McpServer);
        return;
    }
    if let Some(reason) = &gate.denial {
        deny(effective, &entry.name, gate, reason.clone(), TargetType::McpServer);
        return;
    }
    if !security::mcp_server_allowed(&org.defaults, &entry.name) {
        deny(
            effective,
            &entry.name,
            gate,
            "not in the organization MCP server allowlist".to_string(),
            TargetType::McpServer,
        );
        return;
    }

    // Stdio endpoints carry elevated privilege; a gate failure is a
    // security event, not a delegation one.
    if entry.transport == Some(McpTransport::Stdio) {
        let command = entry.command.as_deref().unwrap_or("");
        let validation = stdio_guard::validate_stdio_command(&org.security, command, paths);
        if let Some(reason) = validation.blocked {
            block(effective, &entry.name, &reason, TargetType::McpServer);
            return;
        }
        for warning in validation.warnings {
            effective.warnings.push(format!("{}: {warning}", entry.name));
        }
    }

    effective.mcp_servers.push(materialize(entry));
    effective.decisions.push(decision(
        "mcpServers",
        json!(entry.name),
        gate.accept_reason,
        &gate.source,
    ));
}

/// Turn an accepted entry into an effective endpoint: transport defaults
/// to `sse`, an empty URL normalizes to absent, and `env`/`headers` stay
/// unset for the downstream injection step.
fn materialize(entry: &McpServerEntry) -> McpServer {
    McpServer {
        name: entry.name.clone(),
        transport: entry.transport.unwrap_or(McpTransport::Sse),
        url: entry.url.clone().filter(|u| !u.is_empty()),
        command: entry.command.clone(),
        args: entry.args.clone(),
        env: None,
        headers: None,
    }
}

// ── Audit helpers ────────────────────────────────────────────────────────────

fn decision(field: &str, value: serde_json::Value, reason: &str, source: &str) -> ConfigDecision {
    ConfigDecision {
        field: field.to_string(),
        value,
        reason: reason.to_string(),
        source: source.to_string(),
    }
}

fn block(effective: &mut EffectiveConfig, item: &str, blocked_by: &str, target_type: TargetType) {
    effective.blocked_items.push(BlockedItem {
        item: item.to_string(),
        blocked_by: blocked_by.to_string(),
        source: SOURCE_ORG_SECURITY.to_string(),
        target_type,
    });
}

fn deny(
    effective: &mut EffectiveConfig,
    item: &str,
    gate: &AdditionGate,
    reason: String,
    target_type: TargetType,
) {
    effective.denied_additions.push(DeniedAddition {
        item: item.to_string(),
        requested_by: gate.requested_by,
        reason,
        target_type,
    });
}

// ── Unit tests ───────────────────────────────────────────────────────────────
