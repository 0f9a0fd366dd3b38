//! Delegation rules — whether a team or project may add items beyond
//! organization defaults.
//!
//! Pure functions only — no I/O, no async.

use archon_common::{OrgConfig, TeamProfile};

use crate::domain::pattern;

/// Project delegation failure cause: the org-level switch is off.
pub const ORG_DISABLED_PROJECT_DELEGATION: &str = "org disabled project delegation";

/// Project delegation failure cause: the team profile's switch is off.
pub const TEAM_DISABLED_PROJECT_OVERRIDES: &str = "team disabled project overrides";

/// True iff the team name matches a pattern in
/// `delegation.teams.allowAdditionalPlugins`.
#[must_use]
pub fn is_team_delegated_for_plugins(org: &OrgConfig, team: &str) -> bool {
    is_delegated(team, &org.delegation.teams.allow_additional_plugins)
}

/// True iff the team name matches a pattern in
/// `delegation.teams.allowAdditionalMcpServers`.
#[must_use]
pub fn is_team_delegated_for_mcp(org: &OrgConfig, team: &str) -> bool {
    is_delegated(team, &org.delegation.teams.allow_additional_mcp_servers)
}

fn is_delegated(team: &str, patterns: &[String]) -> bool {
    // An absent or empty team name is never delegated.
    if team.trim().is_empty() {
        return false;
    }
    pattern::match_blocked(team, patterns).is_some()
}

/// Project-level additions require two independent opt-ins: the org's
/// `delegation.projects.inheritTeamDelegation` and the team profile's
/// `delegation.allowProjectOverrides`. Either being false short-circuits
/// with its own cause so callers can tell which switch is off.
///
/// # Errors
///
/// Returns the blocking cause when project delegation is denied.
pub fn is_project_delegated(
    org: &OrgConfig,
    profile: Option<&TeamProfile>,
) -> Result<(), &'static str> {
    if !org.delegation.projects.inherit_team_delegation {
        return Err(ORG_DISABLED_PROJECT_DELEGATION);
    }
    if !profile.is_some_and(|p| p.delegation.allow_project_overrides) {
        return Err(TEAM_DISABLED_PROJECT_OVERRIDES);
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
