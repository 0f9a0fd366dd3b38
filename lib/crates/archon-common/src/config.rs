//! Policy-document schema shared by the CLI and services.
//!
//! These are the input trees the effective-config resolver consumes. They
//! are decoded once at the loading boundary into typed structs with
//! optional fields; nothing in the resolver probes dynamic maps. All
//! documents are forward-compatible: unknown keys are ignored and every
//! section defaults to empty.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ── Organization policy ──────────────────────────────────────────────────────

/// Organization policy document (`org.yaml`).
///
/// Administrator-owned; defines the security blocklists, default item
/// sets, delegation rules, and per-team profiles for the whole org.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrgConfig {
    /// Security blocklists and stdio policy.
    pub security: SecurityPolicy,
    /// Default item sets and allowlists.
    pub defaults: OrgDefaults,
    /// Delegation rules for teams and projects.
    pub delegation: DelegationRules,
    /// Per-team profile overrides, keyed by team name.
    pub profiles: HashMap<String, TeamProfile>,
}

impl OrgConfig {
    /// Look up the profile for a team. An empty team name never has one.
    #[must_use]
    pub fn profile(&self, team: &str) -> Option<&TeamProfile> {
        if team.is_empty() {
            return None;
        }
        self.profiles.get(team)
    }
}

/// Security section of the organization policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityPolicy {
    /// Glob patterns for plugins that may never be enabled.
    pub blocked_plugins: Vec<String>,
    /// Glob patterns for MCP servers that may never be enabled.
    /// Matched against the server name, its raw URL, and the URL host.
    pub blocked_mcp_servers: Vec<String>,
    /// Stdio (local-subprocess) MCP servers are opt-in per organization.
    pub allow_stdio_mcp: bool,
    /// When non-empty, stdio commands must resolve under one of these
    /// directory prefixes.
    pub allowed_stdio_prefixes: Vec<String>,
}

/// Default item sets and allowlists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrgDefaults {
    /// Plugins enabled for everyone by default.
    pub enabled_plugins: Vec<String>,
    /// Glob patterns for default plugins to leave out. A defaults-vs-
    /// defaults conflict is not a security event.
    pub disabled_plugins: Vec<String>,
    /// Allowlist for team/project plugin additions.
    /// Absent = unrestricted; present-but-empty = deny all.
    pub allowed_plugins: Option<Vec<String>>,
    /// Allowlist for team/project MCP server additions.
    /// Absent = unrestricted; present-but-empty = deny all.
    pub allowed_mcp_servers: Option<Vec<String>>,
    /// Default network policy name handed to the sandboxing layer.
    pub network_policy: Option<String>,
    /// Default session limits.
    pub session: SessionDefaults,
}

/// Organization-level session defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionDefaults {
    /// Session timeout in hours.
    pub timeout_hours: Option<u32>,
    /// Whether interrupted sessions resume automatically.
    pub auto_resume: Option<bool>,
}

// ── Delegation rules ─────────────────────────────────────────────────────────

/// Delegation rules for teams and projects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DelegationRules {
    /// Which teams may add items beyond org defaults.
    pub teams: TeamDelegation,
    /// Whether projects may add items at all.
    pub projects: ProjectDelegation,
}

/// Team delegation: glob patterns matched against the team name.
/// An empty list delegates nobody.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamDelegation {
    /// Teams allowed to add plugins.
    pub allow_additional_plugins: Vec<String>,
    /// Teams allowed to add MCP servers.
    pub allow_additional_mcp_servers: Vec<String>,
}

/// Project delegation opt-in. Both this flag and the team profile's
/// `allowProjectOverrides` must be true for project additions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectDelegation {
    pub inherit_team_delegation: bool,
}

// ── Team profiles ────────────────────────────────────────────────────────────

/// Per-team profile inside the organization policy document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamProfile {
    /// Plugins this team requests beyond org defaults.
    pub additional_plugins: Vec<String>,
    /// MCP servers this team requests beyond org defaults.
    pub additional_mcp_servers: Vec<McpServerEntry>,
    /// Team-level session overrides (no delegation required).
    pub session: SessionOverride,
    /// The team's own delegation settings.
    pub delegation: TeamProfileDelegation,
}

/// Team-owned delegation flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamProfileDelegation {
    /// Whether projects under this team may override its configuration.
    pub allow_project_overrides: bool,
}

/// Session overrides carried by team profiles and project documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionOverride {
    pub timeout_hours: Option<u32>,
}

// ── Project policy ───────────────────────────────────────────────────────────

/// Project policy document (`.archon/project.yaml` in a workspace).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Plugins this project requests beyond org and team.
    pub additional_plugins: Vec<String>,
    /// MCP servers this project requests beyond org and team.
    pub additional_mcp_servers: Vec<McpServerEntry>,
    /// Project-level session overrides (requires project delegation).
    pub session: SessionOverride,
}

// ── Tool-provider endpoint entries ───────────────────────────────────────────

/// One tool-provider endpoint entry as written in a policy document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServerEntry {
    pub name: String,
    /// Transport; defaults to `sse` when absent.
    #[serde(default, rename = "type")]
    pub transport: Option<McpTransport>,
    /// Endpoint URL for `sse`/`http` transports.
    #[serde(default)]
    pub url: Option<String>,
    /// Command path for the `stdio` transport.
    #[serde(default)]
    pub command: Option<String>,
    /// Arguments passed to a `stdio` command.
    #[serde(default)]
    pub args: Vec<String>,
}

/// MCP server transport kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpTransport {
    Sse,
    Stdio,
    Http,
}

// ── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_org_config_empty_yaml_uses_defaults() {
        let cfg: OrgConfig = serde_yaml::from_str("{}").expect("empty yaml");
        assert!(cfg.security.blocked_plugins.is_empty());
        assert!(!cfg.security.allow_stdio_mcp);
        assert!(cfg.defaults.allowed_plugins.is_none());
        assert!(!cfg.delegation.projects.inherit_team_delegation);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn test_org_config_camel_case_keys() {
        let yaml = "
security:
  blockedPlugins: [\"malicious-*\"]
  allowStdioMcp: true
  allowedStdioPrefixes: [\"/opt/allowed\"]
defaults:
  enabledPlugins: [lint]
  networkPolicy: restricted
  session:
    timeoutHours: 8
    autoResume: true
";
        let cfg: OrgConfig = serde_yaml::from_str(yaml).expect("valid yaml");
        assert_eq!(cfg.security.blocked_plugins, vec!["malicious-*"]);
        assert!(cfg.security.allow_stdio_mcp);
        assert_eq!(cfg.security.allowed_stdio_prefixes, vec!["/opt/allowed"]);
        assert_eq!(cfg.defaults.enabled_plugins, vec!["lint"]);
        assert_eq!(cfg.defaults.network_policy.as_deref(), Some("restricted"));
        assert_eq!(cfg.defaults.session.timeout_hours, Some(8));
        assert_eq!(cfg.defaults.session.auto_resume, Some(true));
    }

    #[test]
    fn test_allowed_plugins_absent_vs_empty_are_distinct() {
        let absent: OrgConfig = serde_yaml::from_str("defaults: {}").expect("yaml");
        assert!(absent.defaults.allowed_plugins.is_none());

        let empty: OrgConfig =
            serde_yaml::from_str("defaults:\n  allowedPlugins: []\n").expect("yaml");
        assert_eq!(empty.defaults.allowed_plugins, Some(Vec::new()));
    }

    #[test]
    fn test_team_profile_lookup() {
        let yaml = "
profiles:
  dev-team:
    additionalPlugins: [extra]
    delegation:
      allowProjectOverrides: true
";
        let cfg: OrgConfig = serde_yaml::from_str(yaml).expect("valid yaml");
        let profile = cfg.profile("dev-team").expect("profile exists");
        assert_eq!(profile.additional_plugins, vec!["extra"]);
        assert!(profile.delegation.allow_project_overrides);
        assert!(cfg.profile("other-team").is_none());
    }

    #[test]
    fn test_profile_lookup_empty_team_name_is_none() {
        let yaml = "profiles:\n  \"\":\n    additionalPlugins: [sneaky]\n";
        let cfg: OrgConfig = serde_yaml::from_str(yaml).expect("valid yaml");
        assert!(cfg.profile("").is_none());
    }

    #[test]
    fn test_mcp_entry_transport_lowercase_and_optional() {
        let entry: McpServerEntry =
            serde_yaml::from_str("name: db\ntype: stdio\ncommand: /usr/bin/db\n").expect("yaml");
        assert_eq!(entry.transport, Some(McpTransport::Stdio));
        assert_eq!(entry.command.as_deref(), Some("/usr/bin/db"));

        let bare: McpServerEntry = serde_yaml::from_str("name: api\n").expect("yaml");
        assert!(bare.transport.is_none());
        assert!(bare.args.is_empty());
    }

    #[test]
    fn test_project_config_mirrors_team_shape() {
        let yaml = "
additionalPlugins: [fmt]
additionalMcpServers:
  - name: docs
    type: http
    url: https://docs.internal/mcp
session:
  timeoutHours: 4
";
        let cfg: ProjectConfig = serde_yaml::from_str(yaml).expect("valid yaml");
        assert_eq!(cfg.additional_plugins, vec!["fmt"]);
        assert_eq!(cfg.additional_mcp_servers[0].transport, Some(McpTransport::Http));
        assert_eq!(cfg.session.timeout_hours, Some(4));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        // Newer org documents may carry sections this build does not know.
        let yaml = "security:\n  blockedPlugins: [x]\nfutureSection:\n  a: 1\n";
        let cfg: OrgConfig = serde_yaml::from_str(yaml).expect("valid yaml");
        assert_eq!(cfg.security.blocked_plugins, vec!["x"]);
    }

    #[test]
    fn test_org_config_json_roundtrip() {
        let mut cfg = OrgConfig::default();
        cfg.security.blocked_plugins.push("bad-*".to_string());
        cfg.defaults.allowed_mcp_servers = Some(vec!["internal-*".to_string()]);

        let json = serde_json::to_string(&cfg).expect("serialize");
        let back: OrgConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.security.blocked_plugins, vec!["bad-*"]);
        assert_eq!(back.defaults.allowed_mcp_servers, Some(vec!["internal-*".to_string()]));
    }
}
