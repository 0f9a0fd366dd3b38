//! Effective configuration and audit-trail model.
//!
//! Built fresh on every resolve; no identity, persistence, or mutation
//! after being returned. Serialized camelCase for the downstream
//! settings-injection and explain collaborators.

use std::collections::{BTreeSet, HashMap};

use archon_common::McpTransport;
use serde::Serialize;
use serde_json::Value;

// ── Audit sources ────────────────────────────────────────────────────────────

/// Source tag for organization defaults.
pub const SOURCE_ORG_DEFAULTS: &str = "org.defaults";
/// Source tag for security blocks, at every tier.
pub const SOURCE_ORG_SECURITY: &str = "org.security";
/// Source tag for project additions.
pub const SOURCE_PROJECT: &str = "project";

/// Source tag for a team's additions: `team.<name>`.
#[must_use]
pub fn team_source(team: &str) -> String {
    format!("team.{team}")
}

// ── Result model ─────────────────────────────────────────────────────────────

/// The fully resolved, security-filtered configuration for a team or
/// project, paired with its complete audit trail.
///
/// `decisions`, `blocked_items`, and `denied_additions` are append-
/// ordered and never deduplicated or sorted here; a presentation layer
/// sorts if it wants to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    /// Accepted plugins. A true set: re-adding a name from two tiers is
    /// legal, yields two decisions, and one membership.
    pub plugins: BTreeSet<String>,
    /// Accepted tool-provider endpoints, in insertion order.
    pub mcp_servers: Vec<McpServer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_policy: Option<String>,
    pub session_config: SessionConfig,
    /// One entry per accepted item or scalar override.
    pub decisions: Vec<ConfigDecision>,
    /// Items rejected by the organization security policy.
    pub blocked_items: Vec<BlockedItem>,
    /// Additions rejected by delegation or allowlist rules.
    pub denied_additions: Vec<DeniedAddition>,
    /// Advisory host-side findings from stdio validation. Never affects
    /// acceptance.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Resolved session limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_resume: Option<bool>,
}

/// An accepted tool-provider endpoint, ready for the settings-injection
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServer {
    pub name: String,
    #[serde(rename = "type")]
    pub transport: McpTransport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Reserved for a downstream credential-injection step; never
    /// populated from policy documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<HashMap<String, String>>,
    /// Reserved for a downstream header-injection step; never populated
    /// from policy documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

// ── Audit records ────────────────────────────────────────────────────────────

/// One accepted item or scalar override.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDecision {
    /// Which effective field was set (`plugins`, `mcpServers`,
    /// `networkPolicy`, `session.timeoutHours`).
    pub field: String,
    pub value: Value,
    pub reason: String,
    /// `org.defaults`, `team.<name>`, or `project`.
    pub source: String,
}

/// An item rejected by the organization security policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedItem {
    pub item: String,
    /// The literal blocklist pattern that matched, or the stdio gate's
    /// reason when no pattern was involved.
    pub blocked_by: String,
    /// Always `org.security`.
    pub source: String,
    pub target_type: TargetType,
}

/// A team or project addition rejected by delegation or allowlist rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeniedAddition {
    pub item: String,
    pub requested_by: RequestedBy,
    pub reason: String,
    pub target_type: TargetType,
}

/// What kind of item an audit record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetType {
    Plugin,
    McpServer,
}

/// Which tier requested a denied addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestedBy {
    Team,
    Project,
}

// ── Unit tests ───────────────────────────────────────────────────────────────
