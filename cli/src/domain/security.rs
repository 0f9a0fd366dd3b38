//! Organization security and allowlist gates.
//!
//! Security blocking is evaluated before delegation, allowlists, and
//! stdio validation at every tier — a block always pre-empts a deny.
//! Pure functions only — no I/O, no async.

use archon_common::{McpServerEntry, OrgDefaults, SecurityPolicy};
use url::Url;

use crate::domain::pattern;

// ── Security gate ────────────────────────────────────────────────────────────

/// Check a plugin name against `security.blockedPlugins`.
///
/// Returns the literal pattern that matched, for the audit trail.
#[must_use]
pub fn blocked_plugin<'a>(security: &'a SecurityPolicy, name: &str) -> Option<&'a str> {
    pattern::match_blocked(name, &security.blocked_plugins)
}

/// Check an MCP server entry against `security.blockedMcpServers`.
///
/// Three candidates are tried in order: the endpoint name, its raw URL,
/// and the URL host. A match on any candidate blocks the entry, so a
/// blocklist of hosts catches endpoints registered under innocuous
/// names.
#[must_use]
pub fn blocked_mcp_server<'a>(
    security: &'a SecurityPolicy,
    entry: &McpServerEntry,
) -> Option<&'a str> {
    for candidate in mcp_candidates(entry) {
        if let Some(pat) = pattern::match_blocked(&candidate, &security.blocked_mcp_servers) {
            return Some(pat);
        }
    }
    None
}

/// Matching candidates for an endpoint: name, raw URL, and the URL's
/// authority/host. When the URL has no parseable host, the raw URL
/// stands in for the authority candidate.
fn mcp_candidates(entry: &McpServerEntry) -> Vec<String> {
    let mut candidates = vec![entry.name.clone()];
    if let Some(raw) = entry.url.as_deref()
        && !raw.is_empty()
    {
        candidates.push(raw.to_string());
        let authority = Url::parse(raw)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| raw.to_string());
        candidates.push(authority);
    }
    candidates
}

// ── Allowlist gate ───────────────────────────────────────────────────────────

/// Plugin allowlist check against `defaults.allowedPlugins`.
/// Absent list = unrestricted; empty list = deny all.
#[must_use]
pub fn plugin_allowed(defaults: &OrgDefaults, name: &str) -> bool {
    pattern::is_allowed(name, defaults.allowed_plugins.as_deref())
}

/// MCP server allowlist check against `defaults.allowedMcpServers`,
/// matched on the server name.
#[must_use]
pub fn mcp_server_allowed(defaults: &OrgDefaults, name: &str) -> bool {
    pattern::is_allowed(name, defaults.allowed_mcp_servers.as_deref())
}

// ── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn security(blocked_plugins: &[&str], blocked_mcp: &[&str]) -> SecurityPolicy {
        SecurityPolicy {
            blocked_plugins: blocked_plugins.iter().map(|s| (*s).to_string()).collect(),
            blocked_mcp_servers: blocked_mcp.iter().map(|s| (*s).to_string()).collect(),
            ..SecurityPolicy::default()
        }
    }

    fn entry(name: &str, url: Option<&str>) -> McpServerEntry {
        McpServerEntry {
            name: name.to_string(),
            transport: None,
            url: url.map(str::to_string),
            command: None,
            args: Vec::new(),
        }
    }

    // ── blocked_plugin ───────────────────────────────────────────────────────

    #[test]
    fn test_blocked_plugin_glob_match_returns_literal_pattern() {
        let sec = security(&["malicious-*"], &[]);
        assert_eq!(blocked_plugin(&sec, "Malicious-Tool"), Some("malicious-*"));
    }

    #[test]
    fn test_blocked_plugin_clean_name_passes() {
        let sec = security(&["malicious-*"], &[]);
        assert_eq!(blocked_plugin(&sec, "lint"), None);
    }

    // ── blocked_mcp_server ───────────────────────────────────────────────────

    #[test]
    fn test_blocked_mcp_server_by_name() {
        let sec = security(&[], &["exfil-*"]);
        assert_eq!(blocked_mcp_server(&sec, &entry("exfil-db", None)), Some("exfil-*"));
    }

    #[test]
    fn test_blocked_mcp_server_by_raw_url() {
        let sec = security(&[], &["https://evil.example.com/*"]);
        let e = entry("docs", Some("https://evil.example.com/mcp"));
        assert_eq!(blocked_mcp_server(&sec, &e), Some("https://evil.example.com/*"));
    }

    #[test]
    fn test_blocked_mcp_server_by_url_host() {
        let sec = security(&[], &["evil.example.com"]);
        let e = entry("docs", Some("https://evil.example.com/mcp"));
        assert_eq!(blocked_mcp_server(&sec, &e), Some("evil.example.com"));
    }

    #[test]
    fn test_blocked_mcp_server_host_match_is_case_folded() {
        let sec = security(&[], &["evil.example.com"]);
        let e = entry("docs", Some("https://EVIL.example.COM/mcp"));
        assert_eq!(blocked_mcp_server(&sec, &e), Some("evil.example.com"));
    }

    #[test]
    fn test_blocked_mcp_server_unparseable_url_falls_back_to_raw() {
        let sec = security(&[], &["not a url*"]);
        let e = entry("docs", Some("not a url at all"));
        assert_eq!(blocked_mcp_server(&sec, &e), Some("not a url*"));
    }

    #[test]
    fn test_blocked_mcp_server_no_url_only_checks_name() {
        let sec = security(&[], &["https://*"]);
        assert_eq!(blocked_mcp_server(&sec, &entry("db", None)), None);
    }

    #[test]
    fn test_blocked_mcp_server_clean_entry_passes() {
        let sec = security(&[], &["evil.example.com"]);
        let e = entry("docs", Some("https://docs.internal/mcp"));
        assert_eq!(blocked_mcp_server(&sec, &e), None);
    }

    // ── allowlist gate ───────────────────────────────────────────────────────

    #[test]
    fn test_plugin_allowed_absent_allowlist_is_unrestricted() {
        let defaults = OrgDefaults::default();
        assert!(plugin_allowed(&defaults, "anything"));
    }

    #[test]
    fn test_plugin_allowed_empty_allowlist_denies_all() {
        let defaults = OrgDefaults {
            allowed_plugins: Some(Vec::new()),
            ..OrgDefaults::default()
        };
        assert!(!plugin_allowed(&defaults, "anything"));
    }

    #[test]
    fn test_mcp_server_allowed_pattern_match() {
        let defaults = OrgDefaults {
            allowed_mcp_servers: Some(vec!["internal-*".to_string()]),
            ..OrgDefaults::default()
        };
        assert!(mcp_server_allowed(&defaults, "internal-docs"));
        assert!(!mcp_server_allowed(&defaults, "external-docs"));
    }
}
