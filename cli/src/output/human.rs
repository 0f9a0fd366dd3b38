//! Human-readable terminal renderer.

use std::path::Path;

use archon_common::{McpTransport, OrgConfig};
use owo_colors::OwoColorize as _;
use serde_json::Value;

use crate::domain::config::{EffectiveConfig, McpServer, RequestedBy, TargetType};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using
/// `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the resolved effective configuration.
    pub fn render_effective(&self, effective: &EffectiveConfig) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header("Effective configuration");
        println!();

        if effective.plugins.is_empty() {
            self.ctx.kv("Plugins:", "(none)");
        } else {
            let list: Vec<&str> = effective.plugins.iter().map(String::as_str).collect();
            self.ctx.kv("Plugins:", &list.join(", "));
        }

        if effective.mcp_servers.is_empty() {
            self.ctx.kv("MCP servers:", "(none)");
        } else {
            self.ctx.kv("MCP servers:", "");
            for server in &effective.mcp_servers {
                println!("    {}", format_mcp_server(server));
            }
        }

        self.ctx.kv(
            "Network policy:",
            effective.network_policy.as_deref().unwrap_or("(unset)"),
        );
        match effective.session_config.timeout_hours {
            Some(hours) => self.ctx.kv("Session timeout:", &format!("{hours}h")),
            None => self.ctx.kv("Session timeout:", "(unset)"),
        }
        if let Some(auto) = effective.session_config.auto_resume {
            self.ctx
                .kv("Auto-resume:", if auto { "enabled" } else { "disabled" });
        }

        if !effective.warnings.is_empty() {
            println!();
            for warning in &effective.warnings {
                self.ctx.warn(warning);
            }
        }

        println!();
        let blocked = effective.blocked_items.len();
        let denied = effective.denied_additions.len();
        if blocked == 0 && denied == 0 {
            self.ctx.success("No items blocked or denied");
        } else {
            self.ctx.warn(&format!(
                "{blocked} blocked by security policy, {denied} additions denied"
            ));
            self.ctx.info("Run: archon explain");
        }
        println!();
    }

    /// Render the full audit trail: every decision, block, and denial in
    /// the order it was recorded.
    pub fn render_explain(&self, effective: &EffectiveConfig) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header("Decisions");
        if effective.decisions.is_empty() {
            println!("    (none)");
        }
        for d in &effective.decisions {
            println!(
                "    {} {} = {} {} {}",
                "✓".style(self.ctx.styles.success),
                d.field,
                value_display(&d.value),
                format!("[{}]", d.source).style(self.ctx.styles.dim),
                d.reason.style(self.ctx.styles.dim),
            );
        }

        println!();
        self.ctx.header("Blocked by security policy");
        if effective.blocked_items.is_empty() {
            println!("    (none)");
        }
        for b in &effective.blocked_items {
            println!(
                "    {} {} ({}) blocked by '{}'",
                "✗".style(self.ctx.styles.error),
                b.item,
                target_type_display(b.target_type),
                b.blocked_by,
            );
        }

        println!();
        self.ctx.header("Denied additions");
        if effective.denied_additions.is_empty() {
            println!("    (none)");
        }
        for d in &effective.denied_additions {
            println!(
                "    {} {} ({}) requested by {}: {}",
                "!".style(self.ctx.styles.warning),
                d.item,
                target_type_display(d.target_type),
                requested_by_display(d.requested_by),
                d.reason,
            );
        }

        if !effective.warnings.is_empty() {
            println!();
            self.ctx.header("Warnings");
            for warning in &effective.warnings {
                self.ctx.warn(warning);
            }
        }
        println!();
    }

    /// Render the loaded organization policy summary.
    pub fn render_org_config(&self, org: &OrgConfig, path: &Path) {
        if self.ctx.quiet {
            return;
        }
        println!();
        println!(
            "  {}",
            format!("Organization policy ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        self.ctx.kv(
            "Blocked plugins:",
            &count_display(org.security.blocked_plugins.len()),
        );
        self.ctx.kv(
            "Blocked MCP servers:",
            &count_display(org.security.blocked_mcp_servers.len()),
        );
        self.ctx.kv(
            "Stdio MCP servers:",
            if org.security.allow_stdio_mcp {
                "allowed"
            } else {
                "disabled"
            },
        );
        self.ctx.kv(
            "Default plugins:",
            &count_display(org.defaults.enabled_plugins.len()),
        );
        self.ctx
            .kv("Team profiles:", &count_display(org.profiles.len()));
        println!();
    }
}

// ── Display helpers (used by tests and output layer) ─────────────────────────

#[must_use]
pub fn format_mcp_server(server: &McpServer) -> String {
    let endpoint = server
        .url
        .as_deref()
        .or(server.command.as_deref())
        .unwrap_or("");
    if endpoint.is_empty() {
        format!("{} ({})", server.name, transport_display(server.transport))
    } else {
        format!(
            "{} ({}) {endpoint}",
            server.name,
            transport_display(server.transport)
        )
    }
}

#[must_use]
pub fn transport_display(transport: McpTransport) -> &'static str {
    match transport {
        McpTransport::Sse => "sse",
        McpTransport::Stdio => "stdio",
        McpTransport::Http => "http",
    }
}

#[must_use]
pub fn target_type_display(target: TargetType) -> &'static str {
    match target {
        TargetType::Plugin => "plugin",
        TargetType::McpServer => "mcp server",
    }
}

#[must_use]
pub fn requested_by_display(requested_by: RequestedBy) -> &'static str {
    match requested_by {
        RequestedBy::Team => "team",
        RequestedBy::Project => "project",
    }
}

/// Render a decision value without JSON quoting for plain strings.
#[must_use]
pub fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[must_use]
pub fn count_display(count: usize) -> String {
    if count == 0 {
        "(none)".to_string()
    } else {
        count.to_string()
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transport_display_all() {
        assert_eq!(transport_display(McpTransport::Sse), "sse");
        assert_eq!(transport_display(McpTransport::Stdio), "stdio");
        assert_eq!(transport_display(McpTransport::Http), "http");
    }

    #[test]
    fn test_target_type_display_all() {
        assert_eq!(target_type_display(TargetType::Plugin), "plugin");
        assert_eq!(target_type_display(TargetType::McpServer), "mcp server");
    }

    #[test]
    fn test_requested_by_display_all() {
        assert_eq!(requested_by_display(RequestedBy::Team), "team");
        assert_eq!(requested_by_display(RequestedBy::Project), "project");
    }

    #[test]
    fn test_value_display_unquotes_strings() {
        assert_eq!(value_display(&json!("lint")), "lint");
        assert_eq!(value_display(&json!(8)), "8");
        assert_eq!(value_display(&json!(true)), "true");
    }

    #[test]
    fn test_count_display() {
        assert_eq!(count_display(0), "(none)");
        assert_eq!(count_display(3), "3");
    }

    #[test]
    fn test_format_mcp_server_with_url() {
        let server = McpServer {
            name: "docs".to_string(),
            transport: McpTransport::Sse,
            url: Some("https://docs.internal/mcp".to_string()),
            command: None,
            args: Vec::new(),
            env: None,
            headers: None,
        };
        assert_eq!(
            format_mcp_server(&server),
            "docs (sse) https://docs.internal/mcp"
        );
    }

    #[test]
    fn test_format_mcp_server_with_command() {
        let server = McpServer {
            name: "db".to_string(),
            transport: McpTransport::Stdio,
            url: None,
            command: Some("/usr/bin/db-mcp".to_string()),
            args: Vec::new(),
            env: None,
            headers: None,
        };
        assert_eq!(format_mcp_server(&server), "db (stdio) /usr/bin/db-mcp");
    }

    #[test]
    fn test_format_mcp_server_bare() {
        let server = McpServer {
            name: "ghost".to_string(),
            transport: McpTransport::Sse,
            url: None,
            command: None,
            args: Vec::new(),
            env: None,
            headers: None,
        };
        assert_eq!(format_mcp_server(&server), "ghost (sse)");
    }
}
