pub mod config;

pub use config::{
    DelegationRules, McpServerEntry, McpTransport, OrgConfig, OrgDefaults, ProjectConfig,
    ProjectDelegation, SecurityPolicy, SessionDefaults, SessionOverride, TeamDelegation,
    TeamProfile, TeamProfileDelegation,
};
