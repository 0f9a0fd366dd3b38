//! YAML file stores for the organization and project policy documents.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use archon_common::{OrgConfig, ProjectConfig};

use crate::application::ports::{OrgConfigStore, ProjectConfigStore};
use crate::domain::ResolveError;

/// Environment variable overriding the organization policy path.
pub const ORG_CONFIG_ENV: &str = "ARCHON_ORG_CONFIG";

/// Workspace-relative location of the project policy document.
pub const PROJECT_CONFIG_RELPATH: &str = ".archon/project.yaml";

/// Production `OrgConfigStore` backed by a YAML file on disk.
///
/// A missing document is not an error — the organization simply has no
/// policy yet and everything resolves from defaults.
pub struct YamlOrgConfigStore;

impl OrgConfigStore for YamlOrgConfigStore {
    fn load(&self) -> Result<OrgConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(OrgConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var(ORG_CONFIG_ENV) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".archon").join("org.yaml"))
    }
}

/// Production `ProjectConfigStore` reading `.archon/project.yaml` from a
/// workspace directory.
///
/// A missing document yields `None`; an unreadable or unparsable one is
/// an error that propagates to the caller.
pub struct YamlProjectConfigStore;

impl ProjectConfigStore for YamlProjectConfigStore {
    fn load(&self, workspace: &Path) -> Result<Option<ProjectConfig>> {
        let path = workspace.join(PROJECT_CONFIG_RELPATH);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ResolveError::ProjectConfig {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config =
            serde_yaml::from_str(&content).map_err(|e| ResolveError::ProjectConfig {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Some(config))
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
