//! Build result schema
//!
//! The result of a build is what the platform persists: the ordered launch
//! processes and the (always empty) buildpack plan entries this buildpack
//! resolved. It serializes to the `launch.toml` layout consumed by the
//! lifecycle.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::LaunchProcess;

pub const LAUNCH_TOML: &str = "launch.toml";

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Outcome of a successful build invocation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildResult {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub plan: BuildpackPlan,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub launch: LaunchMetadata,
}

/// Plan entries a buildpack resolved during build
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildpackPlan {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<BuildpackPlanEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildpackPlanEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, toml::Value>,
}

/// Contents of `launch.toml`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaunchMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processes: Vec<LaunchProcess>,
}

impl BuildResult {
    pub fn with_processes(processes: Vec<LaunchProcess>) -> Self {
        Self {
            plan: BuildpackPlan::default(),
            launch: LaunchMetadata { processes },
        }
    }

    /// The process the platform starts when no type is requested
    pub fn default_process(&self) -> Option<&LaunchProcess> {
        self.launch.processes.iter().find(|p| p.default)
    }

    /// Writes `<layers_dir>/launch.toml` and returns its path
    pub fn write_launch_toml(&self, layers_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(layers_dir)
            .with_context(|| format!("failed to create layers directory {}", layers_dir.display()))?;

        let path = layers_dir.join(LAUNCH_TOML);
        let content =
            toml::to_string(&self.launch).context("failed to serialize launch metadata")?;
        fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;

        Ok(path)
    }
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Launch processes:")?;
        if self.launch.processes.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for process in &self.launch.processes {
            writeln!(f, "  {}", process)?;
        }
        Ok(())
    }
}
