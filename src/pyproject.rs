//! `pyproject.toml` script discovery

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::fs::{FileSystem, RealFileSystem};

pub const PYPROJECT_TOML: &str = "pyproject.toml";

/// Finds the script a Poetry project should run by default
#[cfg_attr(test, mockall::automock)]
pub trait PyProjectParser {
    /// Returns the script name declared beneath `working_dir`
    fn parse(&self, working_dir: &Path) -> Result<String>;
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: Tool,
}

#[derive(Debug, Default, Deserialize)]
struct Tool {
    poetry: Option<PoetrySection>,
}

#[derive(Debug, Default, Deserialize)]
struct PoetrySection {
    // Values are either a `module:function` reference or an inline table.
    #[serde(default)]
    scripts: BTreeMap<String, toml::Value>,
}

/// Reads `[tool.poetry.scripts]` and requires exactly one entry
pub struct PyProjectTomlParser {
    fs: Arc<dyn FileSystem>,
}

impl PyProjectTomlParser {
    pub fn new() -> Self {
        Self::with_fs(Arc::new(RealFileSystem::new()))
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Default for PyProjectTomlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PyProjectParser for PyProjectTomlParser {
    fn parse(&self, working_dir: &Path) -> Result<String> {
        let path = working_dir.join(PYPROJECT_TOML);
        let content = self.fs.read_to_string(&path)?;

        let project: PyProject = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let scripts = project.tool.poetry.map(|p| p.scripts).unwrap_or_default();
        debug!(
            path = %path.display(),
            scripts = scripts.len(),
            "Parsed pyproject.toml"
        );

        let mut names = scripts.into_keys();
        match (names.next(), names.next()) {
            (Some(name), None) => Ok(name),
            (None, _) => bail!(
                "{} does not declare a script in [tool.poetry.scripts]",
                path.display()
            ),
            (Some(_), Some(_)) => bail!(
                "{} declares more than one script in [tool.poetry.scripts], set BP_POETRY_RUN_TARGET to choose one",
                path.display()
            ),
        }
    }
}
