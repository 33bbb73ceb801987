//! Per-invocation inputs shared by detect and build

use std::path::{Path, PathBuf};

/// Name and version printed in the build log title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildpackInfo {
    pub name: String,
    pub version: String,
}

impl Default for BuildpackInfo {
    fn default() -> Self {
        Self {
            name: "Poetry Run Buildpack".to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

/// What the lifecycle hands a buildpack for one invocation
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Application source directory
    pub working_dir: PathBuf,
    /// Where `launch.toml` is written
    pub layers_dir: PathBuf,
    pub buildpack: BuildpackInfo,
}

impl BuildContext {
    pub fn new(working_dir: impl Into<PathBuf>, layers_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            layers_dir: layers_dir.into(),
            buildpack: BuildpackInfo::default(),
        }
    }

    pub fn with_buildpack(mut self, buildpack: BuildpackInfo) -> Self {
        self.buildpack = buildpack;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}
