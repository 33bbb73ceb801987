//! Detect phase
//!
//! Passes for any application with a `pyproject.toml` and declares the
//! dependencies the launch process needs from earlier buildpacks.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

use super::context::BuildContext;
use crate::error::DetectError;
use crate::fs::FileSystem;
use crate::progress::Emitter;
use crate::pyproject::PYPROJECT_TOML;
use crate::reload::Reloader;
use crate::{CPYTHON, POETRY, POETRY_VENV, WATCHEXEC};

/// Contents of the build plan written on successful detection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildPlan {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<Requirement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub metadata: RequirementMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequirementMetadata {
    /// Needed in the launch image, not only at build time
    #[serde(default)]
    pub launch: bool,
}

impl Requirement {
    pub fn at_launch(name: &str) -> Self {
        Self {
            name: name.to_string(),
            metadata: RequirementMetadata { launch: true },
        }
    }
}

impl BuildPlan {
    pub fn requires(&self, name: &str) -> bool {
        self.requires.iter().any(|r| r.name == name)
    }
}

pub struct Detect<R> {
    fs: Arc<dyn FileSystem>,
    reloader: R,
}

impl<R: Reloader> Detect<R> {
    pub fn new(fs: Arc<dyn FileSystem>, reloader: R) -> Self {
        Self { fs, reloader }
    }

    pub fn run<W: Write>(
        &self,
        context: &BuildContext,
        emitter: &mut Emitter<W>,
    ) -> Result<BuildPlan, DetectError> {
        let pyproject = context.working_dir().join(PYPROJECT_TOML);
        if !self.fs.is_file(&pyproject) {
            return Err(DetectError::Fail(format!(
                "no '{}' found in {}",
                PYPROJECT_TOML,
                context.working_dir().display()
            )));
        }
        emitter.debug(format_args!("Found {}", pyproject.display()))?;

        let mut requires = vec![
            Requirement::at_launch(CPYTHON),
            Requirement::at_launch(POETRY),
            Requirement::at_launch(POETRY_VENV),
        ];

        let reload = self
            .reloader
            .should_enable_live_reload(context.working_dir())
            .map_err(DetectError::LiveReload)?;
        if reload {
            requires.push(Requirement::at_launch(WATCHEXEC));
        }

        debug!(requirements = requires.len(), reload, "Detection passed");
        Ok(BuildPlan { requires })
    }
}
