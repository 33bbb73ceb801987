//! Run target resolution
//!
//! The tokens that follow `poetry run` come either from the operator's
//! `BP_POETRY_RUN_TARGET` or from the single script in `pyproject.toml`.

use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::BuildError;
use crate::pyproject::PyProjectParser;

pub const RUN_TARGET_ENV: &str = "BP_POETRY_RUN_TARGET";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOrigin {
    Override,
    Parsed,
}

/// Arguments to `poetry run`, and where they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    pub tokens: Vec<String>,
    pub origin: TargetOrigin,
}

impl LaunchTarget {
    /// Splits an override on runs of whitespace. Quotes are not interpreted,
    /// so a single argument containing a space cannot be expressed.
    pub fn from_override(value: &str) -> Self {
        Self {
            tokens: value.split_whitespace().map(str::to_string).collect(),
            origin: TargetOrigin::Override,
        }
    }

    /// A parsed script is one token, never re-split
    pub fn from_script(script: String) -> Self {
        Self {
            tokens: vec![script],
            origin: TargetOrigin::Parsed,
        }
    }

    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for LaunchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin {
            TargetOrigin::Parsed => write!(f, "Found pyproject.toml script={}", self.joined()),
            TargetOrigin::Override => write!(f, "Found {}={}", RUN_TARGET_ENV, self.joined()),
        }
    }
}

/// Chooses the override when present (even if blank); the parser is only
/// consulted when it is absent.
pub fn resolve<P>(
    run_target: Option<&str>,
    working_dir: &Path,
    parser: &P,
) -> Result<LaunchTarget, BuildError>
where
    P: PyProjectParser + ?Sized,
{
    let target = match run_target {
        Some(value) => LaunchTarget::from_override(value),
        None => parser
            .parse(working_dir)
            .map(LaunchTarget::from_script)
            .map_err(BuildError::TargetResolution)?,
    };

    debug!(origin = ?target.origin, tokens = ?target.tokens, "Resolved poetry run target");
    Ok(target)
}
