//! Live-reload collaborators
//!
//! A [`Reloader`] decides whether a build should wrap its launch process in a
//! file watcher, and knows how to produce that wrapper.

mod watchexec;

pub use watchexec::WatchexecReloader;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::launch::LaunchProcess;

pub const LIVE_RELOAD_ENV: &str = "BP_LIVE_RELOAD_ENABLED";

/// Shell value that makes the watcher exec the command directly
pub const NO_SHELL: &str = "none";

/// How a reloadable process should be supervised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadableProcessSpec {
    pub watch_paths: Vec<PathBuf>,
    pub ignore_paths: Vec<PathBuf>,
    pub shell: String,
    pub verbosity_level: u8,
}

impl ReloadableProcessSpec {
    /// Restart on any change beneath `dir`, executing without a shell
    pub fn watching(dir: &Path) -> Self {
        Self {
            watch_paths: vec![dir.to_path_buf()],
            ..Self::default()
        }
    }
}

impl Default for ReloadableProcessSpec {
    fn default() -> Self {
        Self {
            watch_paths: Vec::new(),
            ignore_paths: Vec::new(),
            shell: NO_SHELL.to_string(),
            verbosity_level: 0,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Reloader {
    /// Whether the build at `working_dir` should get a reloading process
    fn should_enable_live_reload(&self, working_dir: &Path) -> Result<bool>;

    /// Returns `(reload, original)`: the watch-wrapped default process and the
    /// original demoted to a non-default fallback
    fn transform_reloadable_processes(
        &self,
        process: LaunchProcess,
        spec: ReloadableProcessSpec,
    ) -> (LaunchProcess, LaunchProcess);
}

/// Boolean parsing compatible with the platform's `BP_*` flag conventions
pub fn parse_bool_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        one = { "1", Some(true) },
        lower_true = { "true", Some(true) },
        title_true = { "True", Some(true) },
        short_true = { "t", Some(true) },
        zero = { "0", Some(false) },
        upper_false = { "FALSE", Some(false) },
        short_false = { "F", Some(false) },
        yes = { "yes", None },
        padded = { " true", None },
        empty = { "", None },
    )]
    fn test_parse_bool_flag(value: &str, expected: Option<bool>) {
        assert_eq!(parse_bool_flag(value), expected);
    }

    #[test]
    fn test_spec_watching_defaults_to_no_shell() {
        let spec = ReloadableProcessSpec::watching(Path::new("/work"));

        assert_eq!(spec.watch_paths, vec![PathBuf::from("/work")]);
        assert!(spec.ignore_paths.is_empty());
        assert_eq!(spec.shell, "none");
        assert_eq!(spec.verbosity_level, 0);
    }
}
