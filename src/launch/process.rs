//! Launch process descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::POETRY;

/// Role of the plain application process
pub const WEB_PROCESS_TYPE: &str = "web";

/// A process the platform can start in the built image.
///
/// Field order matches the `[[processes]]` tables of `launch.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchProcess {
    /// Role label, e.g. `web` or `reload-web`
    #[serde(rename = "type")]
    pub process_type: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Executed without an intermediate shell
    #[serde(default)]
    pub direct: bool,
    #[serde(default)]
    pub default: bool,
}

impl LaunchProcess {
    /// The `web` process running `poetry run <tokens...>`
    pub fn web(tokens: &[String]) -> Self {
        let mut args = Vec::with_capacity(tokens.len() + 1);
        args.push("run".to_string());
        args.extend(tokens.iter().cloned());

        Self {
            process_type: WEB_PROCESS_TYPE.to_string(),
            command: POETRY.to_string(),
            args,
            direct: true,
            default: true,
        }
    }

    /// Command followed by its arguments, space separated
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for LaunchProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.default {
            write!(f, "{} (default): {}", self.process_type, self.command_line())
        } else {
            write!(f, "{}: {}", self.process_type, self.command_line())
        }
    }
}

/// Outcome of assembling launch processes for one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchPlan {
    /// Live reload disabled: only the `web` process
    Single(LaunchProcess),
    /// Live reload enabled: a watch-wrapped default plus the plain fallback
    Reload {
        reload: LaunchProcess,
        original: LaunchProcess,
    },
}

impl LaunchPlan {
    /// Flattens into launch order: the reload process precedes the one it wraps
    pub fn into_processes(self) -> Vec<LaunchProcess> {
        match self {
            LaunchPlan::Single(process) => vec![process],
            LaunchPlan::Reload { reload, original } => vec![reload, original],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_web_process_prepends_run() {
        let process = LaunchProcess::web(&tokens(&["some-script"]));

        assert_eq!(process.process_type, "web");
        assert_eq!(process.command, "poetry");
        assert_eq!(process.args, tokens(&["run", "some-script"]));
        assert!(process.default);
        assert!(process.direct);
    }

    #[test]
    fn test_web_process_without_tokens() {
        let process = LaunchProcess::web(&[]);
        assert_eq!(process.args, tokens(&["run"]));
    }

    #[test]
    fn test_display_marks_default() {
        let mut process = LaunchProcess::web(&tokens(&["a", "custom", "command"]));
        assert_eq!(
            process.to_string(),
            "web (default): poetry run a custom command"
        );

        process.default = false;
        assert_eq!(process.to_string(), "web: poetry run a custom command");
    }

    #[test]
    fn test_reload_plan_order() {
        let original = LaunchProcess {
            default: false,
            ..LaunchProcess::web(&tokens(&["app"]))
        };
        let reload = LaunchProcess {
            process_type: "reload-web".to_string(),
            command: "watchexec".to_string(),
            args: tokens(&["--", "poetry", "run", "app"]),
            direct: true,
            default: true,
        };
        let plan = LaunchPlan::Reload {
            reload: reload.clone(),
            original: original.clone(),
        };

        assert_eq!(plan.into_processes(), vec![reload, original]);
    }

    #[test]
    fn test_single_plan() {
        let web = LaunchProcess::web(&tokens(&["app"]));
        let plan = LaunchPlan::Single(web.clone());

        assert_eq!(plan.into_processes(), vec![web]);
    }
}
