use anyhow::{anyhow, Result};
use std::path::Path;
use tracing::debug;

use super::{parse_bool_flag, ReloadableProcessSpec, Reloader, LIVE_RELOAD_ENV};
use crate::launch::LaunchProcess;
use crate::WATCHEXEC;

/// Wraps processes in `watchexec --restart`.
///
/// `launch.toml` arguments are strings, so watch and ignore paths are
/// converted lossily: bytes that are not valid UTF-8 become U+FFFD.
///
/// The enablement flag is injected rather than read from the environment so
/// a build can be replayed with an explicit value.
#[derive(Debug, Clone, Default)]
pub struct WatchexecReloader {
    live_reload: Option<String>,
}

impl WatchexecReloader {
    pub fn new(live_reload: Option<String>) -> Self {
        Self { live_reload }
    }
}

impl Reloader for WatchexecReloader {
    fn should_enable_live_reload(&self, working_dir: &Path) -> Result<bool> {
        let Some(value) = self.live_reload.as_deref() else {
            return Ok(false);
        };

        let enabled = parse_bool_flag(value).ok_or_else(|| {
            anyhow!(
                "failed to parse {} value '{}': expected a boolean",
                LIVE_RELOAD_ENV,
                value
            )
        })?;

        debug!(working_dir = %working_dir.display(), enabled, "Live reload decision");
        Ok(enabled)
    }

    fn transform_reloadable_processes(
        &self,
        process: LaunchProcess,
        spec: ReloadableProcessSpec,
    ) -> (LaunchProcess, LaunchProcess) {
        let mut args = vec!["--restart".to_string()];

        for path in &spec.watch_paths {
            args.push("--watch".to_string());
            args.push(path.to_string_lossy().into_owned());
        }
        for path in &spec.ignore_paths {
            args.push("--ignore".to_string());
            args.push(path.to_string_lossy().into_owned());
        }

        args.push("--shell".to_string());
        args.push(spec.shell);

        if spec.verbosity_level > 0 {
            args.push(format!("-{}", "v".repeat(usize::from(spec.verbosity_level))));
        }

        args.push("--".to_string());
        args.push(process.command.clone());
        args.extend(process.args.iter().cloned());

        let reload = LaunchProcess {
            process_type: format!("reload-{}", process.process_type),
            command: WATCHEXEC.to_string(),
            args,
            direct: true,
            default: true,
        };
        let original = LaunchProcess {
            default: false,
            ..process
        };

        (reload, original)
    }
}
