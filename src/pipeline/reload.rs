use std::path::Path;
use tracing::debug;

use crate::error::BuildError;
use crate::launch::{LaunchPlan, LaunchProcess};
use crate::reload::{ReloadableProcessSpec, Reloader};

/// Wraps `process` in a file watcher when the reloader enables live reload
/// for `working_dir`. Enablement errors fail the build as-is.
pub fn apply_live_reload<R>(
    process: LaunchProcess,
    working_dir: &Path,
    reloader: &R,
) -> Result<LaunchPlan, BuildError>
where
    R: Reloader + ?Sized,
{
    let enabled = reloader
        .should_enable_live_reload(working_dir)
        .map_err(BuildError::LiveReload)?;

    if !enabled {
        return Ok(LaunchPlan::Single(process));
    }

    let (reload, original) = reloader
        .transform_reloadable_processes(process, ReloadableProcessSpec::watching(working_dir));
    debug!(
        reload = %reload.process_type,
        original = %original.process_type,
        "Live reload enabled"
    );

    Ok(LaunchPlan::Reload { reload, original })
}
