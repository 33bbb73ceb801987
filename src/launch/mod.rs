//! Launch processes and the build result that carries them

mod process;
mod result;

pub use process::{LaunchPlan, LaunchProcess, WEB_PROCESS_TYPE};
pub use result::{
    BuildResult, BuildpackPlan, BuildpackPlanEntry, LaunchMetadata, LAUNCH_TOML,
};
