//! Detect and build phases

mod build;
mod context;
mod detect;
mod reload;
mod target;

pub use build::{report, Build};
pub use context::{BuildContext, BuildpackInfo};
pub use detect::{BuildPlan, Detect, Requirement, RequirementMetadata};
pub use reload::apply_live_reload;
pub use target::{resolve, LaunchTarget, TargetOrigin, RUN_TARGET_ENV};
