//! Subcommand handlers. Each returns the process exit code.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::commands::{BuildArgs, DetectArgs};
use super::output::OutputFormatter;
use crate::config::BuildConfig;
use crate::error::DetectError;
use crate::fs::RealFileSystem;
use crate::pipeline::{Build, BuildContext, BuildpackInfo, Detect};
use crate::progress::Emitter;
use crate::pyproject::PyProjectTomlParser;
use crate::reload::WatchexecReloader;

/// Detect ran and the buildpack does not apply
pub const EXIT_DETECT_FAIL: i32 = 100;

fn resolve_working_dir(path: Option<&PathBuf>) -> Result<PathBuf, String> {
    let dir = match path {
        Some(path) => path.clone(),
        None => env::current_dir().map_err(|e| format!("Failed to get current directory: {}", e))?,
    };

    if !dir.is_dir() {
        return Err(format!("Working directory does not exist: {}", dir.display()));
    }

    dir.canonicalize()
        .map_err(|e| format!("Failed to canonicalize {}: {}", dir.display(), e))
}

pub fn handle_detect(args: &DetectArgs, config: &BuildConfig) -> i32 {
    let working_dir = match resolve_working_dir(args.working_dir.as_ref()) {
        Ok(dir) => dir,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };
    debug!("Working directory: {}", working_dir.display());

    let level = config.emitter_level();

    let context = BuildContext::new(working_dir, PathBuf::new());
    let detect = Detect::new(
        Arc::new(RealFileSystem::new()),
        WatchexecReloader::new(config.live_reload.clone()),
    );
    let mut emitter = Emitter::new(io::stdout()).with_level(level);

    let plan = match detect.run(&context, &mut emitter) {
        Ok(plan) => plan,
        Err(DetectError::Fail(reason)) => {
            info!("Detection failed: {}", reason);
            eprintln!("{}", reason);
            return EXIT_DETECT_FAIL;
        }
        Err(e) => {
            error!("Detection error: {}", e);
            eprintln!("{}", e);
            return 1;
        }
    };

    let content = match toml::to_string(&plan) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to serialize build plan: {}", e);
            return 1;
        }
    };

    match &args.plan {
        Some(path) => {
            if let Err(e) = fs::write(path, content) {
                error!("Failed to write build plan to {}: {}", path.display(), e);
                return 1;
            }
            debug!("Build plan written to {}", path.display());
        }
        None => print!("{}", content),
    }

    0
}

pub fn handle_build(args: &BuildArgs, config: &BuildConfig) -> i32 {
    let working_dir = match resolve_working_dir(args.working_dir.as_ref()) {
        Ok(dir) => dir,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let level = config.emitter_level();

    let context = BuildContext::new(working_dir, args.layers.clone()).with_buildpack(BuildpackInfo {
        name: args.buildpack_name.clone(),
        version: args
            .buildpack_version
            .clone()
            .unwrap_or_else(|| crate::VERSION.to_string()),
    });
    debug!("Build context: {:?}", context);

    let build = Build::new(
        PyProjectTomlParser::new(),
        WatchexecReloader::new(config.live_reload.clone()),
    )
    .with_run_target(config.run_target.clone());

    let mut emitter = Emitter::new(io::stdout()).with_level(level);
    let result = match build.run(&context, &mut emitter) {
        Ok(result) => result,
        Err(e) => {
            error!("Build failed: {}", e);
            eprintln!("{}", e);
            return 1;
        }
    };

    match result.write_launch_toml(&context.layers_dir) {
        Ok(path) => debug!("Launch metadata written to {}", path.display()),
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    }

    if let Some(path) = &args.output {
        let formatter = OutputFormatter::new(args.format.into());
        let written = formatter
            .format(&result)
            .and_then(|content| fs::write(path, content).map_err(anyhow::Error::from));
        if let Err(e) = written {
            error!("Failed to write output to {}: {:#}", path.display(), e);
            return 1;
        }
    }

    0
}
