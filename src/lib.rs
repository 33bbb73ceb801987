//! poetry-run - assigns the `poetry run` launch process for Python images
//!
//! At image build time this crate decides what command a Poetry-managed
//! application starts with, and optionally wraps it in a file watcher so the
//! process restarts when sources change.
//!
//! # Build flow
//!
//! 1. Resolve the run target from `BP_POETRY_RUN_TARGET`, or from the single
//!    script declared in `[tool.poetry.scripts]`
//! 2. Assemble the `web` process: `poetry run <target...>`
//! 3. Ask the [`reload::Reloader`] whether live reload is on; if so, add a
//!    `reload-web` process that becomes the default
//! 4. Log the processes and return them as a [`launch::BuildResult`]
//!
//! # Example
//!
//! ```no_run
//! use poetry_run::pipeline::{Build, BuildContext};
//! use poetry_run::progress::Emitter;
//! use poetry_run::pyproject::PyProjectTomlParser;
//! use poetry_run::reload::WatchexecReloader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let build = Build::new(PyProjectTomlParser::new(), WatchexecReloader::default());
//! let context = BuildContext::new("/workspace", "/layers/poetry-run");
//!
//! let mut emitter = Emitter::new(std::io::stdout());
//! let result = build.run(&context, &mut emitter)?;
//! result.write_launch_toml(&context.layers_dir)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod launch;
pub mod pipeline;
pub mod progress;
pub mod pyproject;
pub mod reload;
pub mod util;

pub use config::{BuildConfig, ConfigError};
pub use error::{BuildError, DetectError};
pub use launch::{BuildResult, LaunchPlan, LaunchProcess};
pub use pipeline::{Build, BuildContext, Detect};

/// Python runtime dependency, provided by the CPython buildpack
pub const CPYTHON: &str = "cpython";

/// Poetry itself; also the command every launch process runs
pub const POETRY: &str = "poetry";

/// Virtual environment with the application's installed dependencies
pub const POETRY_VENV: &str = "poetry-venv";

/// File watcher used for live reload
pub const WATCHEXEC: &str = "watchexec";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");
