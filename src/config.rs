//! Build configuration
//!
//! All environment input is read once, here, and handed to the pipeline
//! explicitly. The pipeline itself never touches process environment.
//!
//! # Environment Variables
//!
//! - `BP_POETRY_RUN_TARGET`: replaces the `pyproject.toml` script; split on
//!   whitespace, no quoting
//! - `BP_LIVE_RELOAD_ENABLED`: wrap the launch process in `watchexec`
//! - `BP_LOG_LEVEL`: build log verbosity (`INFO`|`DEBUG`) - default: `INFO`;
//!   other values log at `INFO` with a warning
//! - `POETRY_RUN_LOG_JSON`: emit diagnostics as JSON (true|false) - default: false

use std::env;
use std::fmt;
use thiserror::Error;

use crate::pipeline::RUN_TARGET_ENV;
use crate::progress::LogLevel;
use crate::reload::LIVE_RELOAD_ENV;

pub const LOG_LEVEL_ENV: &str = "BP_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "POETRY_RUN_LOG_JSON";

const DEFAULT_LOG_LEVEL: &str = "INFO";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid BP_LOG_LEVEL: {0}. Valid options: INFO, DEBUG")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Raw `BP_POETRY_RUN_TARGET`; `Some` even when blank
    pub run_target: Option<String>,
    /// Raw `BP_LIVE_RELOAD_ENABLED`, parsed by the reloader
    pub live_reload: Option<String>,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            run_target: None,
            live_reload: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
        }
    }
}

impl BuildConfig {
    pub fn from_env() -> Self {
        let run_target = var_lossy(RUN_TARGET_ENV);
        let live_reload = var_lossy(LIVE_RELOAD_ENV);

        let log_level = var_lossy(LOG_LEVEL_ENV)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
            .to_uppercase();

        let log_json = env::var(LOG_JSON_ENV)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            run_target,
            live_reload,
            log_level,
            log_json,
        }
    }

    /// Reports settings the build will not honor as given. None of them
    /// are fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match LogLevel::parse(&self.log_level) {
            Some(_) => Ok(()),
            None => Err(ConfigError::InvalidLogLevel(self.log_level.clone())),
        }
    }

    /// Build log level; anything other than `DEBUG` logs at `INFO`
    pub fn emitter_level(&self) -> LogLevel {
        LogLevel::parse(&self.log_level).unwrap_or_default()
    }
}

/// A set variable is always `Some`, even when it is not valid UTF-8.
/// Invalid bytes become U+FFFD.
fn var_lossy(key: &str) -> Option<String> {
    env::var_os(key).map(|value| value.to_string_lossy().into_owned())
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Poetry Run Configuration:")?;
        writeln!(
            f,
            "  {}: {}",
            RUN_TARGET_ENV,
            self.run_target.as_deref().unwrap_or("(unset)")
        )?;
        writeln!(
            f,
            "  {}: {}",
            LIVE_RELOAD_ENV,
            self.live_reload.as_deref().unwrap_or("(unset)")
        )?;
        writeln!(f, "  {}: {}", LOG_LEVEL_ENV, self.log_level)?;
        writeln!(f, "  JSON diagnostics: {}", self.log_json)?;
        Ok(())
    }
}
