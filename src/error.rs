use std::io;
use thiserror::Error;

/// Reasons a build invocation fails. Nothing is retried and no partial
/// result is produced.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The project metadata did not yield a script to run
    #[error("failed to resolve poetry run target: {0:#}")]
    TargetResolution(#[source] anyhow::Error),

    /// The reloader could not decide whether live reload is enabled
    #[error(transparent)]
    LiveReload(anyhow::Error),

    #[error("failed to write build log: {0}")]
    Log(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum DetectError {
    /// The buildpack does not apply to this application
    #[error("{0}")]
    Fail(String),

    #[error(transparent)]
    LiveReload(anyhow::Error),

    #[error("failed to write detect log: {0}")]
    Log(#[from] io::Error),
}
