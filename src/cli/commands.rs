use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Assigns the `poetry run` launch process for Python container images
#[derive(Parser, Debug)]
#[command(
    name = "poetry-run",
    about = "Assigns the `poetry run` launch process for Python container images",
    version,
    long_about = "poetry-run decides which command a Poetry application starts with. \
                  The run target comes from BP_POETRY_RUN_TARGET or from the single script \
                  in [tool.poetry.scripts]; with BP_LIVE_RELOAD_ENABLED=true the process \
                  is wrapped in watchexec so it restarts on source changes."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        help = "Diagnostic log level (trace, debug, info, warn, error)"
    )]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Show debug diagnostics on stderr"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only errors on stderr"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Check whether the application is a Poetry project",
        long_about = "Passes when pyproject.toml exists and prints the required dependencies.\n\
                      Exits with status 100 when the buildpack does not apply.\n\n\
                      Examples:\n  \
                      poetry-run detect\n  \
                      poetry-run detect /workspace --plan /tmp/plan.toml"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Assign launch processes",
        long_about = "Resolves the poetry run target, applies live reload, logs the decision \
                      and writes launch.toml to the layers directory.\n\n\
                      Examples:\n  \
                      poetry-run build /workspace --layers /layers/poetry-run\n  \
                      BP_POETRY_RUN_TARGET='gunicorn app:server' poetry-run build"
    )]
    Build(BuildArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Application directory (defaults to current directory)"
    )]
    pub working_dir: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Write the build plan as TOML to FILE")]
    pub plan: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    #[arg(
        value_name = "PATH",
        help = "Application directory (defaults to current directory)"
    )]
    pub working_dir: Option<PathBuf>,

    #[arg(
        short = 'l',
        long,
        value_name = "DIR",
        default_value = "layers",
        help = "Layers directory that receives launch.toml"
    )]
    pub layers: PathBuf,

    #[arg(
        long,
        value_name = "NAME",
        default_value = "Poetry Run Buildpack",
        help = "Buildpack name shown in the build log"
    )]
    pub buildpack_name: String,

    #[arg(
        long,
        value_name = "VERSION",
        help = "Buildpack version shown in the build log (defaults to this binary's version)"
    )]
    pub buildpack_version: Option<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Also write the build result to FILE"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "toml",
        help = "Format used with --output"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Toml,
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Toml => super::output::OutputFormat::Toml,
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
