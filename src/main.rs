use poetry_run::cli::commands::{CliArgs, Commands};
use poetry_run::cli::handlers::{handle_build, handle_detect};
use poetry_run::util::logging::parse_level;
use poetry_run::util::{init_logging, LoggingConfig};
use poetry_run::{BuildConfig, VERSION};

use clap::Parser;
use tracing::{debug, warn, Level};

fn main() {
    let args = CliArgs::parse();
    let config = BuildConfig::from_env();
    init_logging_from_args(&args, &config);

    debug!("poetry-run v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    if let Err(e) = config.validate() {
        warn!("{}; logging at INFO", e);
    }
    debug!("{}", config);

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args, &config),
        Commands::Build(build_args) => handle_build(build_args, &config),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs, config: &BuildConfig) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose || config.log_level == "DEBUG" {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    init_logging(LoggingConfig {
        level,
        use_json: config.log_json,
        ..LoggingConfig::default()
    });
}
