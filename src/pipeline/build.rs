//! Build phase: resolve the run target, assemble the `web` process, apply
//! live reload, then report and package the launch processes.

use std::io::Write;
use tracing::info;

use super::context::BuildContext;
use super::reload::apply_live_reload;
use super::target::resolve;
use crate::error::BuildError;
use crate::launch::{BuildResult, LaunchPlan, LaunchProcess};
use crate::progress::Emitter;
use crate::pyproject::PyProjectParser;
use crate::reload::Reloader;

pub struct Build<P, R> {
    parser: P,
    reloader: R,
    run_target: Option<String>,
}

impl<P, R> Build<P, R>
where
    P: PyProjectParser,
    R: Reloader,
{
    pub fn new(parser: P, reloader: R) -> Self {
        Self {
            parser,
            reloader,
            run_target: None,
        }
    }

    /// Operator override for the run target, typically `BP_POETRY_RUN_TARGET`
    pub fn with_run_target(mut self, run_target: Option<String>) -> Self {
        self.run_target = run_target;
        self
    }

    /// Runs the pipeline once. Stops at the first error without producing a
    /// result.
    pub fn run<W: Write>(
        &self,
        context: &BuildContext,
        emitter: &mut Emitter<W>,
    ) -> Result<BuildResult, BuildError> {
        emitter.title(format_args!(
            "{} {}",
            context.buildpack.name, context.buildpack.version
        ))?;
        emitter.process("Finding the poetry run target")?;
        emitter.debug(format_args!(
            "Working directory: {}",
            context.working_dir().display()
        ))?;

        let target = resolve(
            self.run_target.as_deref(),
            context.working_dir(),
            &self.parser,
        )?;
        emitter.subprocess(&target)?;
        emitter.break_line()?;

        let web = LaunchProcess::web(&target.tokens);
        let plan = apply_live_reload(web, context.working_dir(), &self.reloader)?;

        report(plan, emitter)
    }
}

/// Logs the processes in launch order and packages them into the result
pub fn report<W: Write>(
    plan: LaunchPlan,
    emitter: &mut Emitter<W>,
) -> Result<BuildResult, BuildError> {
    let processes = plan.into_processes();
    emitter.launch_processes(&processes)?;

    let result = BuildResult::with_processes(processes);
    info!(
        processes = result.launch.processes.len(),
        default = result
            .default_process()
            .map(|p| p.process_type.as_str())
            .unwrap_or_default(),
        "Assigned launch processes"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::BuildpackInfo;
    use crate::pyproject::MockPyProjectParser;
    use crate::reload::{MockReloader, WatchexecReloader};
    use anyhow::anyhow;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn context() -> BuildContext {
        BuildContext::new("/work", "/layers").with_buildpack(BuildpackInfo {
            name: "Some Buildpack".to_string(),
            version: "some-version".to_string(),
        })
    }

    fn parser_returning(script: &'static str) -> MockPyProjectParser {
        let mut parser = MockPyProjectParser::new();
        parser
            .expect_parse()
            .times(1)
            .returning(move |_| Ok(script.to_string()));
        parser
    }

    fn reloader(enabled: bool) -> MockReloader {
        let mut reloader = MockReloader::new();
        reloader
            .expect_should_enable_live_reload()
            .returning(move |_| Ok(enabled));
        reloader
            .expect_transform_reloadable_processes()
            .returning(|process, spec| {
                WatchexecReloader::default().transform_reloadable_processes(process, spec)
            });
        reloader
    }

    fn run<P: PyProjectParser, R: Reloader>(
        build: &Build<P, R>,
    ) -> (Result<BuildResult, BuildError>, String) {
        let mut emitter = Emitter::new(Vec::new());
        let result = build.run(&context(), &mut emitter);
        let log = String::from_utf8(emitter.into_inner()).unwrap();
        (result, log)
    }

    fn web(args: &[&str], default: bool) -> LaunchProcess {
        LaunchProcess {
            process_type: "web".to_string(),
            command: "poetry".to_string(),
            args: strings(args),
            direct: true,
            default,
        }
    }

    #[test]
    fn test_parsed_script_without_reload() {
        let build = Build::new(parser_returning("some-script"), reloader(false));

        let (result, log) = run(&build);

        assert_eq!(
            result.unwrap(),
            BuildResult::with_processes(vec![web(&["run", "some-script"], true)])
        );
        assert_eq!(
            log,
            "Some Buildpack some-version\n\
             \x20 Finding the poetry run target\n\
             \x20   Found pyproject.toml script=some-script\n\
             \n\
             \x20 Assigning launch processes:\n\
             \x20   web (default): poetry run some-script\n\
             \n"
        );
    }

    #[test]
    fn test_parsed_script_with_reload() {
        let build = Build::new(parser_returning("some-script"), reloader(true));

        let (result, log) = run(&build);

        assert_eq!(
            result.unwrap().launch.processes,
            vec![
                LaunchProcess {
                    process_type: "reload-web".to_string(),
                    command: "watchexec".to_string(),
                    args: strings(&[
                        "--restart",
                        "--watch",
                        "/work",
                        "--shell",
                        "none",
                        "--",
                        "poetry",
                        "run",
                        "some-script",
                    ]),
                    direct: true,
                    default: true,
                },
                web(&["run", "some-script"], false),
            ]
        );
        assert!(log.contains(
            "reload-web (default): watchexec --restart --watch /work --shell none -- poetry run some-script"
        ));
        assert!(log.contains("    web: poetry run some-script\n"));
    }

    #[test]
    fn test_override_skips_parser() {
        let mut parser = MockPyProjectParser::new();
        parser.expect_parse().never();
        let build = Build::new(parser, reloader(false))
            .with_run_target(Some("a custom command".to_string()));

        let (result, log) = run(&build);

        assert_eq!(
            result.unwrap(),
            BuildResult::with_processes(vec![web(&["run", "a", "custom", "command"], true)])
        );
        assert!(log.contains("Found BP_POETRY_RUN_TARGET=a custom command"));
        assert!(log.contains("web (default): poetry run a custom command"));
    }

    #[test]
    fn test_override_with_reload() {
        let mut parser = MockPyProjectParser::new();
        parser.expect_parse().never();
        let build = Build::new(parser, reloader(true))
            .with_run_target(Some("a custom command".to_string()));

        let (result, _) = run(&build);
        let processes = result.unwrap().launch.processes;

        assert_eq!(processes.len(), 2);
        assert_eq!(
            processes[0].args,
            strings(&[
                "--restart",
                "--watch",
                "/work",
                "--shell",
                "none",
                "--",
                "poetry",
                "run",
                "a",
                "custom",
                "command",
            ])
        );
        assert_eq!(processes[1], web(&["run", "a", "custom", "command"], false));
    }

    #[test]
    fn test_blank_override_runs_bare_poetry_run() {
        let mut parser = MockPyProjectParser::new();
        parser.expect_parse().never();
        let build = Build::new(parser, reloader(false)).with_run_target(Some("  ".to_string()));

        let (result, log) = run(&build);

        assert_eq!(result.unwrap().launch.processes, vec![web(&["run"], true)]);
        assert!(log.contains("Found BP_POETRY_RUN_TARGET=\n"));
        assert!(log.contains("web (default): poetry run\n"));
    }

    #[test]
    fn test_parser_error_fails_build() {
        let mut parser = MockPyProjectParser::new();
        parser
            .expect_parse()
            .returning(|_| Err(anyhow!("some error")));
        let mut reloader = MockReloader::new();
        reloader.expect_should_enable_live_reload().never();
        let build = Build::new(parser, reloader);

        let (result, log) = run(&build);
        let err = result.unwrap_err();

        assert!(matches!(err, BuildError::TargetResolution(_)));
        assert!(err.to_string().contains("some error"));
        assert!(!log.contains("Assigning launch processes:"));
    }

    #[test]
    fn test_reload_error_fails_build() {
        let mut reloader = MockReloader::new();
        reloader
            .expect_should_enable_live_reload()
            .returning(|_| Err(anyhow!("failed to parse")));
        let build = Build::new(parser_returning("some-script"), reloader);

        let (result, log) = run(&build);
        let err = result.unwrap_err();

        assert!(err.to_string().contains("failed to parse"));
        assert!(log.contains("Found pyproject.toml script=some-script"));
        assert!(!log.contains("Assigning launch processes:"));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let mut parser = MockPyProjectParser::new();
        parser
            .expect_parse()
            .times(2)
            .returning(|_| Ok("some-script".to_string()));
        let build = Build::new(parser, reloader(true));

        let (first, first_log) = run(&build);
        let (second, second_log) = run(&build);

        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(first_log, second_log);
    }

    #[test]
    fn test_debug_level_logs_working_dir() {
        let build = Build::new(parser_returning("some-script"), reloader(false));
        let mut emitter = Emitter::new(Vec::new()).with_level(crate::progress::LogLevel::Debug);

        build.run(&context(), &mut emitter).unwrap();
        let log = String::from_utf8(emitter.into_inner()).unwrap();

        assert!(log.contains(
            "  Finding the poetry run target\n    Working directory: /work\n    Found pyproject.toml"
        ));
    }

    #[test]
    fn test_exactly_one_default_process() {
        for (enabled, expected) in [(false, "web"), (true, "reload-web")] {
            let build = Build::new(parser_returning("some-script"), reloader(enabled));
            let result = run(&build).0.unwrap();

            let defaults = result.launch.processes.iter().filter(|p| p.default).count();
            assert_eq!(defaults, 1);
            assert_eq!(
                result.default_process().map(|p| p.process_type.as_str()),
                Some(expected)
            );
        }
    }
}
