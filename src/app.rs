//! Main application orchestration and execution

use crate::{
    cli::{parse_args, supports_color, Cli, HelpSystem, Invocation},
    config::{display_config_summary, load_config, LoadedConfig},
    dns::SystemResolver,
    error::{AppError, Result},
    executor::{ProbeEngine, RunOutcome},
    logging::LoggerFactory,
    models::ProbeConfig,
    output::ConsoleReporter,
    prober::TcpProber,
};
use std::io::{self, IsTerminal, Write};

/// Main application struct that coordinates all components
pub struct App {
    loaded: LoadedConfig,
}

impl App {
    /// Build the run configuration from parsed arguments
    pub fn new(cli: Cli) -> Result<Self> {
        Ok(Self {
            loaded: load_config(cli)?,
        })
    }

    /// The configuration this run will use
    pub fn config(&self) -> &ProbeConfig {
        &self.loaded.config
    }

    /// Run the application
    pub async fn run(self) -> Result<RunOutcome> {
        let LoadedConfig { config, warnings } = self.loaded;
        let mut reporter = ConsoleReporter::stdout();

        for warning in &warnings {
            reporter.warning(warning)?;
        }

        let factory = LoggerFactory::new(&config);
        let app_logger = factory.create_logger("APP").await;
        app_logger
            .debug("Configuration loaded")
            .field("summary", display_config_summary(&config))
            .field("warnings", &warnings)
            .log()
            .await;

        let probe_logger = factory.create_probe_logger().await;
        let resolver = SystemResolver::new(config.address_family);
        let engine = ProbeEngine::new(config, resolver, TcpProber::new(), probe_logger);

        match engine.run(&mut reporter).await {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                let logger = factory.create_probe_logger().await;
                logger.log_error(&error, "Run aborted").await;
                Err(error)
            }
        }
    }
}

/// Run zing over a full argument vector and return the process exit code
pub async fn run_cli<I, S>(args: I) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let cli = match parse_args(args) {
        Ok(Invocation::Help) => {
            let usage = HelpSystem::new(io::stdout().is_terminal()).usage();
            return match write_stdout(&usage) {
                Ok(()) => 0,
                Err(error) => report_failure(&error),
            };
        }
        Ok(Invocation::Run(cli)) => cli,
        Err(error) => {
            return match write_stdout(&format!("{}\n\n", error.message())) {
                Ok(()) => error.exit_code(),
                Err(write_error) => report_failure(&write_error),
            };
        }
    };

    let result = match App::new(cli) {
        Ok(app) => app.run().await,
        Err(error) => Err(error),
    };

    match result {
        Ok(RunOutcome::Completed(_)) | Ok(RunOutcome::Absent) => 0,
        Err(error) => report_failure(&error),
    }
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn report_failure(error: &AppError) -> i32 {
    eprintln!("{}", error.format_for_console(supports_color()));
    error.exit_code()
}
