mod args;
mod logging;
mod progress;

use clap::Parser;
use randjson_generate::{CancelToken, GenerateOptions, GenerationEngine, GenerationError};
use thiserror::Error;

use args::Cli;
use logging::init_logging;
use progress::{BarObserver, progress_bar, report_interrupt};

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Config(#[from] randjson_core::Error),
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("generation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.generate_config()?;
    let data_count = config.data_count;
    let engine = GenerationEngine::new(GenerateOptions::new(cli.output.clone(), config));

    let bar = progress_bar(data_count, !cli.no_progress);
    let mut observer = BarObserver::new(bar.clone(), data_count);
    let cancel = CancelToken::new();
    let task_cancel = cancel.clone();

    let mut task =
        tokio::task::spawn_blocking(move || engine.run(&mut observer, &task_cancel));

    let outcome = tokio::select! {
        joined = &mut task => joined?,
        Ok(()) = tokio::signal::ctrl_c() => {
            report_interrupt(&bar);
            cancel.cancel();
            task.await?
        }
    };
    bar.finish_and_clear();
    let result = outcome?;

    if let Some(report_path) = &cli.report {
        result.report.write_to(report_path)?;
        tracing::info!(event = "report_written", path = %report_path.display());
    }

    Ok(())
}
