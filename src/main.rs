//! CardioRisk: Heart disease risk estimation
//!
//! Main entry point. Runs the TUI when attached to a terminal; otherwise
//! reads one JSON patient record from stdin and writes the report to stdout.

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiorisk::adapters::sanitize::SanitizingMakeWriter;
use cardiorisk::application::{run_headless, InferenceAdapter, RiskPipeline};
use cardiorisk::config::{AppConfig, LogMode};
use cardiorisk::tui::App;
use cardiorisk::CardioRiskError;

fn init_logging(config: &AppConfig, interactive: bool) -> Result<WorkerGuard> {
    // Logging to the terminal would corrupt the TUI's alternate screen.
    let mode = match config.log_mode {
        LogMode::Auto if interactive => LogMode::File,
        LogMode::Auto => LogMode::Stderr,
        other => other,
    };

    let (writer, guard) = match mode {
        LogMode::File => {
            if let Some(parent) = config.log_file.parent() {
                // Best-effort: the open below reports the real failure.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)
                .with_context(|| format!("Failed to open log file {:?}", config.log_file))?;
            tracing_appender::non_blocking(file)
        }
        LogMode::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogMode::Stderr | LogMode::Auto => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    Ok(guard)
}

fn main() -> Result<ExitCode> {
    let config = AppConfig::from_env()?;
    let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    let _guard = init_logging(&config, interactive)?;

    tracing::info!("Starting CardioRisk...");

    // Refuse to start without a usable, verified model.
    let model = config
        .model_loader()
        .load(&config.model_path)
        .map_err(CardioRiskError::from)
        .with_context(|| format!("Failed to load model from {:?}", config.model_path))?;
    let pipeline = Arc::new(RiskPipeline::new(InferenceAdapter::new(Arc::new(model))));

    let code = if interactive {
        let mut app = App::new(pipeline);
        app.run()?;
        ExitCode::SUCCESS
    } else {
        let outcome = run_headless(
            &*pipeline,
            std::io::stdin().lock(),
            std::io::stdout().lock(),
            std::io::stderr().lock(),
        )
        .context("Headless assessment failed")?;
        ExitCode::from(outcome.exit_code())
    };

    tracing::info!("CardioRisk shutdown complete.");
    Ok(code)
}
