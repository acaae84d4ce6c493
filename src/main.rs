use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use garde::Validate;
use tracing_subscriber::EnvFilter;

use po_label_print::{
    app_state::AppState,
    config::AppConfig,
    services::{
        poller::TokioSleeper,
        workflow::{self, WorkflowOutcome},
    },
};

/// Extract a purchase order with DOX and print its shipping label to PDF.
#[derive(Debug, Parser)]
#[command(name = "po-label-print", version, about)]
struct Cli {
    /// Purchase order document to upload (overrides DOCUMENT_PATH)
    #[arg(long)]
    document: Option<PathBuf>,

    /// Where to write the label PDF (overrides OUTPUT_PATH)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Give up after this many status checks (overrides MAX_POLL_ATTEMPTS)
    #[arg(long)]
    max_poll_attempts: Option<u32>,

    /// Do not list DOX clients before submitting
    #[arg(long)]
    skip_client_list: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration from environment");
            return ExitCode::FAILURE;
        }
    };

    if let Some(document) = cli.document {
        config.document_path = document;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if cli.max_poll_attempts.is_some() {
        config.max_poll_attempts = cli.max_poll_attempts;
    }
    config.skip_client_list |= cli.skip_client_list;

    if let Err(report) = config.validate() {
        tracing::error!(error = %report, "Invalid command line overrides");
        return ExitCode::FAILURE;
    }

    let state = match AppState::from_config(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize HTTP client");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        document = %state.config.document_path.display(),
        output = %state.config.output_path.display(),
        "Starting purchase order label run"
    );

    match workflow::run(&state, &TokioSleeper).await {
        Ok(WorkflowOutcome::LabelWritten { job_id, path }) => {
            tracing::info!(job_id = %job_id, path = %path.display(), "Label written");
            ExitCode::SUCCESS
        }
        Ok(WorkflowOutcome::JobFailed { job_id }) => {
            tracing::info!(job_id = %job_id, "Job failed, nothing to print");
            ExitCode::SUCCESS
        }
        Ok(WorkflowOutcome::NoResult { job_id }) => {
            tracing::info!(job_id = %job_id, "No usable result, nothing to print");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Label run aborted");
            ExitCode::FAILURE
        }
    }
}
