//! End-to-end label run: submit a purchase order, wait for extraction,
//! render the label and fetch its PDF.

use std::path::PathBuf;

use crate::app_state::AppState;
use crate::models::job::JobStatus;
use crate::services::dox::DoxError;
use crate::services::label::render_label;
use crate::services::labelary::LabelaryError;
use crate::services::poller::{PollError, Sleeper};

/// Clients requested for the diagnostic listing.
const CLIENT_LIST_LIMIT: u32 = 10;

/// How a run ended when no step failed.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// The label PDF was written.
    LabelWritten { job_id: String, path: PathBuf },
    /// Extraction failed on the service side; nothing was rendered.
    JobFailed { job_id: String },
    /// The job finished but its result could not be read; nothing was rendered.
    NoResult { job_id: String },
}

/// Run the whole pipeline once.
///
/// Any step failure aborts the run. Side effects of earlier steps (the
/// uploaded document, a previous label file) are left in place.
pub async fn run<Z>(state: &AppState, sleeper: &Z) -> Result<WorkflowOutcome, WorkflowError>
where
    Z: Sleeper + ?Sized,
{
    let config = &state.config;

    if !config.skip_client_list {
        let clients = state.dox.list_clients(CLIENT_LIST_LIMIT).await?;
        tracing::info!(count = clients.len(), "Available clients");
        for client in &clients {
            tracing::info!(client_id = %client.client_id, client_name = %client.client_name, "Client");
        }
    }

    let job_id = state.dox.submit_document(&config.document_path).await?;

    let status = state
        .poller
        .wait_for_completion(state.dox.as_ref(), sleeper, &job_id)
        .await?;

    if status == JobStatus::Failed {
        tracing::warn!(job_id = %job_id, "Extraction job failed, no label produced");
        return Ok(WorkflowOutcome::JobFailed { job_id });
    }

    let Some(result) = state.dox.fetch_result(&job_id).await? else {
        return Ok(WorkflowOutcome::NoResult { job_id });
    };

    let label = render_label(&result, &config.qr_data);
    tracing::debug!(job_id = %job_id, zpl = %label, "Generated ZPL");

    state
        .labelary
        .render_to_file(&label, state.label_spec, &config.output_path)
        .await?;

    Ok(WorkflowOutcome::LabelWritten {
        job_id,
        path: config.output_path.clone(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Dox(#[from] DoxError),

    #[error("Polling failed: {0}")]
    Poll(#[from] PollError),

    #[error("Label rendering failed: {0}")]
    Labelary(#[from] LabelaryError),
}
