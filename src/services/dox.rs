//! SAP Document Information Extraction (DOX) client.
//!
//! Covers the four calls the label workflow needs: listing clients,
//! submitting a document, checking job status and fetching the result.
//! Each call obtains a fresh bearer token from [`TokenProvider`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Serialize;

use crate::models::client::{ClientInfo, ClientList};
use crate::models::extraction::ExtractionResult;
use crate::models::job::{JobStatus, JobStatusResponse, SubmittedJob};
use crate::services::auth::{AuthError, TokenProvider};
use crate::services::poller::JobStatusSource;

const CLIENTS_PATH: &str = "/document-information-extraction/v1/clients";
const JOB_RESULT_PATH: &str = "/document-information-extraction/v1/document/jobs";

const DOCUMENT_TYPE: &str = "purchaseOrder";
const DOX_CLIENT: &str = "default";

/// The `options` part sent alongside an uploaded document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitOptions<'a> {
    document_type: &'a str,
    client_id: &'a str,
    schema_id: &'a str,
}

pub struct DoxClient {
    http: Client,
    auth: TokenProvider,
    api_url: String,
    base_url: String,
    schema_id: String,
}

impl DoxClient {
    pub fn new(
        http: Client,
        auth: TokenProvider,
        api_url: &str,
        base_url: &str,
        schema_id: &str,
    ) -> Self {
        Self {
            http,
            auth,
            api_url: api_url.trim_end_matches('/').to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            schema_id: schema_id.to_string(),
        }
    }

    /// List the clients configured on the service instance.
    pub async fn list_clients(&self, limit: u32) -> Result<Vec<ClientInfo>, DoxError> {
        let token = self.auth.fetch_token().await?;
        let url = format!("{}{}", self.base_url, CLIENTS_PATH);

        tracing::info!(url = %url, "Fetching client list");
        let response = self
            .http
            .get(&url)
            .query(&[("limit", limit)])
            .bearer_auth(&token)
            .send()
            .await?;
        let response = ensure_success(response, "list clients").await?;

        let list: ClientList = response.json().await?;
        Ok(list.payload)
    }

    /// Upload a purchase order for extraction and return the new job ID.
    pub async fn submit_document(&self, path: &Path) -> Result<String, DoxError> {
        let token = self.auth.fetch_token().await?;

        let bytes = tokio::fs::read(path).await.map_err(|source| DoxError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.txt".to_string());

        let options = serde_json::to_string(&SubmitOptions {
            document_type: DOCUMENT_TYPE,
            client_id: DOX_CLIENT,
            schema_id: &self.schema_id,
        })?;

        let form = Form::new()
            .part(
                "file",
                Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str("text/plain")?,
            )
            .part("options", Part::text(options).mime_str("application/json")?);

        tracing::info!(path = %path.display(), "Uploading document");
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&token)
            .multipart(form)
            .send()
            .await?;
        let response = ensure_success(response, "submit document").await?;

        let job: SubmittedJob = response.json().await?;
        tracing::info!(job_id = %job.id, "Document accepted");
        Ok(job.id)
    }

    /// Current status of a job.
    pub async fn job_status(&self, job_id: &str) -> Result<JobStatus, DoxError> {
        let token = self.auth.fetch_token().await?;
        let url = format!("{}/{}", self.api_url, job_id);

        let response = self.http.get(&url).bearer_auth(&token).send().await?;
        let response = ensure_success(response, "check job status").await?;

        let body: JobStatusResponse = response.json().await?;
        Ok(body.status)
    }

    /// Fetch the extraction result of a finished job.
    ///
    /// Returns `Ok(None)` when the service answers with an error status or a
    /// body that is not a valid extraction result. Token and transport
    /// failures are still errors.
    pub async fn fetch_result(&self, job_id: &str) -> Result<Option<ExtractionResult>, DoxError> {
        let token = self.auth.fetch_token().await?;
        let url = format!("{}{}/{}", self.base_url, JOB_RESULT_PATH, job_id);

        let response = self.http.get(&url).bearer_auth(&token).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::info!(job_id = %job_id, status_code = status.as_u16(), "Result fetched");
        tracing::debug!(job_id = %job_id, body = %body, "Raw result response");

        if !status.is_success() {
            tracing::warn!(
                job_id = %job_id,
                status_code = status.as_u16(),
                "Result request was not successful, skipping label"
            );
            return Ok(None);
        }

        match serde_json::from_str::<ExtractionResult>(&body) {
            Ok(result) => Ok(Some(result)),
            Err(e) => {
                tracing::warn!(
                    job_id = %job_id,
                    error = %e,
                    "Failed to decode result JSON. Empty or invalid response"
                );
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl JobStatusSource for DoxClient {
    async fn job_status(&self, job_id: &str) -> Result<JobStatus, DoxError> {
        DoxClient::job_status(self, job_id).await
    }
}

/// Turn a non-2xx response into [`DoxError::Status`], keeping the body for diagnostics.
async fn ensure_success(response: Response, operation: &'static str) -> Result<Response, DoxError> {
    let status = response.status();
    tracing::debug!(operation, status_code = status.as_u16(), "DOX responded");

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(DoxError::Status {
        operation,
        status: status.as_u16(),
        body,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum DoxError {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to {operation}: DOX returned {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("Cannot read document {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode submission options: {0}")]
    Encode(#[from] serde_json::Error),
}
