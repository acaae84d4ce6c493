use std::fmt;

use serde::Deserialize;
use strum::EnumString;

/// Status of a DOX extraction job as reported by the service.
///
/// The service may introduce statuses beyond the three we act on; those are
/// kept verbatim in [`JobStatus::Other`] and treated as still running.
#[derive(Debug, Clone, PartialEq, Eq, EnumString, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(from = "String")]
pub enum JobStatus {
    Pending,
    Done,
    Failed,
    #[strum(default)]
    Other(String),
}

impl JobStatus {
    /// DONE and FAILED end polling; everything else keeps it going.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Done => "DONE",
            JobStatus::Failed => "FAILED",
            JobStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        raw.parse().unwrap_or_else(|_| JobStatus::Other(raw))
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response to a document submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedJob {
    pub id: String,
}

/// Response to a job status check.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    pub status: JobStatus,
}
