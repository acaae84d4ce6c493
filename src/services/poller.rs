//! Fixed-interval job status polling.
//!
//! The loop sleeps, checks, and repeats until the job reports DONE or
//! FAILED. By default there is no attempt limit, so a job that never leaves
//! PENDING keeps the process polling until it is killed.

use std::time::Duration;

use async_trait::async_trait;

use crate::models::job::JobStatus;
use crate::services::dox::DoxError;

/// Default delay between status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Anything that can report the status of a job.
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    async fn job_status(&self, job_id: &str) -> Result<JobStatus, DoxError>;
}

/// Suspends the poll loop between checks.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real-time sleeper backed by the tokio timer.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone)]
pub struct JobPoller {
    interval: Duration,
    max_attempts: Option<u32>,
}

impl Default for JobPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, None)
    }
}

impl JobPoller {
    pub fn new(interval: Duration, max_attempts: Option<u32>) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll `job_id` until it reaches a terminal status and return that status.
    ///
    /// Status read failures abort the loop immediately; only pending-like
    /// statuses are waited out.
    pub async fn wait_for_completion<S, Z>(
        &self,
        source: &S,
        sleeper: &Z,
        job_id: &str,
    ) -> Result<JobStatus, PollError>
    where
        S: JobStatusSource + ?Sized,
        Z: Sleeper + ?Sized,
    {
        let mut attempt: u32 = 0;

        loop {
            if let Some(max) = self.max_attempts {
                if attempt >= max {
                    return Err(PollError::AttemptsExhausted {
                        job_id: job_id.to_string(),
                        attempts: attempt,
                    });
                }
            }

            sleeper.sleep(self.interval).await;
            attempt += 1;

            let status = source.job_status(job_id).await?;
            tracing::info!(job_id = %job_id, attempt, status = %status, "Job status");

            if status.is_terminal() {
                return Ok(status);
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Status check failed: {0}")]
    Dox(#[from] DoxError),

    #[error("Job {job_id} still running after {attempts} status checks")]
    AttemptsExhausted { job_id: String, attempts: u32 },
}
