use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use validator::Validate;

use super::{
    enums::job_status::JobStatus,
    errors::GenerationError,
    job_api::JobApi,
    models::{
        credential::Credential,
        generation_request::GenerationRequest,
        image_ref::ImageRef,
        job::{JobId, JobStatusSnapshot},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
    /// Upper bound on status reads, `None` polls until a terminal status.
    pub max_attempts: Option<u32>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: Some(600),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobProgress {
    Submitted,
    Polling {
        job_id: JobId,
    },
    StatusRead {
        job_id: JobId,
        status: JobStatus,
        attempt: u32,
    },
}

/// Drives one generation job from submission to a terminal status.
#[derive(Clone)]
pub struct JobClient {
    api: Arc<dyn JobApi>,
    options: PollOptions,
}

impl JobClient {
    pub fn new(api: Arc<dyn JobApi>, options: PollOptions) -> Self {
        Self { api, options }
    }

    pub fn options(&self) -> PollOptions {
        self.options
    }

    pub async fn submit(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
    ) -> Result<JobId, GenerationError> {
        request.validate()?;

        self.api.create_job(credential, request).await
    }

    pub async fn poll_once(
        &self,
        credential: &Credential,
        job_id: &JobId,
    ) -> Result<JobStatusSnapshot, GenerationError> {
        self.api.get_job_status(credential, job_id).await
    }

    pub async fn run_to_completion(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<ImageRef>, GenerationError> {
        self.run_with_progress(credential, request, cancel, |_| {})
            .await
    }

    /// Like [`JobClient::run_to_completion`], reporting each state change.
    pub async fn run_with_progress<F>(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> Result<Vec<ImageRef>, GenerationError>
    where
        F: FnMut(JobProgress) + Send,
    {
        on_progress(JobProgress::Submitted);

        let job_id = until_canceled(cancel, self.submit(credential, request)).await?;
        tracing::debug!(%job_id, "job submitted");
        on_progress(JobProgress::Polling {
            job_id: job_id.clone(),
        });

        let mut attempt: u32 = 1;
        let mut snapshot = until_canceled(cancel, self.poll_once(credential, &job_id)).await?;
        on_progress(JobProgress::StatusRead {
            job_id: job_id.clone(),
            status: snapshot.status,
            attempt,
        });

        if snapshot.retries > 0 {
            tracing::error!(%job_id, retries = snapshot.retries, "job retried on the service");
            return Err(GenerationError::TransientService {
                retries: snapshot.retries,
            });
        }

        while !snapshot.is_terminal() {
            if let Some(max_attempts) = self.options.max_attempts {
                if attempt >= max_attempts {
                    tracing::error!(%job_id, attempt, "job ran out of status checks");
                    return Err(GenerationError::TimedOut {
                        job_id: job_id.to_string(),
                        attempts: attempt,
                    });
                }
            }

            tracing::debug!(%job_id, status = ?snapshot.status, "waiting for job");
            until_canceled(cancel, async {
                sleep(self.options.interval).await;
                Ok(())
            })
            .await?;

            snapshot = until_canceled(cancel, self.poll_once(credential, &job_id)).await?;
            attempt += 1;
            on_progress(JobProgress::StatusRead {
                job_id: job_id.clone(),
                status: snapshot.status,
                attempt,
            });
        }

        match snapshot.status {
            JobStatus::Completed => {
                tracing::debug!(%job_id, images = snapshot.output.len(), attempt, "job completed");
                Ok(snapshot.output)
            }
            _ => {
                tracing::error!(%job_id, "job failed");
                Err(GenerationError::JobFailed {
                    job_id: job_id.to_string(),
                })
            }
        }
    }
}

async fn until_canceled<T, F>(cancel: &CancellationToken, future: F) -> Result<T, GenerationError>
where
    F: Future<Output = Result<T, GenerationError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(GenerationError::Canceled),
        result = future => result,
    }
}
