use async_trait::async_trait;

use super::{
    errors::GenerationError,
    models::{
        credential::Credential,
        generation_request::GenerationRequest,
        job::{JobId, JobStatusSnapshot},
    },
};

/// The remote "create job" and "read status" operations.
///
/// Implementations classify failures as [`GenerationError::Transport`],
/// [`GenerationError::Auth`] (401/403) or [`GenerationError::Service`]
/// (any other non-2xx or an unreadable body) and never sleep.
#[async_trait]
pub trait JobApi: Send + Sync {
    async fn create_job(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
    ) -> Result<JobId, GenerationError>;

    async fn get_job_status(
        &self,
        credential: &Credential,
        job_id: &JobId,
    ) -> Result<JobStatusSnapshot, GenerationError>;
}
