use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use tokio::time::Instant;

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

pub fn status(
    status: JobStatus,
    retries: u32,
    images: &[&str],
) -> Result<JobStatusSnapshot, GenerationError> {
    Ok(JobStatusSnapshot {
        status,
        retries,
        output: images.iter().copied().map(ImageRef::from).collect(),
    })
}

/// In-memory [`JobApi`] replaying a fixed script of status reads. Once the
/// script runs out the last entry is repeated.
pub struct ScriptedApi {
    submission: Result<JobId, GenerationError>,
    statuses: Mutex<VecDeque<Result<JobStatusSnapshot, GenerationError>>>,
    last: Mutex<Option<Result<JobStatusSnapshot, GenerationError>>>,
    submissions: AtomicUsize,
    reads: Mutex<Vec<Instant>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            submission: Ok(JobId::new("job-1")),
            statuses: Mutex::new(VecDeque::new()),
            last: Mutex::new(None),
            submissions: AtomicUsize::new(0),
            reads: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting_submission(err: GenerationError) -> Self {
        Self {
            submission: Err(err),
            ..Self::new()
        }
    }

    pub fn with_statuses(self, statuses: Vec<Result<JobStatusSnapshot, GenerationError>>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    pub fn status_reads(&self) -> usize {
        self.reads.lock().unwrap().len()
    }

    pub fn read_times(&self) -> Vec<Instant> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobApi for ScriptedApi {
    async fn create_job(
        &self,
        _credential: &Credential,
        _request: &GenerationRequest,
    ) -> Result<JobId, GenerationError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        self.submission.clone()
    }

    async fn get_job_status(
        &self,
        _credential: &Credential,
        _job_id: &JobId,
    ) -> Result<JobStatusSnapshot, GenerationError> {
        self.reads.lock().unwrap().push(Instant::now());

        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.statuses.lock().unwrap().pop_front() {
            *last = Some(next);
        }

        last.clone()
            .unwrap_or_else(|| Err(GenerationError::Transport("no scripted status".into())))
    }
}
