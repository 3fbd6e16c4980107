use serde::{Deserialize, Serialize};

use crate::generations::{
    enums::{error_kind::ErrorKind, job_status::JobStatus, session_state::SessionState},
    errors::GenerationError,
    job_client::JobProgress,
};

use super::{image_ref::ImageRef, job::JobId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionError {
    pub kind: ErrorKind,
    pub message: String,
}

/// What a caller sees of the session: progress, then images or an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SessionError>,
}

impl SessionSnapshot {
    pub fn submitted() -> Self {
        Self {
            state: SessionState::Submitted,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, progress: &JobProgress) {
        if !self.state.is_in_flight() {
            return;
        }

        match progress {
            JobProgress::Submitted => self.state = SessionState::Submitted,
            JobProgress::Polling { job_id } => {
                self.state = SessionState::Polling;
                self.job_id = Some(job_id.clone());
            }
            JobProgress::StatusRead { status, .. } => self.status = Some(*status),
        }
    }

    pub fn complete(&mut self, images: Vec<ImageRef>) {
        if !self.state.is_in_flight() {
            return;
        }

        self.state = SessionState::Completed;
        self.images = images;
        self.error = None;
    }

    pub fn fail(&mut self, err: &GenerationError) {
        if !self.state.is_in_flight() {
            return;
        }

        self.state = SessionState::Errored;
        self.images.clear();
        self.error = Some(SessionError {
            kind: err.kind(),
            message: err.to_string(),
        });
    }
}
