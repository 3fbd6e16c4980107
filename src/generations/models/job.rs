use std::fmt;

use serde::{Deserialize, Serialize};

use crate::generations::enums::job_status::JobStatus;

use super::image_ref::ImageRef;

/// Opaque, service-assigned job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a single status read.
#[derive(Debug, Clone, PartialEq)]
pub struct JobStatusSnapshot {
    pub status: JobStatus,
    pub retries: u32,
    pub output: Vec<ImageRef>,
}

impl JobStatusSnapshot {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
