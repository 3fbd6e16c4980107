use serde::Deserialize;

use crate::generations::{
    enums::job_status::JobStatus,
    models::{image_ref::ImageRef, job::JobStatusSnapshot},
};

#[derive(Debug, Deserialize)]
pub struct RunpodStatusResponse {
    pub status: JobStatus,
    #[serde(default)]
    pub retries: u32,
    pub output: Option<Vec<RunpodOutput>>,
}

#[derive(Debug, Deserialize)]
pub struct RunpodOutput {
    pub image: String,
}

impl From<RunpodStatusResponse> for JobStatusSnapshot {
    fn from(response: RunpodStatusResponse) -> Self {
        Self {
            status: response.status,
            retries: response.retries,
            output: response
                .output
                .unwrap_or_default()
                .into_iter()
                .map(|output| ImageRef::new(output.image))
                .collect(),
        }
    }
}
