use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    app::envy::Envy,
    generations::{
        errors::GenerationError,
        job_api::JobApi,
        models::{
            credential::Credential,
            generation_request::GenerationRequest,
            job::{JobId, JobStatusSnapshot},
        },
    },
};

use super::{
    models::input_spec::InputSpec,
    structs::{
        runpod_run_response::RunpodRunResponse, runpod_status_response::RunpodStatusResponse,
    },
};

/// HTTP client for one RunPod serverless endpoint.
#[derive(Clone)]
pub struct RunpodApi {
    client: reqwest::Client,
    api_url: String,
    endpoint: String,
}

impl RunpodApi {
    pub fn new(
        api_url: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self::with_client(client, api_url, endpoint))
    }

    /// Reuses an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            endpoint: endpoint.into().trim_matches('/').to_string(),
        }
    }

    pub fn from_envy(envy: &Envy) -> Result<Self, GenerationError> {
        Self::new(
            &envy.runpod_api_url,
            &envy.runpod_endpoint,
            envy.request_timeout(),
        )
    }

    fn run_url(&self) -> String {
        format!("{}/{}/run", self.api_url, self.endpoint)
    }

    /// The job id is pushed as a single encoded path segment.
    fn status_url(&self, job_id: &JobId) -> Result<Url, GenerationError> {
        let base = format!("{}/{}/status", self.api_url, self.endpoint);
        let invalid = || GenerationError::Transport(format!("invalid api url: {}", base));

        let mut url = Url::parse(&base).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .push(job_id.as_str());

        Ok(url)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: Response,
        operation: &str,
    ) -> Result<T, GenerationError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!("{} rejected credential: {}", operation, status);
            return Err(GenerationError::Auth {
                status: status.as_u16(),
            });
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("{} (body): {:?}", operation, e);
                return Err(GenerationError::Transport(e.to_string()));
            }
        };

        if !status.is_success() {
            tracing::warn!("{} ({}): {}", operation, status, text);
            return Err(GenerationError::Service {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("{} (decode): {:?} {}", operation, e, text);
            GenerationError::Service {
                status: status.as_u16(),
                message: format!("unreadable response: {}", e),
            }
        })
    }
}

fn transport_error(operation: &str, e: reqwest::Error) -> GenerationError {
    tracing::warn!("{} (send): {:?}", operation, e);
    GenerationError::Transport(e.to_string())
}

#[async_trait]
impl JobApi for RunpodApi {
    async fn create_job(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
    ) -> Result<JobId, GenerationError> {
        let response = self
            .client
            .post(self.run_url())
            .header(header::AUTHORIZATION, credential.bearer())
            .json(&InputSpec { input: request })
            .send()
            .await
            .map_err(|e| transport_error("create_job", e))?;

        let run: RunpodRunResponse = Self::parse_response(response, "create_job").await?;

        if run.id.is_empty() {
            return Err(GenerationError::Service {
                status: StatusCode::OK.as_u16(),
                message: "response did not include a job id".to_string(),
            });
        }

        tracing::debug!(job_id = %run.id, status = ?run.status, "create_job accepted");

        Ok(JobId::new(run.id))
    }

    async fn get_job_status(
        &self,
        credential: &Credential,
        job_id: &JobId,
    ) -> Result<JobStatusSnapshot, GenerationError> {
        let response = self
            .client
            .get(self.status_url(job_id)?)
            .header(header::AUTHORIZATION, credential.bearer())
            .send()
            .await
            .map_err(|e| transport_error("get_job_status", e))?;

        let status: RunpodStatusResponse = Self::parse_response(response, "get_job_status").await?;

        Ok(status.into())
    }
}
