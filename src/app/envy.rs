use std::time::Duration;

use serde::Deserialize;

use crate::{
    generations::job_client::PollOptions,
    runpod::config::{API_URL, ENDPOINT},
};

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    #[serde(default = "default_runpod_api_url")]
    pub runpod_api_url: String,
    #[serde(default = "default_runpod_endpoint")]
    pub runpod_endpoint: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// `0` disables the guard.
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Envy {
    pub fn poll_options(&self) -> PollOptions {
        PollOptions {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: match self.max_poll_attempts {
                0 => None,
                attempts => Some(attempts),
            },
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Envy {
    fn default() -> Self {
        Self {
            app_env: default_app_env(),
            port: None,
            runpod_api_url: default_runpod_api_url(),
            runpod_endpoint: default_runpod_endpoint(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_runpod_api_url() -> String {
    API_URL.to_string()
}

fn default_runpod_endpoint() -> String {
    ENDPOINT.to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_max_poll_attempts() -> u32 {
    600
}

fn default_request_timeout_secs() -> u64 {
    30
}
