//! Submits Stable Diffusion jobs to a RunPod serverless endpoint, polls them
//! to completion and serves the session over HTTP.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    app::envy::Envy,
    generations::{
        errors::GenerationError, job_client::JobClient, session::GenerationSession,
    },
    runpod::service::RunpodApi,
};

pub mod app;
pub mod generations;
pub mod runpod;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
    pub session: GenerationSession,
}

impl AppState {
    pub fn new(envy: Envy) -> Result<Self, GenerationError> {
        let api = RunpodApi::from_envy(&envy)?;
        let client = JobClient::new(Arc::new(api), envy.poll_options());

        Ok(Self {
            envy: Arc::new(envy),
            session: GenerationSession::new(client),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(app::controller::get_root))
        // generations
        .route(
            "/generations",
            post(generations::controller::start_generation),
        )
        .route(
            "/generations/current",
            get(generations::controller::get_current_generation)
                .delete(generations::controller::cancel_current_generation),
        )
        .with_state(state)
}
