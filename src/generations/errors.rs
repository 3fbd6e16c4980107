use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

use super::enums::error_kind::ErrorKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("{0}")]
    Validation(String),

    #[error("The inference service rejected the credential ({status}).")]
    Auth { status: u16 },

    #[error("Could not reach the inference service: {0}")]
    Transport(String),

    #[error("The inference service returned an error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The first status read reported service-side retries.
    #[error("An error occurred during the API call. Please try again.")]
    TransientService { retries: u32 },

    #[error("Job {job_id} failed on the inference service.")]
    JobFailed { job_id: String },

    #[error("Job {job_id} did not finish after {attempts} status checks.")]
    TimedOut { job_id: String, attempts: u32 },

    #[error("The generation was canceled.")]
    Canceled,

    #[error("A generation is already in progress.")]
    InFlight,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Service { .. } => ErrorKind::Service,
            Self::TransientService { .. } => ErrorKind::TransientService,
            Self::JobFailed { .. } => ErrorKind::JobFailed,
            Self::TimedOut { .. } => ErrorKind::TimedOut,
            Self::Canceled => ErrorKind::Canceled,
            Self::InFlight => ErrorKind::InFlight,
        }
    }

    pub fn value(&self) -> ApiError {
        let code = match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Auth => StatusCode::UNAUTHORIZED,
            ErrorKind::InFlight | ErrorKind::Canceled => StatusCode::CONFLICT,
            ErrorKind::TimedOut => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::Transport
            | ErrorKind::Service
            | ErrorKind::TransientService
            | ErrorKind::JobFailed => StatusCode::BAD_GATEWAY,
        };

        ApiError {
            code,
            message: self.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for GenerationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
