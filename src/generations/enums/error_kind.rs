use serde::{Deserialize, Serialize};

/// Machine-readable classification of a [`GenerationError`].
///
/// [`GenerationError`]: crate::generations::errors::GenerationError
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Auth,
    Transport,
    Service,
    TransientService,
    JobFailed,
    TimedOut,
    Canceled,
    InFlight,
}
