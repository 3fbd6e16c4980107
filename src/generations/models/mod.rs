pub mod credential;
pub mod generation_request;
pub mod image_ref;
pub mod job;
pub mod session_snapshot;
