pub mod error_kind;
pub mod job_status;
pub mod scheduler;
pub mod session_state;
