pub mod runpod_run_response;
pub mod runpod_status_response;
