use serde::Serialize;

use crate::generations::models::generation_request::GenerationRequest;

#[derive(Debug, Serialize)]
pub struct InputSpec<'a> {
    pub input: &'a GenerationRequest,
}
