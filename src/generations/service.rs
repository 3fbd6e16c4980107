use crate::AppState;

use super::{
    dtos::generate_images_dto::GenerateImagesDto,
    errors::GenerationError,
    models::{credential::Credential, session_snapshot::SessionSnapshot},
};

pub fn start_generation(
    dto: &GenerateImagesDto,
    credential: Credential,
    state: &AppState,
) -> Result<SessionSnapshot, GenerationError> {
    let request = match dto.to_request() {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!("start_generation rejected parameters: {}", e);
            return Err(e);
        }
    };

    state.session.start(credential, request)
}

pub fn get_current_generation(state: &AppState) -> SessionSnapshot {
    state.session.snapshot()
}

pub fn cancel_current_generation(state: &AppState) -> SessionSnapshot {
    state.session.cancel()
}
