use std::sync::Arc;

use axum::{
    extract::State,
    headers::{authorization::Bearer, Authorization},
    http::StatusCode,
    Json, TypedHeader,
};

use crate::{
    app::{
        errors::DefaultApiError, models::api_error::ApiError,
        structs::json_from_request::JsonFromRequest,
    },
    AppState,
};

use super::{
    dtos::generate_images_dto::GenerateImagesDto,
    models::{credential::Credential, session_snapshot::SessionSnapshot},
    service,
};

pub async fn start_generation(
    State(state): State<Arc<AppState>>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
    JsonFromRequest(dto): JsonFromRequest<GenerateImagesDto>,
) -> Result<(StatusCode, Json<SessionSnapshot>), ApiError> {
    let Some(TypedHeader(authorization)) = authorization else {
        return Err(DefaultApiError::MissingCredential.value());
    };

    let credential = Credential::new(authorization.token());
    match service::start_generation(&dto, credential, &state) {
        Ok(snapshot) => Ok((StatusCode::ACCEPTED, Json(snapshot))),
        Err(e) => Err(e.value()),
    }
}

pub async fn get_current_generation(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(service::get_current_generation(&state))
}

pub async fn cancel_current_generation(
    State(state): State<Arc<AppState>>,
) -> Json<SessionSnapshot> {
    Json(service::cancel_current_generation(&state))
}
