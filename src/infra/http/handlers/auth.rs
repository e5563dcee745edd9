//! Account handlers

use axum::Json;
use axum::extract::State;

use crate::infra::http::error::ApiError;
use crate::infra::http::extract::ApiJson;
use crate::infra::http::models::{CredentialsRequest, SessionResponse};
use crate::infra::http::state::AppState;

pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .auth
        .register(&payload.email, &payload.password)
        .await?;
    Ok(Json(session.into()))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .auth
        .authenticate(&payload.email, &payload.password)
        .await?;
    Ok(Json(session.into()))
}
