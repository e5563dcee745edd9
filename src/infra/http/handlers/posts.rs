//! Posts handlers

use axum::Json;
use axum::extract::{Extension, Path, State};

use crate::domain::entities::PostRecord;
use crate::domain::types::PostId;
use crate::infra::http::error::ApiError;
use crate::infra::http::extract::ApiJson;
use crate::infra::http::middleware::SessionToken;
use crate::infra::http::models::{CreatePostRequest, DeleteResponse};
use crate::infra::http::state::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiJson(payload): ApiJson<CreatePostRequest>,
) -> Result<Json<PostRecord>, ApiError> {
    let post = state.posts.add_post(&token, payload.text).await?;
    Ok(Json(post))
}

pub async fn list_posts(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Json<Vec<PostRecord>>, ApiError> {
    let posts = state.posts.list_posts(&token).await?;
    Ok(Json(posts))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Path(id): Path<PostId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let confirmation = state.posts.delete_post(&token, id).await?;
    Ok(Json(DeleteResponse {
        message: confirmation.message.to_string(),
    }))
}
