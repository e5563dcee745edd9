pub mod error;
mod extract;
mod handlers;
pub mod middleware;
pub mod models;
mod state;

pub use state::AppState;

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};

use crate::application::error::ErrorReport;
use crate::application::repos::RepoError;

use self::middleware::{log_responses, require_token, set_request_context};

/// Assemble the public router. `max_body_bytes` caps every request body.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let protected = Router::new()
        .route(
            "/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route("/posts/{id}", delete(handlers::delete_post))
        .route("/addpost", post(handlers::create_post))
        .route("/getposts", get(handlers::list_posts))
        .route("/deletepost/{id}", delete(handlers::delete_post))
        .route_layer(axum_middleware::from_fn(require_token));

    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .route("/health", get(health))
        .merge(protected)
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

async fn health(State(state): State<AppState>) -> Response {
    db_health_response(state.health.ping().await)
}

fn db_health_response(result: Result<(), RepoError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}
