use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;

use super::error::ApiError;

/// Header carrying the raw session token.
pub const TOKEN_HEADER: &str = "token";

#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
}

/// Raw token pulled from the request; verification happens in the services.
#[derive(Clone)]
pub struct SessionToken(pub String);

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let ctx = RequestContext {
        request_id: request_id.clone(),
    };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    response.extensions_mut().insert(ctx);
    response
}

/// Rejects requests that carry no token at all.
pub async fn require_token(mut request: Request<Body>, next: Next) -> Response {
    let Some(token) = extract_token(request.headers()) else {
        return ApiError::unauthenticated().into_response();
    };

    request.extensions_mut().insert(SessionToken(token));
    next.run(request).await
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        let elapsed_ms = start.elapsed().as_millis();
        let report = response.extensions_mut().remove::<ErrorReport>();
        let (source, messages) = match report {
            Some(report) => (report.source, report.messages),
            None => ("unknown", Vec::new()),
        };
        let detail = messages
            .first()
            .cloned()
            .unwrap_or_else(|| "no diagnostic available".to_string());

        if status.is_server_error() {
            error!(
                target = "tidepost::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                "request failed",
            );
        } else {
            warn!(
                target = "tidepost::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                "client request error",
            );
        }
    }

    response
}

/// The `token` header wins; `Authorization: Bearer` is the fallback.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let custom = headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(token) = custom {
        return Some(token.to_string());
    }

    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let bearer = raw.strip_prefix("Bearer ")?.trim();
    (!bearer.is_empty()).then(|| bearer.to_string())
}
