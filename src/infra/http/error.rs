use std::error::Error as StdError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::auth::AuthError;
use crate::application::error::ErrorReport;
use crate::application::posts::PostError;

const SOURCE: &str = "infra::http";

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

pub mod codes {
    pub const VALIDATION: &str = "validation_error";
    pub const DUPLICATE_EMAIL: &str = "duplicate_email";
    pub const PAYLOAD_TOO_LARGE: &str = "payload_too_large";
    pub const INVALID_BODY: &str = "invalid_body";
    pub const UNAUTHENTICATED: &str = "unauthenticated";
    pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
    pub const NOT_FOUND: &str = "not_found";
    pub const INTERNAL: &str = "internal_error";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Client-facing error. `chain` stays server side and only reaches the logs.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
    chain: Vec<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
            chain: Vec::new(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            codes::UNAUTHENTICATED,
            "A valid token is required",
            None,
        )
    }

    pub fn internal(error: &dyn StdError) -> Self {
        let report = ErrorReport::from_error(SOURCE, StatusCode::INTERNAL_SERVER_ERROR, error);
        Self {
            chain: report.messages,
            ..Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::INTERNAL,
                "Internal server error",
                None,
            )
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    fn with_cause(mut self, error: &dyn StdError) -> Self {
        self.chain = ErrorReport::from_error(SOURCE, self.status, error).messages;
        self
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::Validation(reason) => Self::new(
                StatusCode::BAD_REQUEST,
                codes::VALIDATION,
                "Invalid email or password format",
                Some(reason.clone()),
            ),
            AuthError::DuplicateEmail => Self::new(
                StatusCode::BAD_REQUEST,
                codes::DUPLICATE_EMAIL,
                "Email already registered",
                None,
            ),
            AuthError::InvalidCredentials => Self::new(
                StatusCode::UNAUTHORIZED,
                codes::INVALID_CREDENTIALS,
                "Invalid email or password",
                None,
            ),
            AuthError::Unauthenticated(_) => Self::unauthenticated().with_cause(&err),
            AuthError::Repo(_) | AuthError::Internal(_) => Self::internal(&err),
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match &err {
            PostError::Unauthenticated(_) => Self::unauthenticated().with_cause(&err),
            PostError::PayloadTooLarge(too_large) => Self::new(
                StatusCode::BAD_REQUEST,
                codes::PAYLOAD_TOO_LARGE,
                "Post text is too large",
                Some(too_large.to_string()),
            ),
            PostError::NotFound => Self::new(
                StatusCode::NOT_FOUND,
                codes::NOT_FOUND,
                "Post not found",
                None,
            ),
            PostError::Repo(_) => Self::internal(&err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError {
            status,
            code,
            message,
            hint,
            chain,
        } = self;

        let detail = format!("{code}: {}", hint.as_deref().unwrap_or(message));
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: code.to_string(),
                message: message.to_string(),
                hint,
            },
        };
        let mut response = (status, Json(body)).into_response();

        let mut report = ErrorReport::from_message(SOURCE, status, detail);
        report.messages.extend(chain);
        report.attach(&mut response);
        response
    }
}
