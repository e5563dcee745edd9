//! JSON body extraction with rejections rendered as `ApiError`.

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use super::error::{ApiError, codes};

/// `axum::Json` whose rejections use the service's error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::PAYLOAD_TOO_LARGE,
                "Request body is too large",
                Some(rejection.body_text()),
            );
        }
        ApiError::new(
            rejection.status(),
            codes::INVALID_BODY,
            "Request body is not valid JSON for this endpoint",
            Some(rejection.body_text()),
        )
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        text: String,
    }

    fn request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build")
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_body() {
        let err = ApiJson::<Payload>::from_request(request("{\"text\":"), &())
            .await
            .expect_err("truncated json is rejected");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), codes::INVALID_BODY);
    }

    #[tokio::test]
    async fn missing_field_keeps_framework_status() {
        let err = ApiJson::<Payload>::from_request(request("{}"), &())
            .await
            .expect_err("missing field is rejected");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), codes::INVALID_BODY);
    }
}
