use serde::{Deserialize, Serialize};

use crate::application::auth::AuthSession;
use crate::domain::types::UserId;

/// Body for both `/signup` and `/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: UserId,
    pub email: String,
    pub token: String,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            id: session.user_id,
            email: session.email,
            token: session.token,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
