//! Signed, time-bounded bearer tokens (HS256 JWT).

use std::time::Duration;

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::types::UserId;

pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token signature or encoding is invalid")]
    Invalid,
    #[error("token subject is missing or malformed")]
    Subject,
    #[error("token could not be signed: {0}")]
    Signing(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
    jti: String,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: OffsetDateTime,
}

/// Issues and verifies tokens with one process-wide symmetric key.
///
/// Verification touches no storage: a token is accepted purely on signature,
/// expiry and a well-formed subject.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn issue(&self, user_id: UserId) -> Result<IssuedToken, TokenError> {
        self.issue_at(user_id, OffsetDateTime::now_utc())
    }

    fn issue_at(
        &self,
        user_id: UserId,
        issued_at: OffsetDateTime,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.unix_timestamp(),
            exp: expires_at.unix_timestamp(),
            jti: Uuid::new_v4().simple().to_string(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|err| TokenError::Signing(err.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::MissingRequiredClaim(_) => TokenError::Subject,
                _ => TokenError::Invalid,
            }
        })?;

        match data.claims.sub.parse::<UserId>() {
            Ok(user_id) if user_id > 0 => Ok(user_id),
            _ => Err(TokenError::Subject),
        }
    }
}
