//! Account registration, credential checks and bearer token handling.

mod password;
mod token;

pub use password::{CredentialHasher, PasswordError};
pub use token::{DEFAULT_TOKEN_TTL, IssuedToken, TokenError, TokenService};

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::OnceCell;
use tokio::task;
use tracing::{debug, error, info};

use crate::application::repos::{CreateUserParams, RepoError, UsersRepo};
use crate::domain::credentials::{DEFAULT_MIN_PASSWORD_CHARS, validate_email, validate_password};
use crate::domain::types::UserId;

const DECOY_PASSWORD: &str = "tidepost-decoy-password";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("unauthenticated: {0}")]
    Unauthenticated(#[from] TokenError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("internal auth failure: {0}")]
    Internal(String),
}

/// Identity returned by signup and login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: UserId,
    pub email: String,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UsersRepo>,
    tokens: Arc<TokenService>,
    hasher: CredentialHasher,
    /// Hash with the configured cost, checked when the email is unknown.
    decoy_hash: Arc<OnceCell<String>>,
    min_password_chars: usize,
}

impl AuthService {
    pub fn new(users: Arc<dyn UsersRepo>, tokens: Arc<TokenService>) -> Self {
        Self {
            users,
            tokens,
            hasher: CredentialHasher::default(),
            decoy_hash: Arc::default(),
            min_password_chars: DEFAULT_MIN_PASSWORD_CHARS,
        }
    }

    pub fn with_hasher(mut self, hasher: CredentialHasher) -> Self {
        self.hasher = hasher;
        self.decoy_hash = Arc::default();
        self
    }

    pub fn with_min_password_chars(mut self, min_password_chars: usize) -> Self {
        self.min_password_chars = min_password_chars;
        self
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        validate_email(email).map_err(|err| AuthError::Validation(err.message().to_string()))?;
        validate_password(password, self.min_password_chars)
            .map_err(|err| AuthError::Validation(err.message().to_string()))?;

        let password_hash = self.hash_blocking(password.to_string()).await?;

        let user = self
            .users
            .create_user(CreateUserParams {
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|err| match err {
                RepoError::Duplicate { .. } => AuthError::DuplicateEmail,
                other => AuthError::Repo(other),
            })?;

        let issued = self.issue(user.id)?;
        info!(target = "tidepost::auth", user_id = user.id, "user registered");

        Ok(AuthSession {
            user_id: user.id,
            email: user.email,
            token: issued.token,
        })
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            self.verify_against_decoy(password).await?;
            debug!(target = "tidepost::auth", "login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let matches = self
            .verify_blocking(password.to_string(), user.password_hash.clone())
            .await?;
        if !matches {
            debug!(
                target = "tidepost::auth",
                user_id = user.id,
                "login rejected: password mismatch"
            );
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.issue(user.id)?;
        info!(target = "tidepost::auth", user_id = user.id, "user logged in");

        Ok(AuthSession {
            user_id: user.id,
            email: user.email,
            token: issued.token,
        })
    }

    /// Pure check of signature and expiry; never touches the store.
    pub fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        self.tokens.verify(token).map_err(AuthError::from)
    }

    fn issue(&self, user_id: UserId) -> Result<IssuedToken, AuthError> {
        self.tokens
            .issue(user_id)
            .map_err(|err| AuthError::Internal(err.to_string()))
    }

    async fn hash_blocking(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| AuthError::Internal(format!("hashing task failed: {err}")))?
            .map_err(|err| AuthError::Internal(err.to_string()))
    }

    /// Same Argon2 work as a password mismatch, result discarded.
    async fn verify_against_decoy(&self, password: &str) -> Result<(), AuthError> {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hash_blocking(DECOY_PASSWORD.to_string()))
            .await?;
        self.verify_blocking(password.to_string(), decoy.clone()).await?;
        Ok(())
    }

    async fn verify_blocking(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| AuthError::Internal(format!("verification task failed: {err}")))?
            .map_err(|err| {
                error!(
                    target = "tidepost::auth",
                    error = %err,
                    "stored credential could not be checked"
                );
                AuthError::Internal(err.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use argon2::Params;
    use async_trait::async_trait;

    use super::*;
    use crate::domain::entities::UserRecord;

    struct NoUsers;

    #[async_trait]
    impl UsersRepo for NoUsers {
        async fn create_user(&self, _params: CreateUserParams) -> Result<UserRecord, RepoError> {
            Err(RepoError::Timeout)
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<UserRecord>, RepoError> {
            Ok(None)
        }
    }

    fn service() -> AuthService {
        let tokens = Arc::new(TokenService::new(
            b"0123456789abcdef0123456789abcdef",
            Duration::from_secs(60),
        ));
        AuthService::new(Arc::new(NoUsers), tokens).with_hasher(CredentialHasher::with_params(
            Params::new(1024, 2, 1, None).expect("argon2 params"),
        ))
    }

    #[tokio::test]
    async fn unknown_email_runs_a_password_check_at_configured_cost() {
        let service = service();
        assert!(service.decoy_hash.get().is_none());

        let err = service
            .authenticate("nobody@example.com", "password1")
            .await
            .expect_err("unknown email is rejected");
        assert!(matches!(err, AuthError::InvalidCredentials));

        let decoy = service.decoy_hash.get().expect("decoy hash computed");
        assert!(decoy.starts_with("$argon2id$v=19$m=1024,t=2,p=1$"), "{decoy}");
        assert!(
            !service
                .hasher
                .verify("password1", decoy)
                .expect("decoy hash is well formed")
        );
    }

    #[tokio::test]
    async fn decoy_hash_is_reused_across_clones() {
        let service = service();
        let clone = service.clone();

        for svc in [&service, &clone] {
            let _ = svc.authenticate("nobody@example.com", "password1").await;
        }
        assert_eq!(service.decoy_hash.get(), clone.decoy_hash.get());
    }
}
