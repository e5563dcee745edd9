//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{PostRecord, UserRecord};
use crate::domain::types::{PostId, UserId};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub user_id: UserId,
    pub text: String,
}

#[async_trait]
pub trait UsersRepo: Send + Sync {
    /// Fails with [`RepoError::Duplicate`] when the email is already taken.
    async fn create_user(&self, params: CreateUserParams) -> Result<UserRecord, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepoError>;
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError>;

    /// Newest first, ties broken by descending id.
    async fn list_posts_by_owner(&self, user_id: UserId) -> Result<Vec<PostRecord>, RepoError>;

    /// Returns `false` when no post with this id belongs to `user_id`.
    async fn delete_owned_post(&self, user_id: UserId, post_id: PostId) -> Result<bool, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    /// Succeeds when the backing store answers a trivial query.
    async fn ping(&self) -> Result<(), RepoError>;
}
