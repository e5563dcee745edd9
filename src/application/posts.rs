//! Owner-scoped post operations guarded by bearer tokens.
//!
//! Every operation verifies the token first, then touches the store, then
//! maintains the owner's cached list: mutations drop it, reads fill it on miss.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::application::auth::{TokenError, TokenService};
use crate::application::repos::{CreatePostParams, PostsRepo, RepoError};
use crate::cache::PostListCache;
use crate::domain::entities::PostRecord;
use crate::domain::posts::{DEFAULT_MAX_TEXT_BYTES, TextTooLarge, ensure_text_within};
use crate::domain::types::{PostId, UserId};

pub const DELETE_CONFIRMATION: &str = "Post deleted successfully";

#[derive(Debug, Error)]
pub enum PostError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(#[from] TokenError),
    #[error(transparent)]
    PayloadTooLarge(#[from] TextTooLarge),
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub post_id: PostId,
    pub message: &'static str,
}

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostsRepo>,
    tokens: Arc<TokenService>,
    cache: Arc<PostListCache>,
    max_text_bytes: usize,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        tokens: Arc<TokenService>,
        cache: Arc<PostListCache>,
    ) -> Self {
        Self {
            posts,
            tokens,
            cache,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
        }
    }

    pub fn with_max_text_bytes(mut self, max_text_bytes: usize) -> Self {
        self.max_text_bytes = max_text_bytes;
        self
    }

    pub async fn add_post(&self, token: &str, text: String) -> Result<PostRecord, PostError> {
        let owner = self.authenticate(token)?;
        ensure_text_within(&text, self.max_text_bytes)?;

        let post = self
            .posts
            .create_post(CreatePostParams {
                user_id: owner,
                text,
            })
            .await?;
        self.cache.invalidate(owner);

        info!(
            target = "tidepost::posts",
            user_id = owner,
            post_id = post.id,
            bytes = post.text.len(),
            "post created"
        );
        Ok(post)
    }

    pub async fn list_posts(&self, token: &str) -> Result<Vec<PostRecord>, PostError> {
        let owner = self.authenticate(token)?;

        if let Some(posts) = self.cache.get(owner) {
            return Ok(posts);
        }

        let posts = self.posts.list_posts_by_owner(owner).await?;
        self.cache.store(owner, posts.clone());
        debug!(
            target = "tidepost::posts",
            user_id = owner,
            count = posts.len(),
            "post list cached"
        );
        Ok(posts)
    }

    /// Posts owned by someone else are reported exactly like missing ones.
    pub async fn delete_post(
        &self,
        token: &str,
        post_id: PostId,
    ) -> Result<DeleteConfirmation, PostError> {
        let owner = self.authenticate(token)?;

        let outcome = self.posts.delete_owned_post(owner, post_id).await;
        self.cache.invalidate(owner);

        if !outcome? {
            return Err(PostError::NotFound);
        }

        info!(
            target = "tidepost::posts",
            user_id = owner,
            post_id,
            "post deleted"
        );
        Ok(DeleteConfirmation {
            post_id,
            message: DELETE_CONFIRMATION,
        })
    }

    fn authenticate(&self, token: &str) -> Result<UserId, PostError> {
        self.tokens.verify(token).map_err(PostError::from)
    }
}
