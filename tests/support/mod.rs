#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use argon2::Params;
use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use tidepost::application::auth::{AuthService, CredentialHasher, DEFAULT_TOKEN_TTL, TokenService};
use tidepost::application::posts::PostService;
use tidepost::application::repos::{
    CreatePostParams, CreateUserParams, HealthRepo, PostsRepo, RepoError, UsersRepo,
};
use tidepost::cache::{CacheConfig, PostListCache};
use tidepost::domain::entities::{PostRecord, UserRecord};
use tidepost::domain::types::{PostId, UserId};
use tidepost::infra::http::AppState;

pub const SECRET: &[u8] = b"integration-secret-with-at-least-32-bytes";

#[derive(Default)]
struct Tables {
    users: Vec<UserRecord>,
    posts: Vec<PostRecord>,
    next_user_id: UserId,
    next_post_id: PostId,
}

/// Store double backing both repository traits.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    list_queries: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn list_queries(&self) -> usize {
        self.list_queries.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with a persistence error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn post_count(&self) -> usize {
        self.tables.lock().await.posts.len()
    }

    fn check_available(&self) -> Result<(), RepoError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepoError::from_persistence("store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl UsersRepo for InMemoryStore {
    async fn create_user(&self, params: CreateUserParams) -> Result<UserRecord, RepoError> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|user| user.email == params.email) {
            return Err(RepoError::Duplicate {
                constraint: "users_email_key".to_string(),
            });
        }
        tables.next_user_id += 1;
        let user = UserRecord {
            id: tables.next_user_id,
            email: params.email,
            password_hash: params.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepoError> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|user| user.email == email).cloned())
    }
}

#[async_trait]
impl PostsRepo for InMemoryStore {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        tables.next_post_id += 1;
        let post = PostRecord {
            id: tables.next_post_id,
            user_id: params.user_id,
            text: params.text,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn list_posts_by_owner(&self, user_id: UserId) -> Result<Vec<PostRecord>, RepoError> {
        self.check_available()?;
        self.list_queries.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.lock().await;
        let mut posts: Vec<PostRecord> = tables
            .posts
            .iter()
            .filter(|post| post.user_id == user_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn delete_owned_post(&self, user_id: UserId, post_id: PostId) -> Result<bool, RepoError> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        let before = tables.posts.len();
        tables
            .posts
            .retain(|post| !(post.id == post_id && post.user_id == user_id));
        Ok(tables.posts.len() < before)
    }
}

#[async_trait]
impl HealthRepo for InMemoryStore {
    async fn ping(&self) -> Result<(), RepoError> {
        self.check_available()
    }
}

/// Services wired against one in-memory store.
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub tokens: Arc<TokenService>,
    pub cache: Arc<PostListCache>,
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_cache(CacheConfig::default())
    }

    pub fn with_cache(config: CacheConfig) -> Self {
        let store = Arc::new(InMemoryStore::default());
        let tokens = Arc::new(TokenService::new(SECRET, DEFAULT_TOKEN_TTL));
        let cache = Arc::new(PostListCache::new(&config));

        let users_repo: Arc<dyn UsersRepo> = store.clone();
        let posts_repo: Arc<dyn PostsRepo> = store.clone();

        let auth = AuthService::new(users_repo, tokens.clone()).with_hasher(fast_hasher());
        let posts = PostService::new(posts_repo, tokens.clone(), cache.clone());

        Self {
            store,
            tokens,
            cache,
            auth: Arc::new(auth),
            posts: Arc::new(posts),
        }
    }

    pub fn app_state(&self) -> AppState {
        let health: Arc<dyn HealthRepo> = self.store.clone();
        AppState {
            auth: self.auth.clone(),
            posts: self.posts.clone(),
            health,
        }
    }

    /// Token for `user_id` without going through signup.
    pub fn token_for(&self, user_id: UserId) -> String {
        self.tokens.issue(user_id).expect("token issues").token
    }
}

pub fn fast_hasher() -> CredentialHasher {
    CredentialHasher::with_params(Params::new(1024, 1, 1, None).expect("argon2 params"))
}
