use std::sync::Arc;

use crate::application::auth::AuthService;
use crate::application::posts::PostService;
use crate::application::repos::HealthRepo;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
    pub health: Arc<dyn HealthRepo>,
}
