//! Request handlers grouped by resource.

mod auth;
mod posts;

pub use auth::*;
pub use posts::*;
