use async_trait::async_trait;
use time::OffsetDateTime;

use crate::application::repos::{CreatePostParams, PostsRepo, RepoError};
use crate::domain::entities::PostRecord;
use crate::domain::types::{PostId, UserId};

use super::PostgresRepositories;
use super::util::map_sqlx_error;

#[derive(sqlx::FromRow)]
struct PostRow {
    id: PostId,
    user_id: UserId,
    text: String,
    created_at: OffsetDateTime,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            text: row.text,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let CreatePostParams { user_id, text } = params;

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (user_id, text)
            VALUES ($1, $2)
            RETURNING id, user_id, text, created_at
            "#,
        )
        .bind(user_id)
        .bind(text)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn list_posts_by_owner(&self, user_id: UserId) -> Result<Vec<PostRecord>, RepoError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, text, created_at
            FROM posts
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_owned_post(&self, user_id: UserId, post_id: PostId) -> Result<bool, RepoError> {
        // A foreign post and a missing post are indistinguishable here.
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
