use sqlx::SqlitePool;

use crate::{
    errors::RequestError,
    models::{Comment, Post, PostRecord, Tag},
};

mod comment_helpers;
mod post_helpers;
mod ranking;
mod tag_helpers;

pub use comment_helpers::*;
pub use post_helpers::*;
pub use ranking::{PopularityMetric, UnknownMetric};
pub use tag_helpers::*;

/// Read access to the blog. Every listing comes back with its counts computed
/// and its tags preloaded, so nothing downstream needs to touch the store.
#[axum::async_trait]
pub trait BlogReader: Send + Sync {
    /// Most popular posts first, as ranked by the configured metric.
    async fn popular_posts(&self, limit: u32) -> Result<Vec<Post>, RequestError>;
    /// Newest posts first.
    async fn fresh_posts(&self, limit: u32) -> Result<Vec<Post>, RequestError>;
    async fn popular_tags(&self, limit: u32) -> Result<Vec<Tag>, RequestError>;
    async fn post_by_slug(&self, slug: &str) -> Result<PostRecord, RequestError>;
    /// Oldest comment first.
    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RequestError>;
    async fn tags_for_post(&self, post_id: i64) -> Result<Vec<Tag>, RequestError>;
    async fn tag_by_title(&self, title: &str) -> Result<Tag, RequestError>;
    async fn posts_for_tag(&self, tag_id: i64, limit: u32) -> Result<Vec<Post>, RequestError>;
}

pub struct SqliteBlog {
    pool: SqlitePool,
    popularity: PopularityMetric,
}

impl SqliteBlog {
    pub fn new(pool: SqlitePool, popularity: PopularityMetric) -> Self {
        Self { pool, popularity }
    }
}

#[axum::async_trait]
impl BlogReader for SqliteBlog {
    async fn popular_posts(&self, limit: u32) -> Result<Vec<Post>, RequestError> {
        let mut tx = self.pool.begin().await?;
        let query = PostQuery::new(self.popularity.order_clause());
        let result = list_posts_in_db(&mut tx, query, limit).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn fresh_posts(&self, limit: u32) -> Result<Vec<Post>, RequestError> {
        let mut tx = self.pool.begin().await?;
        let query = PostQuery::new(FRESHEST_FIRST.to_string());
        let result = list_posts_in_db(&mut tx, query, limit).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn popular_tags(&self, limit: u32) -> Result<Vec<Tag>, RequestError> {
        let mut tx = self.pool.begin().await?;
        let result = popular_tags_in_db(&mut tx, limit).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn post_by_slug(&self, slug: &str) -> Result<PostRecord, RequestError> {
        let mut tx = self.pool.begin().await?;
        let result = get_post_by_slug_in_db(&mut tx, slug).await?;
        tx.commit().await?;
        result.ok_or(RequestError::NotFound("Post not found"))
    }

    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RequestError> {
        let mut tx = self.pool.begin().await?;
        let result = get_comments_for_post_in_db(&mut tx, post_id).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn tags_for_post(&self, post_id: i64) -> Result<Vec<Tag>, RequestError> {
        let mut tx = self.pool.begin().await?;
        let result = get_tags_for_post_in_db(&mut tx, post_id).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn tag_by_title(&self, title: &str) -> Result<Tag, RequestError> {
        let mut tx = self.pool.begin().await?;
        let result = get_tag_by_title_in_db(&mut tx, title).await?;
        tx.commit().await?;
        result.ok_or(RequestError::NotFound("Tag not found"))
    }

    async fn posts_for_tag(&self, tag_id: i64, limit: u32) -> Result<Vec<Post>, RequestError> {
        let mut tx = self.pool.begin().await?;
        let query = PostQuery::new(FRESHEST_FIRST.to_string()).for_tag(tag_id);
        let result = list_posts_in_db(&mut tx, query, limit).await?;
        tx.commit().await?;
        Ok(result)
    }
}
