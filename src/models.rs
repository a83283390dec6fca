use chrono::{DateTime, Utc};

/// A post row with its counts already computed by the listing query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRecord {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub author_username: String,
    pub comments_count: i64,
    pub likes_count: i64,
}

/// A post together with its preloaded tags. Serializers only ever see this.
#[derive(Debug, Clone)]
pub struct Post {
    pub record: PostRecord,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub title: String,
    pub posts_count: i64,
}

// Row shape of the tag preload query, one per (post, tag) link.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostTag {
    pub post_id: i64,
    pub id: i64,
    pub title: String,
    pub posts_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub author_username: String,
}

impl From<PostTag> for Tag {
    fn from(
        PostTag {
            id,
            title,
            posts_count,
            ..
        }: PostTag,
    ) -> Self {
        Tag {
            id,
            title,
            posts_count,
        }
    }
}
