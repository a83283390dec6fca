use serde::{Deserialize, Serialize};

use crate::models::{Comment, Post, PostRecord, Tag};

use super::{media_url, TEASER_LENGTH};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TagResponse {
    pub title: String,
    pub posts_with_tag: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PostSummary {
    pub title: String,
    pub teaser_text: String,
    pub author: String,
    pub comments_amount: i64,
    pub image_url: Option<String>,
    pub published_at: String,
    pub slug: String,
    pub tags: Vec<TagResponse>,
    /// `None` for a post without tags.
    pub first_tag_title: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CommentResponse {
    pub text: String,
    pub published_at: String,
    pub author: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PostDetailResponse {
    pub title: String,
    pub text: String,
    pub author: String,
    pub comments: Vec<CommentResponse>,
    pub likes_amount: i64,
    pub image_url: Option<String>,
    pub published_at: String,
    pub slug: String,
    pub tags: Vec<TagResponse>,
}

impl TagResponse {
    pub fn new(
        Tag {
            title, posts_count, ..
        }: Tag,
    ) -> Self {
        TagResponse {
            title,
            posts_with_tag: posts_count,
        }
    }
}

impl CommentResponse {
    pub fn new(
        Comment {
            text,
            published_at,
            author_username,
        }: Comment,
    ) -> Self {
        CommentResponse {
            text,
            published_at: published_at.to_rfc3339(),
            author: author_username,
        }
    }
}

impl PostSummary {
    pub fn new(Post { record, tags }: Post, media_prefix: &str) -> Self {
        let PostRecord {
            title,
            text,
            slug,
            image,
            published_at,
            author_username,
            comments_count,
            ..
        } = record;
        let tags = tags.into_iter().map(TagResponse::new).collect::<Vec<_>>();
        PostSummary {
            title,
            teaser_text: text.chars().take(TEASER_LENGTH).collect(),
            author: author_username,
            comments_amount: comments_count,
            image_url: image.map(|path| media_url(media_prefix, &path)),
            published_at: published_at.to_rfc3339(),
            slug,
            first_tag_title: tags.first().map(|tag| tag.title.clone()),
            tags,
        }
    }

    pub fn from_posts(posts: Vec<Post>, media_prefix: &str) -> Vec<Self> {
        posts
            .into_iter()
            .map(|post| PostSummary::new(post, media_prefix))
            .collect()
    }
}

impl PostDetailResponse {
    pub fn new(
        PostRecord {
            title,
            text,
            slug,
            image,
            published_at,
            author_username,
            likes_count,
            ..
        }: PostRecord,
        comments: Vec<Comment>,
        tags: Vec<Tag>,
        media_prefix: &str,
    ) -> Self {
        PostDetailResponse {
            title,
            text,
            author: author_username,
            comments: comments.into_iter().map(CommentResponse::new).collect(),
            likes_amount: likes_count,
            image_url: image.map(|path| media_url(media_prefix, &path)),
            published_at: published_at.to_rfc3339(),
            slug,
            tags: tags.into_iter().map(TagResponse::new).collect(),
        }
    }
}
