use serde::{Deserialize, Serialize};

use super::response::{PostDetailResponse, PostSummary, TagResponse};

/// What a handler hands to the renderer: the template to use and its data.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub template: &'static str,
    pub context: T,
}

impl<T> Page<T> {
    pub fn new(template: &'static str, context: T) -> Page<T> {
        Page { template, context }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct IndexContext {
    pub most_popular_posts: Vec<PostSummary>,
    pub page_posts: Vec<PostSummary>,
    pub popular_tags: Vec<TagResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PostDetailContext {
    pub post: PostDetailResponse,
    pub popular_tags: Vec<TagResponse>,
    pub most_popular_posts: Vec<PostSummary>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TagFilterContext {
    pub tag: String,
    pub popular_tags: Vec<TagResponse>,
    pub posts: Vec<PostSummary>,
    pub most_popular_posts: Vec<PostSummary>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ContactsContext {}
