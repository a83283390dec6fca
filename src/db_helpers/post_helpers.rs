use std::collections::HashMap;

use sqlx::{Sqlite, Transaction};

use crate::errors::RequestError;
use crate::models::{Post, PostRecord, PostTag, Tag};

use super::preload_tags_in_db;
use super::ranking::{COMMENTS_COUNT, LIKES_COUNT};

// `published_at` is stored as text that may carry any UTC offset, so compare
// instants rather than strings.
pub const FRESHEST_FIRST: &str = "julianday(posts.published_at) DESC, posts.id DESC";

fn post_select() -> String {
    format!(
        r#"
            SELECT posts.id           AS "id",
                   posts.title        AS "title",
                   posts.text         AS "text",
                   posts.slug         AS "slug",
                   posts.image        AS "image",
                   posts.published_at AS "published_at",
                   users.username     AS "author_username",
                   {COMMENTS_COUNT}   AS "comments_count",
                   {LIKES_COUNT}      AS "likes_count"
            FROM   posts
                   JOIN users
                     ON users.id = posts.author_id
        "#
    )
}

/// A post listing: the shared select, an optional tag filter, an ordering and
/// a trailing `LIMIT`.
pub struct PostQuery {
    order: String,
    tag_id: Option<i64>,
}

impl PostQuery {
    pub fn new(order: String) -> Self {
        Self {
            order,
            tag_id: None,
        }
    }

    pub fn for_tag(mut self, tag_id: i64) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    fn build(&self) -> String {
        let mut query = post_select();
        if self.tag_id.is_some() {
            query.push_str(
                " WHERE posts.id IN (SELECT post_tags.post_id FROM post_tags WHERE post_tags.tag_id = ?) ",
            );
        }
        query.push_str(&format!(" ORDER BY {} LIMIT ?", self.order));
        query
    }
}

/// Runs a listing and preloads the tags of every returned post with one extra
/// statement.
pub async fn list_posts_in_db(
    tx: &mut Transaction<'_, Sqlite>,
    query: PostQuery,
    limit: u32,
) -> Result<Vec<Post>, RequestError> {
    let sql = query.build();
    let mut statement = sqlx::query_as::<Sqlite, PostRecord>(&sql);
    if let Some(tag_id) = query.tag_id {
        statement = statement.bind(tag_id);
    }
    let records = statement.bind(i64::from(limit)).fetch_all(&mut *tx).await?;

    let ids = records.iter().map(|record| record.id).collect::<Vec<_>>();
    let tags = preload_tags_in_db(tx, &ids).await?;
    Ok(attach_tags(records, tags))
}

pub async fn get_post_by_slug_in_db(
    tx: &mut Transaction<'_, Sqlite>,
    slug: &str,
) -> Result<Option<PostRecord>, RequestError> {
    let query = format!("{} WHERE posts.slug = $1", post_select());
    let result = sqlx::query_as::<Sqlite, PostRecord>(&query)
        .bind(slug)
        .fetch_optional(&mut *tx)
        .await?;
    Ok(result)
}

/// Groups preloaded tag rows under their posts. Tag order within a post is the
/// order the rows arrived in.
pub fn attach_tags(records: Vec<PostRecord>, tags: Vec<PostTag>) -> Vec<Post> {
    let mut by_post: HashMap<i64, Vec<Tag>> = HashMap::new();
    for tag in tags {
        by_post.entry(tag.post_id).or_default().push(tag.into());
    }
    records
        .into_iter()
        .map(|record| Post {
            tags: by_post.remove(&record.id).unwrap_or_default(),
            record,
        })
        .collect()
}
