use sqlx::{Sqlite, Transaction};

use crate::errors::RequestError;
use crate::models::{PostTag, Tag};

const TAG_POSTS_COUNT: &str =
    "(SELECT COUNT(*) FROM post_tags AS counted WHERE counted.tag_id = tags.id)";

pub async fn popular_tags_in_db(
    tx: &mut Transaction<'_, Sqlite>,
    limit: u32,
) -> Result<Vec<Tag>, RequestError> {
    let result = sqlx::query_as::<Sqlite, Tag>(
        r#"
        SELECT tags.id                  AS "id",
               tags.title               AS "title",
               COUNT(post_tags.post_id) AS "posts_count"
        FROM   tags
               LEFT JOIN post_tags
                      ON post_tags.tag_id = tags.id
        GROUP  BY tags.id
        ORDER  BY posts_count DESC, tags.id ASC
        LIMIT  $1
        "#,
    )
    .bind(i64::from(limit))
    .fetch_all(&mut *tx)
    .await?;
    Ok(result)
}

pub async fn get_tag_by_title_in_db(
    tx: &mut Transaction<'_, Sqlite>,
    title: &str,
) -> Result<Option<Tag>, RequestError> {
    let query = format!(
        r#"SELECT tags.id AS "id", tags.title AS "title", {TAG_POSTS_COUNT} AS "posts_count"
           FROM tags WHERE tags.title = $1"#
    );
    let result = sqlx::query_as::<Sqlite, Tag>(&query)
        .bind(title)
        .fetch_optional(&mut *tx)
        .await?;
    Ok(result)
}

pub async fn get_tags_for_post_in_db(
    tx: &mut Transaction<'_, Sqlite>,
    post_id: i64,
) -> Result<Vec<Tag>, RequestError> {
    let result = preload_tags_in_db(tx, &[post_id])
        .await?
        .into_iter()
        .map(Tag::from)
        .collect();
    Ok(result)
}

/// Fetches the tags of all given posts in one statement, each annotated with
/// how many posts carry it. Rows come back ordered by tag title.
pub async fn preload_tags_in_db(
    tx: &mut Transaction<'_, Sqlite>,
    post_ids: &[i64],
) -> Result<Vec<PostTag>, RequestError> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; post_ids.len()].join(", ");
    let query = format!(
        r#"
        SELECT post_tags.post_id AS "post_id",
               tags.id           AS "id",
               tags.title        AS "title",
               {TAG_POSTS_COUNT} AS "posts_count"
        FROM   post_tags
               JOIN tags
                 ON tags.id = post_tags.tag_id
        WHERE  post_tags.post_id IN ({placeholders})
        ORDER  BY tags.title ASC, tags.id ASC
        "#
    );
    let mut statement = sqlx::query_as::<Sqlite, PostTag>(&query);
    for id in post_ids {
        statement = statement.bind(*id);
    }
    let result = statement.fetch_all(&mut *tx).await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::db_helpers::test_support::*;
    use crate::db_helpers::{BlogReader, PopularityMetric, SqliteBlog};
    use crate::errors::RequestError;

    #[tokio::test]
    async fn popular_tags_order_by_post_count() {
        let pool = memory_pool().await;
        let author = user(&pool, "alice").await;
        let go = tag(&pool, "go").await;
        let python = tag(&pool, "python").await;
        tag(&pool, "unused").await;
        for n in 1..=3 {
            let id = post(&pool, author, &format!("py-{n}"), day(n)).await;
            link_tag(&pool, id, python).await;
        }
        let gopher = post(&pool, author, "go-1", day(4)).await;
        link_tag(&pool, gopher, go).await;

        let blog = SqliteBlog::new(pool, PopularityMetric::default());
        let tags = blog.popular_tags(2).await.unwrap();
        let summary = tags
            .iter()
            .map(|t| (t.title.as_str(), t.posts_count))
            .collect::<Vec<_>>();
        assert_eq!(summary, [("python", 3), ("go", 1)]);

        let all = blog.popular_tags(10).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].title, "unused");
        assert_eq!(all[2].posts_count, 0);
    }

    #[tokio::test]
    async fn tag_lookup_by_title() {
        let pool = memory_pool().await;
        let author = user(&pool, "alice").await;
        let rust = tag(&pool, "rust").await;
        let id = post(&pool, author, "a", day(1)).await;
        link_tag(&pool, id, rust).await;

        let blog = SqliteBlog::new(pool, PopularityMetric::default());
        let found = blog.tag_by_title("rust").await.unwrap();
        assert_eq!(found.id, rust);
        assert_eq!(found.posts_count, 1);

        let missing = blog.tag_by_title("cobol").await;
        assert!(matches!(missing, Err(RequestError::NotFound(_))));
    }

    #[tokio::test]
    async fn tags_for_post_only_returns_linked_tags() {
        let pool = memory_pool().await;
        let author = user(&pool, "alice").await;
        let a = post(&pool, author, "a", day(1)).await;
        let b = post(&pool, author, "b", day(2)).await;
        let rust = tag(&pool, "rust").await;
        let web = tag(&pool, "web").await;
        link_tag(&pool, a, web).await;
        link_tag(&pool, a, rust).await;
        link_tag(&pool, b, rust).await;

        let blog = SqliteBlog::new(pool, PopularityMetric::default());
        let tags = blog.tags_for_post(a).await.unwrap();
        let summary = tags
            .iter()
            .map(|t| (t.title.as_str(), t.posts_count))
            .collect::<Vec<_>>();
        assert_eq!(summary, [("rust", 2), ("web", 1)]);
        assert!(blog.tags_for_post(b + 100).await.unwrap().is_empty());
    }
}
