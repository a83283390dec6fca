use sqlx::{Sqlite, Transaction};

use crate::{errors::RequestError, models::Comment};

pub async fn get_comments_for_post_in_db(
    tx: &mut Transaction<'_, Sqlite>,
    post_id: i64,
) -> Result<Vec<Comment>, RequestError> {
    let result = sqlx::query_as::<Sqlite, Comment>(
        r#"
        SELECT comments.text         AS "text",
               comments.published_at AS "published_at",
               users.username        AS "author_username"
        FROM   comments
               JOIN users
                 ON users.id = comments.author_id
        WHERE  comments.post_id = $1
        ORDER  BY julianday(comments.published_at) ASC, comments.id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(&mut *tx)
    .await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::db_helpers::test_support::*;
    use crate::db_helpers::{BlogReader, PopularityMetric, SqliteBlog};

    #[tokio::test]
    async fn comments_come_oldest_first_with_authors() {
        let pool = memory_pool().await;
        let alice = user(&pool, "alice").await;
        let bob = user(&pool, "bob").await;
        let a = post(&pool, alice, "a", day(1)).await;
        let other = post(&pool, alice, "other", day(1)).await;
        comment(&pool, a, bob, "later", day(5)).await;
        comment(&pool, a, alice, "earlier", day(2)).await;
        comment(&pool, other, bob, "elsewhere", day(3)).await;

        let blog = SqliteBlog::new(pool, PopularityMetric::default());
        let comments = blog.comments_for_post(a).await.unwrap();
        let summary = comments
            .iter()
            .map(|c| (c.text.as_str(), c.author_username.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(summary, [("earlier", "alice"), ("later", "bob")]);
    }

    #[tokio::test]
    async fn comment_order_follows_instants_not_text() {
        let pool = memory_pool().await;
        let alice = user(&pool, "alice").await;
        let a = post(&pool, alice, "a", day(1)).await;
        comment_at(&pool, a, alice, "second", "2024-01-02T10:00:00+00:00").await;
        comment_at(&pool, a, alice, "first", "2024-01-02T12:00:00+03:00").await;

        let blog = SqliteBlog::new(pool, PopularityMetric::default());
        let comments = blog.comments_for_post(a).await.unwrap();
        let texts = comments.iter().map(|c| c.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, ["first", "second"]);
        assert!(comments[0].published_at < comments[1].published_at);
    }
}
