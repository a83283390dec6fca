#![allow(dead_code)]

use std::net::TcpListener;

use blog_pages::{build_app, migrate, Settings};
use chrono::{DateTime, TimeZone, Utc};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    migrate(&pool).await.unwrap();
    pool
}

/// Serves the app on a free local port and returns its base URL.
pub fn spawn_app(pool: SqlitePool) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let address = listener.local_addr().unwrap();
    let app = build_app(pool, Settings::new("sqlite::memory:"));
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());
    tokio::spawn(server);
    format!("http://{}", address)
}

pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, n, 12, 0, 0).unwrap()
}

pub struct Seeder<'a> {
    pub pool: &'a SqlitePool,
}

impl<'a> Seeder<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn user(&self, username: &str) -> i64 {
        sqlx::query("INSERT INTO users (username) VALUES ($1)")
            .bind(username)
            .execute(self.pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    pub async fn post(&self, author_id: i64, slug: &str, text: &str, at: DateTime<Utc>) -> i64 {
        sqlx::query(
            "INSERT INTO posts (title, text, slug, image, published_at, author_id)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(slug.to_uppercase())
        .bind(text)
        .bind(slug)
        .bind(format!("{slug}.png"))
        .bind(at)
        .bind(author_id)
        .execute(self.pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    pub async fn tag(&self, title: &str, post_ids: &[i64]) -> i64 {
        let tag_id = sqlx::query("INSERT INTO tags (title) VALUES ($1)")
            .bind(title)
            .execute(self.pool)
            .await
            .unwrap()
            .last_insert_rowid();
        for post_id in post_ids {
            sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2)")
                .bind(post_id)
                .bind(tag_id)
                .execute(self.pool)
                .await
                .unwrap();
        }
        tag_id
    }

    pub async fn likes(&self, post_id: i64, count: usize) {
        for n in 0..count {
            let fan = self.user(&format!("fan-{post_id}-{n}")).await;
            sqlx::query("INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2)")
                .bind(post_id)
                .bind(fan)
                .execute(self.pool)
                .await
                .unwrap();
        }
    }

    pub async fn comment(&self, post_id: i64, author_id: i64, text: &str, at: DateTime<Utc>) {
        sqlx::query(
            "INSERT INTO comments (post_id, author_id, text, published_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(post_id)
        .bind(author_id)
        .bind(text)
        .bind(at)
        .execute(self.pool)
        .await
        .unwrap();
    }
}
