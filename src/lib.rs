pub mod admin;
pub mod config;
mod data_formats;
pub mod db_helpers;
mod errors;
mod handlers;
pub mod models;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
pub use config::Settings;
pub use data_formats::*;
pub use db_helpers::{BlogReader, PopularityMetric, SqliteBlog};
pub use errors::{RequestError, RequestErrorJsonWrapper};
use handlers::*;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::{net::SocketAddr, sync::Arc};

pub type JsonResponse<T> = (StatusCode, Json<T>);

pub async fn run_app(app: Router, address: SocketAddr) -> Result<()> {
    tracing::info!(%address, "server started");
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        tracing::info!(db_url, "creating database");
        Sqlite::create_database(db_url)
            .await
            .with_context(|| format!("Failed to create database {db_url}"))?;
    } else {
        tracing::debug!(db_url, "database already exists");
    }
    let pool = SqlitePool::connect(db_url).await?;
    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    tracing::info!("running migrations");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("migrations completed");
    Ok(())
}

pub fn make_router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/posts/:slug/", get(post_detail))
        .route("/tags/:tag_title/", get(tag_filter))
        .route("/contacts/", get(contacts))
        .route("/admin/registry/", get(admin_registry))
        .route("/admin/registry/:entity/", get(admin_entity))
        .route("/check_health", get(alive))
        .fallback(not_found)
}

/// The full application: routes plus the shared reader and settings.
pub fn build_app(pool: SqlitePool, settings: Settings) -> Router {
    let blog: Arc<dyn BlogReader> = Arc::new(SqliteBlog::new(pool, settings.popularity));
    make_router()
        .layer(Extension(blog))
        .layer(Extension(Arc::new(settings)))
}
