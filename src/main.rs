use blog_pages::{build_app, init_db, run_app, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blog_pages=info")),
        )
        .init();

    if let Err(error) = serve().await {
        tracing::error!("Error: {:#}", error);
        std::process::exit(1);
    }
}

async fn serve() -> blog_pages::Result<()> {
    let settings = Settings::from_env()?;
    tracing::info!(popularity = %settings.popularity, "loaded settings");
    let pool = init_db(&settings.database_url).await?;
    let address = settings.bind_addr;
    run_app(build_app(pool, settings), address).await
}
