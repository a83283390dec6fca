use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use anyhow::{Context, Result};

use crate::db_helpers::PopularityMetric;

pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3001));
const DEFAULT_MEDIA_URL: &str = "/media/";

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Prefix joined with a post's stored image path to build its public URL.
    pub media_url: String,
    pub popularity: PopularityMetric,
}

impl Settings {
    /// Reads settings from the process environment. Call `dotenvy::dotenv()`
    /// first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(value) => value
                .parse::<SocketAddr>()
                .with_context(|| format!("BIND_ADDR {value:?} must be a socket address"))?,
            Err(_) => DEFAULT_BIND_ADDR,
        };
        let media_url = std::env::var("MEDIA_URL").unwrap_or_else(|_| DEFAULT_MEDIA_URL.to_string());
        let popularity = match std::env::var("POPULARITY_METRIC") {
            Ok(value) => value
                .parse::<PopularityMetric>()
                .with_context(|| format!("unknown POPULARITY_METRIC {value:?}"))?,
            Err(_) => PopularityMetric::default(),
        };
        Ok(Settings {
            database_url,
            bind_addr,
            media_url,
            popularity,
        })
    }

    pub fn new(database_url: impl Into<String>) -> Self {
        Settings {
            database_url: database_url.into(),
            bind_addr: DEFAULT_BIND_ADDR,
            media_url: DEFAULT_MEDIA_URL.to_string(),
            popularity: PopularityMetric::default(),
        }
    }
}
