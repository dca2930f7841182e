use anyhow::{bail, Context, Result};

use crate::editorial::trending::DEFAULT_AUTO_TRENDING_HOURS;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` runs against the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// Materialized path of the home page; the site-wide listing is everything below it.
    pub home_tree_path: String,
    pub auto_trending_hours: i64,
    pub featured_videos_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let auto_trending_hours = parse_env("AUTO_TRENDING_HOURS", DEFAULT_AUTO_TRENDING_HOURS)?;
        if auto_trending_hours <= 0 {
            bail!("AUTO_TRENDING_HOURS must be positive, got {auto_trending_hours}");
        }

        Ok(Config {
            database_url: std::env::var("DATABASE_URL").ok(),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            home_tree_path: std::env::var("HOME_TREE_PATH").unwrap_or_else(|_| "/home/".to_string()),
            auto_trending_hours,
            featured_videos_limit: parse_env("FEATURED_VIDEOS_LIMIT", 4)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            db_max_connections: 10,
            port: 8080,
            rust_log: "info".to_string(),
            home_tree_path: "/home/".to_string(),
            auto_trending_hours: DEFAULT_AUTO_TRENDING_HOURS,
            featured_videos_limit: 4,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}
