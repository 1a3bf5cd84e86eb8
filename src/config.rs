use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,
    pub app_env: String,
    pub server_address: String,
    pub database_url: String,
    pub redis_url: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub media_dir: String,
    pub cors_origins: String,
    pub log_level: String,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            app_name: get_env_or("APP_NAME", "CineBase"),
            app_version: get_env_or("APP_VERSION", env!("CARGO_PKG_VERSION")),
            app_env: get_env_or("APP_ENV", "dev"),
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8000"),
            database_url: get_env("DATABASE_URL")?,
            redis_url: get_env_or("REDIS_URL", "redis://localhost:6379/0"),
            tmdb_api_key: get_env_or("TMDB_API_KEY", ""),
            tmdb_base_url: get_env_or("TMDB_BASE_URL", "https://api.themoviedb.org/3"),
            tmdb_image_base_url: get_env_or("TMDB_IMAGE_BASE_URL", "https://image.tmdb.org/t/p"),
            media_dir: get_env_or("MEDIA_DIR", "./media"),
            cors_origins: get_env_or("CORS_ORIGINS", "*"),
            log_level: get_env_or("LOG_LEVEL", "info"),
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "prod"
    }

    pub fn is_development(&self) -> bool {
        self.app_env == "dev"
    }

    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
