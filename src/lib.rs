pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    cache_service::CacheService, movie_service::MovieService, tmdb_service::TmdbService,
    user_service::UserService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub movie_service: MovieService,
    pub user_service: UserService,
    pub tmdb_service: TmdbService,
    pub cache_service: CacheService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();

        let movie_service = MovieService::new(pool.clone());
        let user_service = UserService::new(pool.clone());
        let tmdb_service = TmdbService::new(
            config.tmdb_api_key.clone(),
            config.tmdb_base_url.clone(),
            http_client,
        );
        let cache_service = CacheService::new(config.redis_url.clone());

        Self {
            pool,
            movie_service,
            user_service,
            tmdb_service,
            cache_service,
        }
    }
}
