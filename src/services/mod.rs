pub mod cache_service;
pub mod movie_service;
pub mod tmdb_service;
pub mod user_service;
