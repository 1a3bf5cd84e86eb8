use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::get_config;
use crate::models::movie::Movie;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMoviePayload {
    pub tmdb_id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(range(min = 1888, max = 2030))]
    pub year: Option<i32>,
    pub genres: Option<Vec<String>>,
    pub overview: Option<String>,
    #[validate(length(max = 500))]
    pub custom_poster_path: Option<String>,
    #[validate(length(max = 500))]
    pub custom_trailer_url: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMoviePayload {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(range(min = 1888, max = 2030))]
    pub year: Option<i32>,
    pub genres: Option<Vec<String>>,
    pub overview: Option<String>,
    #[validate(length(max = 500))]
    pub custom_poster_path: Option<String>,
    #[validate(length(max = 500))]
    pub custom_trailer_url: Option<String>,
}

/// Response view of a movie with display values already resolved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovieResponse {
    pub id: Uuid,
    pub tmdb_id: Option<i32>,
    pub title: String,
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub overview: String,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
    pub is_custom: bool,
    pub tmdb_snapshot_updated: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        let image_base_url = &get_config().tmdb_image_base_url;
        Self {
            title: movie.display_title(),
            year: movie.display_year(),
            genres: movie.display_genres(),
            overview: movie.display_overview(),
            poster_url: movie.poster_url(image_base_url),
            trailer_url: movie.custom_trailer_url.clone(),
            id: movie.id,
            tmdb_id: movie.tmdb_id,
            is_custom: movie.is_custom,
            tmdb_snapshot_updated: movie.tmdb_snapshot_updated,
            created_at: movie.created_at,
            updated_at: movie.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovieListResponse {
    pub items: Vec<MovieResponse>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CreateMoviePayload {
        CreateMoviePayload {
            tmdb_id: Some(603),
            title: Some("The Matrix".into()),
            year: Some(1999),
            genres: None,
            overview: None,
            custom_poster_path: None,
            custom_trailer_url: None,
            is_custom: false,
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn year_outside_range_is_rejected() {
        let mut p = payload();
        p.year = Some(1800);
        assert!(p.validate().is_err());
        p.year = Some(2031);
        assert!(p.validate().is_err());
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut p = payload();
        p.title = Some(String::new());
        assert!(p.validate().is_err());
    }

    #[test]
    fn overlong_title_is_rejected() {
        let mut p = payload();
        p.title = Some("x".repeat(256));
        assert!(p.validate().is_err());
    }
}
