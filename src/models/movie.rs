use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Poster width tier used for TMDB-hosted images.
pub const TMDB_POSTER_WIDTH: &str = "w500";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub tmdb_id: Option<i32>,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub genres: Option<Vec<String>>,
    pub overview: Option<String>,
    pub custom_poster_path: Option<String>,
    pub custom_trailer_url: Option<String>,
    pub tmdb_snapshot: Option<JsonValue>,
    pub tmdb_snapshot_updated: Option<DateTime<Utc>>,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    /// String field lookup on the cached TMDB snapshot. Missing keys and
    /// mismatched types read as absent, never as an error.
    fn snapshot_str(&self, field: &str) -> Option<&str> {
        self.tmdb_snapshot.as_ref()?.get(field)?.as_str()
    }

    /// Display title: local override, then snapshot, then a fixed fallback.
    pub fn display_title(&self) -> String {
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }
        self.snapshot_str("title")
            .map(str::to_string)
            .unwrap_or_else(|| "Unknown Title".to_string())
    }

    /// Display year: local override, then the leading `YYYY` of the snapshot
    /// `release_date`. A malformed date reads as absent.
    pub fn display_year(&self) -> Option<i32> {
        if let Some(year) = self.year {
            return Some(year);
        }
        self.snapshot_str("release_date")?
            .get(..4)?
            .parse()
            .ok()
    }

    pub fn display_overview(&self) -> String {
        if let Some(overview) = self.overview.as_deref().filter(|o| !o.is_empty()) {
            return overview.to_string();
        }
        self.snapshot_str("overview")
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Display genres: local override, then the ordered `name`s of the
    /// snapshot's `genres` list. Entries without a string `name` are skipped.
    pub fn display_genres(&self) -> Vec<String> {
        if let Some(genres) = self.genres.as_ref().filter(|g| !g.is_empty()) {
            return genres.clone();
        }
        self.tmdb_snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.get("genres"))
            .and_then(JsonValue::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|genre| genre.get("name").and_then(JsonValue::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Poster URL: a custom poster resolves to a media-relative path, a
    /// snapshot poster to the TMDB image service.
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        if let Some(path) = self.custom_poster_path.as_deref().filter(|p| !p.is_empty()) {
            return Some(format!("/media/posters/{}", path));
        }
        let path = self.snapshot_str("poster_path")?;
        Some(format!("{}/{}{}", image_base_url, TMDB_POSTER_WIDTH, path))
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.display_genres()
            .iter()
            .any(|g| g.eq_ignore_ascii_case(genre))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

    fn blank_movie() -> Movie {
        Movie {
            id: Uuid::new_v4(),
            tmdb_id: Some(603),
            title: None,
            year: None,
            genres: None,
            overview: None,
            custom_poster_path: None,
            custom_trailer_url: None,
            tmdb_snapshot: None,
            tmdb_snapshot_updated: None,
            is_custom: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn movie_with_snapshot() -> Movie {
        Movie {
            tmdb_snapshot: Some(json!({
                "title": "The Matrix",
                "release_date": "1999-03-31",
                "overview": "A hacker learns the truth.",
                "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
                "poster_path": "/matrix.jpg",
            })),
            ..blank_movie()
        }
    }

    #[test]
    fn display_values_fall_back_to_snapshot() {
        let movie = movie_with_snapshot();
        assert_eq!(movie.display_title(), "The Matrix");
        assert_eq!(movie.display_year(), Some(1999));
        assert_eq!(movie.display_overview(), "A hacker learns the truth.");
        assert_eq!(movie.display_genres(), vec!["Action", "Science Fiction"]);
        assert_eq!(
            movie.poster_url(IMAGE_BASE).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/matrix.jpg")
        );
    }

    #[test]
    fn local_overrides_always_win() {
        let movie = Movie {
            title: Some("Матрица".into()),
            year: Some(2003),
            genres: Some(vec!["Cyberpunk".into()]),
            overview: Some("Local overview.".into()),
            custom_poster_path: Some("matrix-custom.png".into()),
            ..movie_with_snapshot()
        };
        assert_eq!(movie.display_title(), "Матрица");
        assert_eq!(movie.display_year(), Some(2003));
        assert_eq!(movie.display_overview(), "Local overview.");
        assert_eq!(movie.display_genres(), vec!["Cyberpunk"]);
        assert_eq!(
            movie.poster_url(IMAGE_BASE).as_deref(),
            Some("/media/posters/matrix-custom.png")
        );
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let movie = blank_movie();
        assert_eq!(movie.display_title(), "Unknown Title");
        assert_eq!(movie.display_year(), None);
        assert_eq!(movie.display_overview(), "");
        assert!(movie.display_genres().is_empty());
        assert_eq!(movie.poster_url(IMAGE_BASE), None);
    }

    #[test]
    fn release_date_parsing_tolerates_garbage() {
        let parse_year = |snapshot: JsonValue| {
            Movie {
                tmdb_snapshot: Some(snapshot),
                ..blank_movie()
            }
            .display_year()
        };
        assert_eq!(parse_year(json!({"release_date": "2019-05-01"})), Some(2019));
        assert_eq!(parse_year(json!({"release_date": "bad"})), None);
        assert_eq!(parse_year(json!({"release_date": ""})), None);
        assert_eq!(parse_year(json!({"release_date": 1999})), None);
        assert_eq!(parse_year(json!({})), None);
    }

    #[test]
    fn malformed_snapshot_never_panics() {
        let movie = Movie {
            tmdb_snapshot: Some(json!({
                "title": 42,
                "overview": null,
                "genres": [{"id": 1}, {"name": 7}, "loose string"],
                "poster_path": false,
            })),
            ..blank_movie()
        };
        assert_eq!(movie.display_title(), "Unknown Title");
        assert_eq!(movie.display_overview(), "");
        assert!(movie.display_genres().is_empty());
        assert_eq!(movie.poster_url(IMAGE_BASE), None);
    }

    #[test]
    fn empty_string_override_falls_through() {
        let movie = Movie {
            title: Some(String::new()),
            genres: Some(Vec::new()),
            ..movie_with_snapshot()
        };
        assert_eq!(movie.display_title(), "The Matrix");
        assert_eq!(movie.display_genres(), vec!["Action", "Science Fiction"]);
    }

    #[test]
    fn has_genre_is_case_insensitive() {
        let movie = movie_with_snapshot();
        assert!(movie.has_genre("action"));
        assert!(!movie.has_genre("Romance"));
    }
}
