use crate::dto::movie_dto::{CreateMoviePayload, UpdateMoviePayload};
use crate::error::Result;
use crate::models::movie::Movie;
use chrono::Utc;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct MovieService {
    pool: PgPool,
}

impl MovieService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a movie. The schema rejects rows that are neither TMDB-backed
    /// nor marked custom, so no pre-validation happens here.
    pub async fn create(
        &self,
        payload: CreateMoviePayload,
        snapshot: Option<JsonValue>,
    ) -> Result<Movie> {
        let snapshot_updated = snapshot.as_ref().map(|_| Utc::now());
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (
                tmdb_id, title, year, genres, overview,
                custom_poster_path, custom_trailer_url,
                tmdb_snapshot, tmdb_snapshot_updated, is_custom
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(payload.tmdb_id)
        .bind(payload.title)
        .bind(payload.year)
        .bind(payload.genres)
        .bind(payload.overview)
        .bind(payload.custom_poster_path)
        .bind(payload.custom_trailer_url)
        .bind(snapshot)
        .bind(snapshot_updated)
        .bind(payload.is_custom)
        .fetch_one(&self.pool)
        .await?;

        Ok(movie)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Movie> {
        let movie = sqlx::query_as::<_, Movie>(r#"SELECT * FROM movies WHERE id = $1"#)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(movie)
    }

    pub async fn list(&self) -> Result<Vec<Movie>> {
        let movies =
            sqlx::query_as::<_, Movie>(r#"SELECT * FROM movies ORDER BY created_at DESC"#)
                .fetch_all(&self.pool)
                .await?;
        Ok(movies)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateMoviePayload) -> Result<Movie> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            UPDATE movies
            SET
                title = COALESCE($2, title),
                year = COALESCE($3, year),
                genres = COALESCE($4, genres),
                overview = COALESCE($5, overview),
                custom_poster_path = COALESCE($6, custom_poster_path),
                custom_trailer_url = COALESCE($7, custom_trailer_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.title)
        .bind(payload.year)
        .bind(payload.genres)
        .bind(payload.overview)
        .bind(payload.custom_poster_path)
        .bind(payload.custom_trailer_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(movie)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        // Hard delete; the schema has no soft-delete notion.
        self.get_by_id(id).await?;
        sqlx::query(r#"DELETE FROM movies WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn refresh_snapshot(&self, id: Uuid, snapshot: JsonValue) -> Result<Movie> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            UPDATE movies
            SET
                tmdb_snapshot = $2,
                tmdb_snapshot_updated = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(snapshot)
        .fetch_one(&self.pool)
        .await?;

        Ok(movie)
    }
}
