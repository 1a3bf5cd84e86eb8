use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::movie_dto::{
        CreateMoviePayload, MovieListResponse, MovieResponse, UpdateMoviePayload,
    },
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/movies",
    request_body = CreateMoviePayload,
    responses(
        (status = 201, description = "Movie created successfully", body = MovieResponse),
        (status = 400, description = "Invalid payload or constraint violation")
    )
)]
#[axum::debug_handler]
pub async fn create_movie(
    State(state): State<AppState>,
    Json(payload): Json<CreateMoviePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    // A TMDB-backed movie gets its snapshot on the way in. Losing TMDB only
    // costs the snapshot, not the insert.
    let snapshot = match payload.tmdb_id {
        Some(tmdb_id) if state.tmdb_service.is_configured() => {
            match state.tmdb_service.fetch_movie(tmdb_id).await {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    tracing::warn!(tmdb_id, error = %e, "TMDB snapshot fetch failed, creating without snapshot");
                    None
                }
            }
        }
        _ => None,
    };

    let movie = state.movie_service.create(payload, snapshot).await?;
    Ok((StatusCode::CREATED, Json(MovieResponse::from(movie))))
}

#[utoipa::path(
    get,
    path = "/api/v1/movies",
    responses(
        (status = 200, description = "List of movies", body = MovieListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_movies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let movies = state.movie_service.list().await?;
    let items: Vec<MovieResponse> = movies.into_iter().map(Into::into).collect();
    let total = items.len();
    Ok(Json(MovieListResponse { items, total }))
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie found", body = MovieResponse),
        (status = 404, description = "Movie not found")
    )
)]
#[axum::debug_handler]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let movie = state.movie_service.get_by_id(id).await?;
    Ok(Json(MovieResponse::from(movie)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    request_body = UpdateMoviePayload,
    responses(
        (status = 200, description = "Movie updated successfully", body = MovieResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Movie not found")
    )
)]
#[axum::debug_handler]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMoviePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let movie = state.movie_service.update(id, payload).await?;
    Ok(Json(MovieResponse::from(movie)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    responses(
        (status = 204, description = "Movie deleted successfully"),
        (status = 404, description = "Movie not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.movie_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/movies/{id}/refresh",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Snapshot refreshed", body = MovieResponse),
        (status = 400, description = "Movie is custom or TMDB not configured"),
        (status = 404, description = "Movie not found"),
        (status = 502, description = "TMDB unreachable")
    )
)]
#[axum::debug_handler]
pub async fn refresh_movie_snapshot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let movie = state.movie_service.get_by_id(id).await?;
    let tmdb_id = movie.tmdb_id.ok_or_else(|| {
        Error::BadRequest("Movie has no TMDB id to refresh from".to_string())
    })?;

    let snapshot = state.tmdb_service.fetch_movie(tmdb_id).await?;
    let movie = state.movie_service.refresh_snapshot(id, snapshot).await?;
    Ok(Json(MovieResponse::from(movie)))
}
