use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use cinebase_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();

    // Console output in development, JSON lines in production.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!(
        app_name = %config.app_name,
        version = %config.app_version,
        environment = %config.app_env,
        "Starting application"
    );

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let health_routes = Router::new()
        .route("/", get(routes::health::health))
        .route("/simple", get(routes::health::simple))
        .route("/ready", get(routes::health::ready))
        .route("/live", get(routes::health::live));

    let cache_routes = Router::new()
        .route("/test", get(routes::cache::test_cache))
        .route("/stats", get(routes::cache::cache_stats))
        .route("/clear", post(routes::cache::clear_cache))
        .route("/keys", get(routes::cache::list_cache_keys));

    let movie_routes = Router::new()
        .route(
            "/",
            get(routes::movie::list_movies).post(routes::movie::create_movie),
        )
        .route(
            "/:id",
            get(routes::movie::get_movie)
                .patch(routes::movie::update_movie)
                .delete(routes::movie::delete_movie),
        )
        .route("/:id/refresh", post(routes::movie::refresh_movie_snapshot));

    let user_routes = Router::new()
        .route(
            "/",
            get(routes::user::list_users).post(routes::user::create_user),
        )
        .route(
            "/:id",
            get(routes::user::get_user)
                .patch(routes::user::update_user)
                .delete(routes::user::delete_user),
        );

    let api_v1 = Router::new()
        .nest("/health", health_routes)
        .nest("/cache", cache_routes)
        .nest("/movies", movie_routes)
        .nest("/users", user_routes);

    let cors = if config.cors_origins == "*" {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins_list()
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    info!("Serving media from: {}", config.media_dir);

    let app = Router::new()
        .route("/", get(root))
        .nest("/api/v1", api_v1)
        .nest_service("/media", ServeDir::new(&config.media_dir))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[axum::debug_handler]
async fn root() -> axum::response::Json<serde_json::Value> {
    let config = get_config();
    axum::response::Json(json!({
        "message": format!("Welcome to {}", config.app_name),
        "version": config.app_version,
        "environment": config.app_env,
    }))
}
