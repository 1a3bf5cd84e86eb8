use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use std::time::Instant;

use crate::{
    config::get_config,
    services::{cache_service::CacheService, tmdb_service::TmdbService},
    AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Healthy,
    Warning,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn healthy(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Healthy,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Warning,
            message: message.into(),
        }
    }

    fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Unhealthy,
            message: message.into(),
        }
    }
}

async fn check_database(pool: &PgPool) -> CheckResult {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await {
        Ok(_) => CheckResult::healthy("Database connection successful"),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            CheckResult::unhealthy(format!("Database connection failed: {}", e))
        }
    }
}

async fn check_redis(cache: &CacheService) -> CheckResult {
    match cache.ping().await {
        Ok(()) => CheckResult::healthy("Redis connection successful"),
        Err(e) => {
            tracing::error!(error = %e, "Redis health check failed");
            CheckResult::unhealthy(format!("Redis connection failed: {}", e))
        }
    }
}

/// An absent API key is an expected deployment shape, so it degrades the
/// service instead of failing it; so does TMDB being unreachable.
async fn check_tmdb(tmdb: &TmdbService) -> CheckResult {
    if !tmdb.is_configured() {
        return CheckResult::warning("TMDB API key not configured");
    }
    match tmdb.ping().await {
        Ok(()) => CheckResult::healthy("TMDB API connection successful"),
        Err(e) => {
            tracing::warn!(error = %e, "TMDB health check failed");
            CheckResult::warning(format!("TMDB API connection failed: {}", e))
        }
    }
}

/// Precedence: any unhealthy probe makes the service unavailable; any
/// warning degrades it; otherwise healthy.
fn aggregate(checks: &[&CheckResult]) -> (&'static str, StatusCode) {
    if checks.iter().any(|c| c.status == CheckStatus::Unhealthy) {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    } else if checks.iter().any(|c| c.status == CheckStatus::Warning) {
        ("degraded", StatusCode::OK)
    } else {
        ("healthy", StatusCode::OK)
    }
}

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let config = get_config();
    let started = Instant::now();

    let (database, redis, tmdb) = tokio::join!(
        check_database(&state.pool),
        check_redis(&state.cache_service),
        check_tmdb(&state.tmdb_service),
    );

    let (status, status_code) = aggregate(&[&database, &redis, &tmdb]);
    let response_time_ms = (started.elapsed().as_secs_f64() * 100_000.0).round() / 100.0;

    let body = json!({
        "status": status,
        "timestamp": Utc::now().to_rfc3339(),
        "version": config.app_version,
        "environment": config.app_env,
        "response_time_ms": response_time_ms,
        "checks": {
            "database": database,
            "redis": redis,
            "tmdb": tmdb,
        },
    });

    (status_code, Json(body))
}

#[axum::debug_handler]
pub async fn simple() -> impl IntoResponse {
    let config = get_config();
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": config.app_version,
    }))
}

#[axum::debug_handler]
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "message": "Application is ready to serve requests",
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "message": e.to_string(),
                })),
            )
        }
    }
}

/// Process-is-running probe. Deliberately checks nothing.
#[axum::debug_handler]
pub async fn live() -> impl IntoResponse {
    Json(json!({
        "status": "alive",
        "message": "Application is alive",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_healthy_aggregates_to_healthy() {
        let a = CheckResult::healthy("a");
        let b = CheckResult::healthy("b");
        let c = CheckResult::healthy("c");
        assert_eq!(aggregate(&[&a, &b, &c]), ("healthy", StatusCode::OK));
    }

    #[test]
    fn one_unhealthy_wins_over_everything() {
        let a = CheckResult::healthy("a");
        let b = CheckResult::unhealthy("b");
        let c = CheckResult::warning("c");
        assert_eq!(
            aggregate(&[&a, &b, &c]),
            ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
        );
    }

    #[test]
    fn warnings_only_degrade() {
        let a = CheckResult::healthy("a");
        let b = CheckResult::warning("b");
        let c = CheckResult::healthy("c");
        assert_eq!(aggregate(&[&a, &b, &c]), ("degraded", StatusCode::OK));
    }

    #[test]
    fn statuses_serialize_lowercase() {
        let rendered = serde_json::to_string(&CheckResult::warning("msg")).unwrap();
        assert!(rendered.contains(r#""status":"warning""#));
    }
}
