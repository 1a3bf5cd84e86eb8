use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde_json::json;

use crate::{config::get_config, error::Result, AppState};

#[axum::debug_handler]
pub async fn test_cache(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let report = state
        .cache_service
        .test_roundtrip(&get_config().app_version)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Cache test successful",
        "test_data": report.test_data,
        "cache_info": {
            "key": report.key,
            "ttl_seconds": report.ttl_seconds,
            "size_bytes": report.size_bytes,
        },
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

#[axum::debug_handler]
pub async fn cache_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.cache_service.stats().await?;

    Ok(Json(json!({
        "status": "success",
        "redis_info": stats,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

#[axum::debug_handler]
pub async fn clear_cache(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let deleted = state.cache_service.clear().await?;

    let message = if deleted > 0 {
        format!("Cleared {} cache entries", deleted)
    } else {
        "No cache entries to clear".to_string()
    };

    Ok(Json(json!({
        "status": "success",
        "message": message,
        "deleted_keys": deleted,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

#[axum::debug_handler]
pub async fn list_cache_keys(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let keys = state.cache_service.keys().await?;

    Ok(Json(json!({
        "status": "success",
        "total_keys": keys.len(),
        "keys": keys,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
