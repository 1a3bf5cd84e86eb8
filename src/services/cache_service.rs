use crate::error::{Error, Result};
use chrono::Utc;
use redis::{aio::MultiplexedConnection, AsyncCommands};
use serde::{Deserialize, Serialize};

/// Every key this application owns lives under this prefix.
pub const CACHE_KEY_PREFIX: &str = "cinebase:";

const TEST_KEY: &str = "cinebase:test:cache";
const TEST_TTL_SECONDS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheTestPayload {
    pub message: String,
    pub timestamp: String,
    pub version: String,
    pub test_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheTestReport {
    pub key: String,
    pub test_data: CacheTestPayload,
    pub ttl_seconds: i64,
    pub size_bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheKeyInfo {
    pub key: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub version: Option<String>,
    pub uptime_seconds: Option<u64>,
    pub connected_clients: Option<u64>,
    pub used_memory_human: Option<String>,
    pub used_memory_peak_human: Option<String>,
    pub total_keys: u64,
    pub cinebase_keys_count: usize,
}

/// Diagnostic façade over Redis. Connections are scoped to one operation:
/// opened on entry, dropped on every return path.
#[derive(Clone)]
pub struct CacheService {
    redis_url: String,
}

impl CacheService {
    pub fn new(redis_url: String) -> Self {
        Self { redis_url }
    }

    async fn connect(&self) -> Result<MultiplexedConnection> {
        let client = redis::Client::open(self.redis_url.as_str())?;
        Ok(client.get_multiplexed_async_connection().await?)
    }

    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connect().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// Write a small diagnostic payload with a fixed TTL, read it straight
    /// back, and report what the store holds. A missing readback is its own
    /// failure, distinct from the store being unreachable.
    pub async fn test_roundtrip(&self, version: &str) -> Result<CacheTestReport> {
        let mut conn = self.connect().await?;

        let now = Utc::now();
        let payload = CacheTestPayload {
            message: "Hello from CineBase cache!".to_string(),
            timestamp: now.to_rfc3339(),
            version: version.to_string(),
            test_id: now.timestamp(),
        };
        let serialized = serde_json::to_string(&payload)
            .map_err(|e| Error::Internal(format!("Cache test payload serialization failed: {}", e)))?;
        conn.set_ex::<_, _, ()>(TEST_KEY, &serialized, TEST_TTL_SECONDS)
            .await?;

        let cached: Option<String> = conn.get(TEST_KEY).await?;
        let cached = cached.ok_or_else(|| {
            Error::CacheMiss(format!("Key {} missing right after write", TEST_KEY))
        })?;
        let ttl_seconds: i64 = conn.ttl(TEST_KEY).await?;
        let test_data: CacheTestPayload = serde_json::from_str(&cached)
            .map_err(|e| Error::Internal(format!("Cache test payload corrupted: {}", e)))?;

        Ok(CacheTestReport {
            key: TEST_KEY.to_string(),
            size_bytes: cached.len(),
            test_data,
            ttl_seconds,
        })
    }

    /// Store-level metadata plus the count of keys under our prefix. Reads
    /// only, mutates nothing.
    pub async fn stats(&self) -> Result<CacheStats> {
        let mut conn = self.connect().await?;

        let info: redis::InfoDict = redis::cmd("INFO").query_async(&mut conn).await?;
        let keys: Vec<String> = conn.keys(prefix_pattern()).await?;

        Ok(CacheStats {
            version: info.get("redis_version"),
            uptime_seconds: info
                .get::<String>("uptime_in_seconds")
                .and_then(|raw| raw.parse().ok()),
            connected_clients: info
                .get::<String>("connected_clients")
                .and_then(|raw| raw.parse().ok()),
            used_memory_human: info.get("used_memory_human"),
            used_memory_peak_human: info.get("used_memory_peak_human"),
            total_keys: info
                .get::<String>("db0")
                .as_deref()
                .and_then(parse_keyspace_keys)
                .unwrap_or(0),
            cinebase_keys_count: keys.len(),
        })
    }

    /// Every key under the prefix with its remaining TTL.
    pub async fn keys(&self) -> Result<Vec<CacheKeyInfo>> {
        let mut conn = self.connect().await?;

        let keys: Vec<String> = conn.keys(prefix_pattern()).await?;
        let mut infos = Vec::with_capacity(keys.len());
        for key in keys {
            let ttl_seconds: i64 = conn.ttl(&key).await?;
            infos.push(CacheKeyInfo { key, ttl_seconds });
        }
        Ok(infos)
    }

    /// Bulk-delete everything under the prefix. An empty namespace deletes
    /// zero keys and is still a success.
    pub async fn clear(&self) -> Result<u64> {
        let mut conn = self.connect().await?;

        let keys: Vec<String> = conn.keys(prefix_pattern()).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        let deleted: u64 = conn.del(keys).await?;
        Ok(deleted)
    }
}

fn prefix_pattern() -> String {
    format!("{}*", CACHE_KEY_PREFIX)
}

/// Pull the `keys=` count out of an INFO keyspace line like
/// `keys=42,expires=3,avg_ttl=0`.
fn parse_keyspace_keys(value: &str) -> Option<u64> {
    value
        .split(',')
        .find_map(|part| part.strip_prefix("keys="))
        .and_then(|count| count.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyspace_line_parses() {
        assert_eq!(parse_keyspace_keys("keys=42,expires=3,avg_ttl=0"), Some(42));
        assert_eq!(parse_keyspace_keys("expires=3"), None);
        assert_eq!(parse_keyspace_keys("keys=junk"), None);
        assert_eq!(parse_keyspace_keys(""), None);
    }

    #[test]
    fn diagnostic_key_is_namespaced() {
        assert!(TEST_KEY.starts_with(CACHE_KEY_PREFIX));
        assert_eq!(prefix_pattern(), "cinebase:*");
    }
}
