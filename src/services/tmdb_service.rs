use crate::error::{Error, Result};
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Timeout for the lightweight reachability probe.
const PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct TmdbService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbService {
    pub fn new(api_key: String, base_url: String, client: Client) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Fetch the raw metadata record for a movie. The response is kept as an
    /// opaque JSON blob and stored as the movie's snapshot.
    pub async fn fetch_movie(&self, tmdb_id: i32) -> Result<JsonValue> {
        if !self.is_configured() {
            return Err(Error::BadRequest("TMDB API key not configured".to_string()));
        }

        let url = format!("{}/movie/{}", self.base_url, tmdb_id);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("TMDB movie {} not found", tmdb_id)));
        }

        let snapshot = response.error_for_status()?.json::<JsonValue>().await?;
        Ok(snapshot)
    }

    /// Cheap reachability check against the configuration endpoint.
    pub async fn ping(&self) -> Result<()> {
        let url = format!("{}/configuration", self.base_url);
        self.client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .timeout(PING_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_only_with_nonempty_key() {
        let client = Client::new();
        let unset = TmdbService::new(String::new(), "https://example.org".into(), client.clone());
        assert!(!unset.is_configured());

        let set = TmdbService::new("k".into(), "https://example.org".into(), client);
        assert!(set.is_configured());
    }
}
