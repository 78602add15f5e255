//! BeatSaver API client.
//!
//! Uses the v1 map endpoints:
//! - `GET {base}/maps/latest/0` - newest maps, newest first
//! - `GET {base}/maps/detail/{key}` - a single map by hex key

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use super::types::{CatalogKey, Difficulties, Item, Metadata, Stats};
use super::{Catalog, CatalogError};

/// BeatSaver client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatSaverConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Minimum spacing between requests in milliseconds (0 disables).
    #[serde(default = "default_rate_limit")]
    pub rate_limit_ms: u64,
}

fn default_base_url() -> String {
    "https://beatsaver.com/api".to_string()
}

fn default_user_agent() -> String {
    format!("RandomSong/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> u64 {
    30
}

fn default_rate_limit() -> u64 {
    250
}

impl Default for BeatSaverConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            rate_limit_ms: default_rate_limit(),
        }
    }
}

/// BeatSaver API client.
pub struct BeatSaverClient {
    client: Client,
    base_url: String,
    last_request: Arc<Mutex<Option<Instant>>>,
    rate_limit: Duration,
}

impl BeatSaverClient {
    /// Create a new BeatSaver client.
    pub fn new(config: BeatSaverConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            last_request: Arc::new(Mutex::new(None)),
            rate_limit: Duration::from_millis(config.rate_limit_ms),
        })
    }

    /// Wait for rate limit if needed.
    async fn wait_for_rate_limit(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.rate_limit {
                let wait_time = self.rate_limit - elapsed;
                debug!("BeatSaver rate limit: waiting {:?}", wait_time);
                sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        subject: &str,
    ) -> Result<T, CatalogError> {
        self.wait_for_rate_limit().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("BeatSaver GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == 429 {
            warn!("BeatSaver rate limit exceeded");
            return Err(CatalogError::RateLimitExceeded);
        }
        if status == 404 {
            return Err(CatalogError::NotFound(subject.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse {} response: {}", subject, e))
        })
    }
}

#[async_trait]
impl Catalog for BeatSaverClient {
    async fn fetch_latest(&self) -> Result<Item, CatalogError> {
        let page: BsPage = self.get_json("/maps/latest/0", "latest maps").await?;
        let newest = page.docs.into_iter().next().ok_or(CatalogError::EmptyCatalog)?;
        newest.try_into()
    }

    async fn fetch_by_key(&self, key: &CatalogKey) -> Result<Item, CatalogError> {
        let path = format!("/maps/detail/{}", key.to_hex());
        let map: BsMap = self.get_json(&path, &key.to_hex()).await?;
        map.try_into()
    }

    fn name(&self) -> &'static str {
        "beatsaver"
    }
}

// ============================================================================
// BeatSaver API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct BsPage {
    #[serde(default)]
    docs: Vec<BsMap>,
}

#[derive(Debug, Deserialize)]
struct BsMap {
    key: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    hash: Option<String>,
    metadata: BsMetadata,
    #[serde(default)]
    stats: BsStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BsMetadata {
    #[serde(default)]
    difficulties: BsDifficulties,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    song_name: String,
    #[serde(default)]
    song_sub_name: String,
    #[serde(default)]
    song_author_name: String,
    #[serde(default)]
    level_author_name: String,
    #[serde(default)]
    bpm: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BsDifficulties {
    #[serde(default)]
    easy: bool,
    #[serde(default)]
    normal: bool,
    #[serde(default)]
    hard: bool,
    #[serde(default)]
    expert: bool,
    #[serde(default)]
    expert_plus: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BsStats {
    #[serde(default)]
    downloads: u64,
    #[serde(default)]
    plays: u64,
    #[serde(default)]
    up_votes: u64,
    #[serde(default)]
    down_votes: u64,
    #[serde(default)]
    rating: f64,
}

impl TryFrom<BsMap> for Item {
    type Error = CatalogError;

    fn try_from(bs: BsMap) -> Result<Self, Self::Error> {
        let key = CatalogKey::from_hex(&bs.key)?;
        let meta = bs.metadata;

        Ok(Item {
            // The key doubles as the map's id; custom level folders are named after it.
            id: key.to_hex(),
            key,
            name: bs.name,
            hash: bs.hash.map(|h| h.to_lowercase()),
            metadata: Metadata {
                song_name: meta.song_name,
                song_sub_name: meta.song_sub_name,
                song_author_name: meta.song_author_name,
                level_author_name: meta.level_author_name,
                bpm: meta.bpm,
                duration: meta.duration.max(0.0),
                difficulties: Difficulties {
                    easy: meta.difficulties.easy,
                    normal: meta.difficulties.normal,
                    hard: meta.difficulties.hard,
                    expert: meta.difficulties.expert,
                    expert_plus: meta.difficulties.expert_plus,
                },
            },
            stats: Stats {
                rating: bs.stats.rating,
                downloads: bs.stats.downloads,
                plays: bs.stats.plays,
                up_votes: bs.stats.up_votes,
                down_votes: bs.stats.down_votes,
            },
        })
    }
}
