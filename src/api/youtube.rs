use super::{ApiError, VideoApi};
use crate::model::Video;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const SERVICE: &str = "YouTube";

/// Connection settings for the YouTube Data API.
#[derive(Debug, Clone)]
pub struct YoutubeConfig {
    pub api_key: String,
    pub base_url: String,
}

impl YoutubeConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.googleapis.com/youtube/v3";

    pub fn new(api_key: impl Into<String>) -> Self {
        YoutubeConfig {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    channel_title: String,
    published_at: DateTime<Utc>,
}

impl SearchResponse {
    /// Keeps only items that resolve to a playable video.
    fn into_videos(self) -> Vec<Video> {
        self.items
            .into_iter()
            .filter_map(|item| {
                Some(Video {
                    id: item.id.video_id?,
                    title: item.snippet.title,
                    channel: item.snippet.channel_title,
                    published_at: item.snippet.published_at,
                })
            })
            .collect()
    }
}

/// HTTP client for the YouTube search endpoint.
pub struct YoutubeClient {
    config: YoutubeConfig,
    client: Client,
}

impl YoutubeClient {
    pub fn new(config: YoutubeConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: YoutubeConfig, client: Client) -> Self {
        YoutubeClient { config, client }
    }
}

#[async_trait]
impl VideoApi for YoutubeClient {
    async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<Video>, ApiError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let max_results = max_results.to_string();
        debug!(query, "Searching videos");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("q", query),
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await
            .map_err(|source| ApiError::Network {
                service: SERVICE,
                source,
            })?;

        ApiError::check_status(SERVICE, response.status().as_u16())?;

        let body: SearchResponse = response.json().await.map_err(|e| ApiError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })?;
        Ok(body.into_videos())
    }
}
