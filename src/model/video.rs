use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const EMBED_BASE_URL: &str = "https://www.youtube.com/embed";

/// A cooking video found for a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Provider video identifier
    pub id: String,
    pub title: String,
    /// Name of the publishing channel
    pub channel: String,
    pub published_at: DateTime<Utc>,
}

impl Video {
    /// URL suitable for an embedded player.
    pub fn embed_url(&self) -> String {
        format!("{}/{}", EMBED_BASE_URL, self.id)
    }

    /// `"{channel} • {date}"` caption shown under the player.
    pub fn caption(&self) -> String {
        format!("{} • {}", self.channel, self.published_at.format("%Y-%m-%d"))
    }
}
