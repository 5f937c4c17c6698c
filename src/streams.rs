use crate::client::HelixClient;
use crate::error::Result;
use crate::query::{QueryField, QueryParams};
use crate::response::{Pagination, Response};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Parameters for GET /streams.
#[derive(Debug, Clone, Default)]
pub struct StreamsParams {
    /// Filter by broadcaster user IDs (up to 100)
    pub user_ids: Vec<String>,
    /// Filter by broadcaster login names (up to 100)
    pub user_logins: Vec<String>,
    /// Filter by game IDs (up to 100)
    pub game_ids: Vec<String>,
    /// Filter by broadcast languages (ISO 639-1, up to 100)
    pub languages: Vec<String>,
    /// Stream type filter: "all" or "live"
    pub stream_type: String,
    /// Page size, 1-100
    pub first: u64,
    /// Forward pagination cursor from a previous response
    pub after: String,
    /// Backward pagination cursor from a previous response
    pub before: String,
}

impl QueryParams for StreamsParams {
    fn fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::repeated("user_id", &self.user_ids),
            QueryField::repeated("user_login", &self.user_logins),
            QueryField::repeated("game_id", &self.game_ids),
            QueryField::repeated("language", &self.languages),
            QueryField::text("type", &self.stream_type).with_default("all"),
            QueryField::int("first", self.first).with_default("20"),
            QueryField::text("after", &self.after),
            QueryField::text("before", &self.before),
        ]
    }
}

/// Live stream record from GET /streams.
#[derive(Debug, Clone, Deserialize)]
pub struct Stream {
    pub id: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(rename = "type")]
    pub stream_type: String,
    pub title: String,
    pub viewer_count: u64,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub is_mature: bool,
}

/// Payload of GET /streams.
#[derive(Debug, Clone, Deserialize)]
pub struct ManyStreams {
    #[serde(rename = "data")]
    pub streams: Vec<Stream>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl HelixClient {
    /// List streams, most-viewed first. Thread the returned cursor into
    /// [`StreamsParams::after`] to fetch the next page.
    pub fn get_streams(&self, params: &StreamsParams) -> Result<Response<ManyStreams>> {
        self.get("/streams", Some(params))
    }
}
