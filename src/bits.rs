use crate::client::HelixClient;
use crate::error::Result;
use crate::query::{QueryField, QueryParams};
use crate::response::Response;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Parameters for GET /bits/leaderboard.
#[derive(Debug, Clone, Default)]
pub struct BitsLeaderboardParams {
    /// Number of entries to return, 1-100
    pub count: u64,
    /// Aggregation window: "day", "week", "month", "year" or "all"
    pub period: String,
    /// Anchor for the aggregation window; ignored when period is "all"
    pub started_at: Option<DateTime<Utc>>,
    /// Restrict results to a single cheering user
    pub user_id: String,
}

impl QueryParams for BitsLeaderboardParams {
    fn fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::int("count", self.count).with_default("10"),
            QueryField::text("period", &self.period).with_default("all"),
            QueryField::time("started_at", self.started_at),
            QueryField::text("user_id", &self.user_id),
        ]
    }
}

/// One leaderboard entry.
#[derive(Debug, Clone, Deserialize)]
pub struct BitsLeaderboardEntry {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub rank: u32,
    pub score: u64,
}

/// The window the leaderboard was aggregated over.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
}

/// Payload of GET /bits/leaderboard.
#[derive(Debug, Clone, Deserialize)]
pub struct BitsLeaderboard {
    #[serde(rename = "data")]
    pub entries: Vec<BitsLeaderboardEntry>,
    #[serde(default)]
    pub date_range: DateRange,
    /// Number of entries in the leaderboard, which may be smaller than the
    /// requested count
    #[serde(default)]
    pub total: u64,
}

impl HelixClient {
    /// Get the bits leaderboard for the channel owning the user access
    /// token. Requires the bits:read scope.
    pub fn get_bits_leaderboard(
        &self,
        params: &BitsLeaderboardParams,
    ) -> Result<Response<BitsLeaderboard>> {
        self.get("/bits/leaderboard", Some(params))
    }
}
