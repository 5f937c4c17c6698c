use crate::client::HelixClient;
use crate::error::Result;
use crate::query::{QueryField, QueryParams};
use crate::response::{Pagination, Response};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Parameters for GET /clips. Exactly one of `broadcaster_id`, `game_id`
/// or `ids` is required by the API.
#[derive(Debug, Clone, Default)]
pub struct ClipsParams {
    pub broadcaster_id: String,
    pub game_id: String,
    /// Clip IDs to look up (up to 100)
    pub ids: Vec<String>,
    /// Only clips created at or after this instant
    pub started_at: Option<DateTime<Utc>>,
    /// Only clips created at or before this instant
    pub ended_at: Option<DateTime<Utc>>,
    /// Page size, 1-100
    pub first: u64,
    pub after: String,
    pub before: String,
    /// Only clips featured by the broadcaster
    pub is_featured: bool,
}

impl QueryParams for ClipsParams {
    fn fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::text("broadcaster_id", &self.broadcaster_id),
            QueryField::text("game_id", &self.game_id),
            QueryField::repeated("id", &self.ids),
            QueryField::time("started_at", self.started_at),
            QueryField::time("ended_at", self.ended_at),
            QueryField::int("first", self.first).with_default("20"),
            QueryField::text("after", &self.after),
            QueryField::text("before", &self.before),
            QueryField::flag("is_featured", self.is_featured),
        ]
    }
}

/// Parameters for POST /clips.
#[derive(Debug, Clone, Default)]
pub struct CreateClipParams {
    pub broadcaster_id: String,
    /// Add a short delay so the clip misses stream-delay spoilers
    pub has_delay: bool,
}

impl QueryParams for CreateClipParams {
    fn fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::text("broadcaster_id", &self.broadcaster_id),
            QueryField::flag("has_delay", self.has_delay),
        ]
    }
}

/// Clip record from GET /clips.
#[derive(Debug, Clone, Deserialize)]
pub struct Clip {
    pub id: String,
    pub url: String,
    pub embed_url: String,
    pub broadcaster_id: String,
    pub broadcaster_name: String,
    pub creator_id: String,
    pub creator_name: String,
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub language: String,
    pub title: String,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnail_url: String,
    pub duration: f64,
    /// Offset into the source VOD; null when the VOD is gone
    #[serde(default)]
    pub vod_offset: Option<i64>,
}

/// Payload of GET /clips.
#[derive(Debug, Clone, Deserialize)]
pub struct ManyClips {
    #[serde(rename = "data")]
    pub clips: Vec<Clip>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// One created clip: its ID and the URL where it can be edited.
#[derive(Debug, Clone, Deserialize)]
pub struct ClipEditUrl {
    pub id: String,
    pub edit_url: String,
}

/// Payload of POST /clips.
#[derive(Debug, Clone, Deserialize)]
pub struct ManyClipEditUrls {
    #[serde(rename = "data")]
    pub clips: Vec<ClipEditUrl>,
}

impl HelixClient {
    /// List clips for a broadcaster, game, or explicit clip IDs.
    pub fn get_clips(&self, params: &ClipsParams) -> Result<Response<ManyClips>> {
        self.get("/clips", Some(params))
    }

    /// Capture a clip from the broadcaster's live stream. Clip creation is
    /// asynchronous on the API side; the returned edit URL is valid once
    /// processing finishes.
    pub fn create_clip(&self, params: &CreateClipParams) -> Result<Response<ManyClipEditUrls>> {
        self.post("/clips", Some(params), None::<&serde_json::Value>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;
    use chrono::TimeZone;

    #[test]
    fn test_clips_params_default_page_size() {
        let params = ClipsParams {
            broadcaster_id: "1234".to_string(),
            ..Default::default()
        };
        assert_eq!(query::encode(Some(&params)), "broadcaster_id=1234&first=20");
    }

    #[test]
    fn test_clips_params_time_window() {
        let params = ClipsParams {
            game_id: "33103".to_string(),
            started_at: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            first: 50,
            ..Default::default()
        };
        assert_eq!(
            query::encode(Some(&params)),
            "game_id=33103&started_at=2024-06-01T00%3A00%3A00Z&first=50"
        );
    }

    #[test]
    fn test_create_clip_params_omit_false_delay() {
        let params = CreateClipParams {
            broadcaster_id: "1234".to_string(),
            has_delay: false,
        };
        assert_eq!(query::encode(Some(&params)), "broadcaster_id=1234");
    }

    #[test]
    fn test_clip_deserializes_null_vod_offset() {
        let body = r#"{
            "data": [{
                "id": "RandomClip1",
                "url": "https://clips.twitch.tv/RandomClip1",
                "embed_url": "https://clips.twitch.tv/embed?clip=RandomClip1",
                "broadcaster_id": "1234",
                "broadcaster_name": "JJ",
                "creator_id": "123456",
                "creator_name": "MrMarshall",
                "title": "random1",
                "view_count": 10,
                "created_at": "2017-11-30T22:34:18Z",
                "duration": 12.9,
                "vod_offset": null
            }]
        }"#;

        let payload: ManyClips = serde_json::from_str(body).unwrap();
        assert_eq!(payload.clips[0].duration, 12.9);
        assert!(payload.clips[0].vod_offset.is_none());
        assert!(payload.pagination.cursor.is_none());
    }
}
