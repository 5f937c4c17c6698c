use crate::client::HelixClient;
use crate::error::Result;
use crate::query::{QueryField, QueryParams};
use crate::response::{Empty, Pagination, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameters for GET /moderation/banned.
#[derive(Debug, Clone, Default)]
pub struct BannedUsersParams {
    pub broadcaster_id: String,
    /// Restrict to specific banned users (up to 100)
    pub user_ids: Vec<String>,
    /// Page size, 1-100
    pub first: u64,
    pub after: String,
    pub before: String,
}

impl QueryParams for BannedUsersParams {
    fn fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::text("broadcaster_id", &self.broadcaster_id),
            QueryField::repeated("user_id", &self.user_ids),
            QueryField::int("first", self.first).with_default("20"),
            QueryField::text("after", &self.after),
            QueryField::text("before", &self.before),
        ]
    }
}

/// One banned or timed-out user.
#[derive(Debug, Clone, Deserialize)]
pub struct BannedUser {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    /// End of a timeout; null for a permanent ban
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reason: String,
    pub moderator_id: String,
    pub moderator_login: String,
    pub moderator_name: String,
}

/// Payload of GET /moderation/banned.
#[derive(Debug, Clone, Deserialize)]
pub struct ManyBannedUsers {
    #[serde(rename = "data")]
    pub banned: Vec<BannedUser>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Identifies the channel and acting moderator for ban operations.
#[derive(Debug, Clone, Default)]
pub struct BanScopeParams {
    pub broadcaster_id: String,
    pub moderator_id: String,
}

impl QueryParams for BanScopeParams {
    fn fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::text("broadcaster_id", &self.broadcaster_id),
            QueryField::text("moderator_id", &self.moderator_id),
        ]
    }
}

/// JSON body of POST /moderation/bans.
#[derive(Debug, Clone, Serialize)]
pub struct BanUserBody {
    pub data: BanUserOptions,
}

/// The user to ban and how.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BanUserOptions {
    pub user_id: String,
    /// Timeout length in seconds; omit for a permanent ban
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Ban record returned by POST /moderation/bans.
#[derive(Debug, Clone, Deserialize)]
pub struct Ban {
    pub broadcaster_id: String,
    pub moderator_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

/// Payload of POST /moderation/bans.
#[derive(Debug, Clone, Deserialize)]
pub struct ManyBans {
    #[serde(rename = "data")]
    pub bans: Vec<Ban>,
}

/// Parameters for DELETE /moderation/bans.
#[derive(Debug, Clone, Default)]
pub struct UnbanUserParams {
    pub broadcaster_id: String,
    pub moderator_id: String,
    pub user_id: String,
}

impl QueryParams for UnbanUserParams {
    fn fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::text("broadcaster_id", &self.broadcaster_id),
            QueryField::text("moderator_id", &self.moderator_id),
            QueryField::text("user_id", &self.user_id),
        ]
    }
}

impl HelixClient {
    /// List users banned or timed out in a channel.
    pub fn get_banned_users(
        &self,
        params: &BannedUsersParams,
    ) -> Result<Response<ManyBannedUsers>> {
        self.get("/moderation/banned", Some(params))
    }

    /// Ban a user, or time them out when a duration is given.
    pub fn ban_user(
        &self,
        params: &BanScopeParams,
        body: &BanUserBody,
    ) -> Result<Response<ManyBans>> {
        self.post("/moderation/bans", Some(params), Some(body))
    }

    /// Lift a ban or timeout. Success is a 204 with no body.
    pub fn unban_user(&self, params: &UnbanUserParams) -> Result<Response<Empty>> {
        self.delete("/moderation/bans", Some(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;

    #[test]
    fn test_banned_users_params_defaults() {
        let params = BannedUsersParams {
            broadcaster_id: "198704263".to_string(),
            ..Default::default()
        };
        assert_eq!(
            query::encode(Some(&params)),
            "broadcaster_id=198704263&first=20"
        );
    }

    #[test]
    fn test_ban_body_omits_absent_duration() {
        let body = BanUserBody {
            data: BanUserOptions {
                user_id: "9876".to_string(),
                duration: None,
                reason: Some("no reason".to_string()),
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"data":{"user_id":"9876","reason":"no reason"}}"#
        );
    }

    #[test]
    fn test_ban_body_includes_timeout_duration() {
        let body = BanUserBody {
            data: BanUserOptions {
                user_id: "9876".to_string(),
                duration: Some(300),
                reason: None,
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"data":{"user_id":"9876","duration":300}}"#);
    }

    #[test]
    fn test_banned_user_permanent_ban_has_no_expiry() {
        let body = r#"{
            "data": [{
                "user_id": "423374343",
                "user_login": "glowillig",
                "user_name": "glowillig",
                "expires_at": null,
                "created_at": "2022-03-15T02:00:28Z",
                "reason": "spam",
                "moderator_id": "141981764",
                "moderator_login": "twitchdev",
                "moderator_name": "TwitchDev"
            }]
        }"#;

        let payload: ManyBannedUsers = serde_json::from_str(body).unwrap();
        assert!(payload.banned[0].expires_at.is_none());
        assert_eq!(payload.banned[0].reason, "spam");
    }
}
