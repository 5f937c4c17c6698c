use crate::client::HelixClient;
use crate::error::Result;
use crate::query::{QueryField, QueryParams};
use crate::response::Response;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Parameters for GET /users. Up to 100 IDs and logins may be combined.
#[derive(Debug, Clone, Default)]
pub struct UsersParams {
    /// User IDs to look up
    pub ids: Vec<String>,
    /// Login names to look up
    pub logins: Vec<String>,
}

impl QueryParams for UsersParams {
    fn fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::repeated("id", &self.ids),
            QueryField::repeated("login", &self.logins),
        ]
    }
}

/// User record from GET /users.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub login: String,
    pub display_name: String,
    #[serde(rename = "type", default)]
    pub user_type: String,
    #[serde(default)]
    pub broadcaster_type: String,
    #[serde(default)]
    pub description: String,
    pub profile_image_url: String,
    #[serde(default)]
    pub offline_image_url: String,
    /// Only present when the token carries the user:read:email scope
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload of GET /users.
#[derive(Debug, Clone, Deserialize)]
pub struct ManyUsers {
    #[serde(rename = "data")]
    pub users: Vec<User>,
}

impl HelixClient {
    /// Look up users by ID and/or login name. With no parameters the API
    /// returns the user owning the access token.
    pub fn get_users(&self, params: &UsersParams) -> Result<Response<ManyUsers>> {
        self.get("/users", Some(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;

    #[test]
    fn test_users_params_mix_ids_and_logins() {
        let params = UsersParams {
            ids: vec!["141981764".to_string()],
            logins: vec!["twitchdev".to_string()],
        };
        assert_eq!(query::encode(Some(&params)), "id=141981764&login=twitchdev");
    }

    #[test]
    fn test_user_deserializes_with_sparse_fields() {
        let body = r#"{
            "data": [{
                "id": "141981764",
                "login": "twitchdev",
                "display_name": "TwitchDev",
                "type": "",
                "broadcaster_type": "partner",
                "profile_image_url": "https://example.com/profile.png",
                "created_at": "2016-12-14T20:32:28Z"
            }]
        }"#;

        let payload: ManyUsers = serde_json::from_str(body).unwrap();
        let user = &payload.users[0];
        assert_eq!(user.login, "twitchdev");
        assert_eq!(user.broadcaster_type, "partner");
        assert!(user.email.is_none());
        assert_eq!(user.created_at.timestamp(), 1481747548);
    }
}
