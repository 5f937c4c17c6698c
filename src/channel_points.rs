use crate::client::HelixClient;
use crate::error::Result;
use crate::query::{QueryField, QueryParams};
use crate::response::{Empty, Response};
use serde::{Deserialize, Serialize};

/// Parameters for GET /channel_points/custom_rewards.
#[derive(Debug, Clone, Default)]
pub struct CustomRewardsParams {
    pub broadcaster_id: String,
    /// Restrict to specific reward IDs (up to 50)
    pub ids: Vec<String>,
    /// Only rewards this token's client ID may manage
    pub only_manageable_rewards: bool,
}

impl QueryParams for CustomRewardsParams {
    fn fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::text("broadcaster_id", &self.broadcaster_id),
            QueryField::repeated("id", &self.ids),
            QueryField::flag("only_manageable_rewards", self.only_manageable_rewards),
        ]
    }
}

/// Identifies one reward within a channel, for update and delete calls.
#[derive(Debug, Clone, Default)]
pub struct RewardParams {
    pub broadcaster_id: String,
    pub id: String,
}

impl QueryParams for RewardParams {
    fn fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::text("broadcaster_id", &self.broadcaster_id),
            QueryField::text("id", &self.id),
        ]
    }
}

/// Nested setting for max redemptions per stream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaxPerStreamSetting {
    pub is_enabled: bool,
    pub max_per_stream: u64,
}

/// Nested setting for max redemptions per user per stream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaxPerUserPerStreamSetting {
    pub is_enabled: bool,
    pub max_per_user_per_stream: u64,
}

/// Nested setting for the redemption cooldown.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalCooldownSetting {
    pub is_enabled: bool,
    pub global_cooldown_seconds: u64,
}

/// Custom channel point reward.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomReward {
    pub id: String,
    pub broadcaster_id: String,
    pub broadcaster_login: String,
    pub broadcaster_name: String,
    pub title: String,
    pub cost: u64,
    #[serde(default)]
    pub prompt: String,
    pub is_enabled: bool,
    #[serde(default)]
    pub is_paused: bool,
    #[serde(default)]
    pub is_in_stock: bool,
    #[serde(default)]
    pub is_user_input_required: bool,
    #[serde(default)]
    pub background_color: String,
    #[serde(default)]
    pub max_per_stream_setting: MaxPerStreamSetting,
    #[serde(default)]
    pub max_per_user_per_stream_setting: MaxPerUserPerStreamSetting,
    #[serde(default)]
    pub global_cooldown_setting: GlobalCooldownSetting,
    #[serde(default)]
    pub should_redemptions_skip_request_queue: bool,
    #[serde(default)]
    pub redemptions_redeemed_current_stream: Option<u64>,
}

/// Payload of the custom reward endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ManyCustomRewards {
    #[serde(rename = "data")]
    pub rewards: Vec<CustomReward>,
}

/// JSON body of POST /channel_points/custom_rewards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateRewardBody {
    pub title: String,
    pub cost: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_user_input_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_max_per_stream_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_per_stream: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_global_cooldown_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_cooldown_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_redemptions_skip_request_queue: Option<bool>,
}

/// JSON body of PATCH /channel_points/custom_rewards. Only the fields set
/// here change; everything else keeps its current value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRewardBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl HelixClient {
    /// List a channel's custom rewards.
    pub fn get_custom_rewards(
        &self,
        params: &CustomRewardsParams,
    ) -> Result<Response<ManyCustomRewards>> {
        self.get("/channel_points/custom_rewards", Some(params))
    }

    /// Create a custom reward. Requires channel:manage:redemptions.
    pub fn create_custom_reward(
        &self,
        broadcaster_id: &str,
        body: &CreateRewardBody,
    ) -> Result<Response<ManyCustomRewards>> {
        let params = CustomRewardsParams {
            broadcaster_id: broadcaster_id.to_string(),
            ..Default::default()
        };
        self.post("/channel_points/custom_rewards", Some(&params), Some(body))
    }

    /// Update fields of an existing custom reward.
    pub fn update_custom_reward(
        &self,
        params: &RewardParams,
        body: &UpdateRewardBody,
    ) -> Result<Response<ManyCustomRewards>> {
        self.patch("/channel_points/custom_rewards", Some(params), Some(body))
    }

    /// Delete a custom reward. Success is a 204 with no body.
    pub fn delete_custom_reward(&self, params: &RewardParams) -> Result<Response<Empty>> {
        self.delete("/channel_points/custom_rewards", Some(params))
    }
}
