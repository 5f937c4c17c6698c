use crate::client::HelixClient;
use crate::error::Result;
use crate::query::{QueryField, QueryParams};
use crate::response::{Empty, Pagination, Response};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Webhook request header carrying the notification ID
pub const MESSAGE_ID_HEADER: &str = "Twitch-Eventsub-Message-Id";
/// Webhook request header carrying the notification timestamp
pub const MESSAGE_TIMESTAMP_HEADER: &str = "Twitch-Eventsub-Message-Timestamp";
/// Webhook request header carrying the notification signature
pub const MESSAGE_SIGNATURE_HEADER: &str = "Twitch-Eventsub-Message-Signature";

/// Verify the signature of an EventSub webhook notification.
///
/// The expected signature is the HMAC-SHA256 of `message_id`, `timestamp`
/// and the raw request body concatenated in that order, keyed with the
/// secret given at subscription time, and presented as `sha256=<hex>` in
/// the signature header. Comparison is constant-time.
///
/// This is a pure function with no dependency on the request pipeline;
/// extract the three header values with the `*_HEADER` constants above.
pub fn verify_signature(
    secret: &str,
    message_id: &str,
    timestamp: &str,
    body: &[u8],
    signature: &str,
) -> bool {
    let Some(hex_digest) = signature.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(expected) = hex::decode(hex_digest) else {
        return false;
    };

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message_id.as_bytes());
    mac.update(timestamp.as_bytes());
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Parameters for GET /eventsub/subscriptions. At most one filter may be
/// set per request.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionsParams {
    /// Filter by subscription status, e.g. "enabled"
    pub status: String,
    /// Filter by subscription type, e.g. "stream.online"
    pub subscription_type: String,
    /// Filter by the user ID in the subscription condition
    pub user_id: String,
    pub after: String,
}

impl QueryParams for SubscriptionsParams {
    fn fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::text("status", &self.status),
            QueryField::text("type", &self.subscription_type),
            QueryField::text("user_id", &self.user_id),
            QueryField::text("after", &self.after),
        ]
    }
}

/// Parameters for DELETE /eventsub/subscriptions.
#[derive(Debug, Clone, Default)]
pub struct DeleteSubscriptionParams {
    pub id: String,
}

impl QueryParams for DeleteSubscriptionParams {
    fn fields(&self) -> Vec<QueryField> {
        vec![QueryField::text("id", &self.id)]
    }
}

/// Condition narrowing which events a subscription fires for. Fields not
/// used by the subscription type are omitted from the JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcaster_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderator_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_broadcaster_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_broadcaster_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// How EventSub delivers notifications for a subscription.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionTransport {
    /// "webhook" or "websocket"
    pub method: String,
    /// Webhook callback URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
    /// Webhook signing secret; write-only, never echoed back by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// WebSocket session ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl SubscriptionTransport {
    /// Webhook transport with the given callback URL and signing secret
    pub fn webhook(callback: impl Into<String>, secret: impl Into<String>) -> Self {
        SubscriptionTransport {
            method: "webhook".to_string(),
            callback: Some(callback.into()),
            secret: Some(secret.into()),
            session_id: None,
        }
    }

    /// WebSocket transport for the given session
    pub fn websocket(session_id: impl Into<String>) -> Self {
        SubscriptionTransport {
            method: "websocket".to_string(),
            callback: None,
            secret: None,
            session_id: Some(session_id.into()),
        }
    }
}

/// JSON body of POST /eventsub/subscriptions.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSubscriptionBody {
    #[serde(rename = "type")]
    pub subscription_type: String,
    pub version: String,
    pub condition: SubscriptionCondition,
    pub transport: SubscriptionTransport,
}

/// One EventSub subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub status: String,
    #[serde(rename = "type")]
    pub subscription_type: String,
    pub version: String,
    pub condition: SubscriptionCondition,
    pub transport: SubscriptionTransport,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub cost: u64,
}

/// Payload of the subscription management endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ManySubscriptions {
    #[serde(rename = "data")]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_cost: u64,
    #[serde(default)]
    pub max_total_cost: u64,
    #[serde(default)]
    pub pagination: Pagination,
}

impl HelixClient {
    /// List EventSub subscriptions owned by the client ID.
    pub fn get_eventsub_subscriptions(
        &self,
        params: &SubscriptionsParams,
    ) -> Result<Response<ManySubscriptions>> {
        self.get("/eventsub/subscriptions", Some(params))
    }

    /// Create an EventSub subscription. Webhook subscriptions require an
    /// app access token; websocket subscriptions a user access token.
    pub fn create_eventsub_subscription(
        &self,
        body: &CreateSubscriptionBody,
    ) -> Result<Response<ManySubscriptions>> {
        self.post(
            "/eventsub/subscriptions",
            None::<&SubscriptionsParams>,
            Some(body),
        )
    }

    /// Delete an EventSub subscription. Success is a 204 with no body.
    pub fn delete_eventsub_subscription(
        &self,
        params: &DeleteSubscriptionParams,
    ) -> Result<Response<Empty>> {
        self.delete("/eventsub/subscriptions", Some(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;

    fn sign(secret: &str, id: &str, timestamp: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(id.as_bytes());
        mac.update(timestamp.as_bytes());
        mac.update(body);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    const SECRET: &str = "s3cre7";
    const MESSAGE_ID: &str = "e76c6bd4-55c9-4987-8304-da1588d8988b";
    const TIMESTAMP: &str = "2022-06-15T12:33:26Z";
    const BODY: &[u8] = br#"{"subscription":{"id":"f1c2a387-161a-49f9-a165-0f21d7a4e1c4"}}"#;

    #[test]
    fn test_matching_signature_verifies() {
        let signature = sign(SECRET, MESSAGE_ID, TIMESTAMP, BODY);
        assert!(verify_signature(
            SECRET, MESSAGE_ID, TIMESTAMP, BODY, &signature
        ));
    }

    #[test]
    fn test_mutated_body_fails_verification() {
        let signature = sign(SECRET, MESSAGE_ID, TIMESTAMP, BODY);
        let mut tampered = BODY.to_vec();
        tampered[0] ^= 1;
        assert!(!verify_signature(
            SECRET, MESSAGE_ID, TIMESTAMP, &tampered, &signature
        ));
    }

    #[test]
    fn test_mutated_id_or_timestamp_fails_verification() {
        let signature = sign(SECRET, MESSAGE_ID, TIMESTAMP, BODY);
        assert!(!verify_signature(
            SECRET,
            "e76c6bd4-55c9-4987-8304-da1588d8988c",
            TIMESTAMP,
            BODY,
            &signature
        ));
        assert!(!verify_signature(
            SECRET,
            MESSAGE_ID,
            "2022-06-15T12:33:27Z",
            BODY,
            &signature
        ));
    }

    #[test]
    fn test_wrong_secret_fails_verification() {
        let signature = sign(SECRET, MESSAGE_ID, TIMESTAMP, BODY);
        assert!(!verify_signature(
            "other", MESSAGE_ID, TIMESTAMP, BODY, &signature
        ));
    }

    #[test]
    fn test_malformed_signature_header_is_rejected() {
        assert!(!verify_signature(
            SECRET, MESSAGE_ID, TIMESTAMP, BODY, "md5=abcdef"
        ));
        assert!(!verify_signature(
            SECRET, MESSAGE_ID, TIMESTAMP, BODY, "sha256=not-hex"
        ));
    }

    #[test]
    fn test_subscriptions_params_rename_type_key() {
        let params = SubscriptionsParams {
            subscription_type: "stream.online".to_string(),
            ..Default::default()
        };
        assert_eq!(query::encode(Some(&params)), "type=stream.online");
    }

    #[test]
    fn test_create_body_serializes_webhook_transport() {
        let body = CreateSubscriptionBody {
            subscription_type: "stream.online".to_string(),
            version: "1".to_string(),
            condition: SubscriptionCondition {
                broadcaster_user_id: Some("1234".to_string()),
                ..Default::default()
            },
            transport: SubscriptionTransport::webhook("https://example.com/cb", "s3cre7"),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["type"], "stream.online");
        assert_eq!(json["condition"]["broadcaster_user_id"], "1234");
        assert_eq!(json["transport"]["method"], "webhook");
        assert_eq!(json["transport"].get("session_id"), None);
    }

    #[test]
    fn test_subscription_payload_deserializes() {
        let body = r#"{
            "data": [{
                "id": "26b1c993-bfcf-44d9-b876-379dacafe75a",
                "status": "enabled",
                "type": "stream.online",
                "version": "1",
                "condition": {"broadcaster_user_id": "1234"},
                "created_at": "2020-11-10T20:08:33Z",
                "transport": {"method": "webhook", "callback": "https://example.com/cb"},
                "cost": 1
            }],
            "total": 1,
            "total_cost": 1,
            "max_total_cost": 10000,
            "pagination": {}
        }"#;

        let payload: ManySubscriptions = serde_json::from_str(body).unwrap();
        assert_eq!(payload.total_cost, 1);
        assert_eq!(payload.subscriptions[0].subscription_type, "stream.online");
        assert!(payload.subscriptions[0].transport.secret.is_none());
        assert!(payload.pagination.cursor.is_none());
    }
}
