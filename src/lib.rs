//! # twitch-helix - Typed Twitch Helix API client
//!
//! A Rust client for the Twitch Helix REST API. Every endpoint wrapper is a
//! thin typed method over one shared pipeline: a declarative query encoder,
//! a request builder attaching uniform auth headers, a dispatcher with an
//! injected transport and rate-limit policy, and a response decoder that
//! splits success payloads from structured error envelopes.
//!
//! ## Features
//!
//! - Typed parameter and payload structs for each endpoint
//! - Declarative query encoding with per-field defaults and repeated keys
//! - Pluggable transport for test doubles and custom HTTP stacks
//! - Caller-supplied rate-limit policy driving 429 retries
//! - EventSub webhook signature verification
//!
//! ## Basic Usage
//!
//! ```no_run
//! use twitch_helix::{HelixClient, StreamsParams};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HelixClient::new("my-client-id")
//!         .with_user_access_token("my-access-token");
//!
//!     let resp = client.get_streams(&StreamsParams {
//!         user_logins: vec!["twitchdev".to_string()],
//!         ..Default::default()
//!     })?;
//!
//!     if resp.has_error() {
//!         eprintln!("API error: {}", resp.common.error_message);
//!         return Ok(());
//!     }
//!
//!     for stream in resp.data.map(|d| d.streams).unwrap_or_default() {
//!         println!("{} - {} viewers", stream.user_name, stream.viewer_count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Rate limiting
//!
//! The library imposes no retry behavior of its own. Install a policy to
//! wait out the bucket; the dispatcher re-invokes it before every send and
//! after every 429:
//!
//! ```no_run
//! use std::sync::Arc;
//! use twitch_helix::HelixClient;
//!
//! let client = HelixClient::new("my-client-id").with_rate_limit_policy(Arc::new(|last| {
//!     if last.status_code == 429 {
//!         // sleep until last.rate_limit.reset, then allow the resend
//!     }
//!     Ok(())
//! }));
//! ```
//!
//! ## Errors
//!
//! Calls return a hard [`HelixError`] only for transport and decode
//! failures. A 4xx from the API is a normal result whose envelope carries
//! the error triple; check [`Response::has_error`] as well.

pub mod bits;
pub mod channel_points;
pub mod client;
pub mod clips;
pub mod error;
pub mod eventsub;
pub mod moderation;
pub mod query;
mod request;
pub mod response;
pub mod streams;
pub mod transport;
pub mod users;

// Re-export main types for convenience
pub use bits::{BitsLeaderboard, BitsLeaderboardEntry, BitsLeaderboardParams};
pub use channel_points::{
    CreateRewardBody, CustomReward, CustomRewardsParams, ManyCustomRewards, RewardParams,
    UpdateRewardBody,
};
pub use client::{HelixClient, Options, RateLimitPolicy, DEFAULT_API_BASE_URL};
pub use clips::{Clip, ClipsParams, CreateClipParams, ManyClips};
pub use error::{HelixError, Result};
pub use eventsub::{
    verify_signature, CreateSubscriptionBody, DeleteSubscriptionParams, ManySubscriptions,
    Subscription, SubscriptionCondition, SubscriptionTransport, SubscriptionsParams,
};
pub use moderation::{
    Ban, BanScopeParams, BanUserBody, BanUserOptions, BannedUser, BannedUsersParams, ManyBans,
    ManyBannedUsers, UnbanUserParams,
};
pub use query::{QueryField, QueryParams};
pub use response::{Empty, Pagination, RateLimit, Response, ResponseCommon};
pub use streams::{ManyStreams, Stream, StreamsParams};
pub use transport::{HttpTransport, RawResponse, Request, Transport};
pub use users::{ManyUsers, User, UsersParams};
