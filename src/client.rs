use crate::error::Result;
use crate::response::ResponseCommon;
use crate::transport::{HttpTransport, Transport};
use std::sync::{Arc, Mutex};

/// Default base URL for Helix API requests
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitch.tv/helix";

/// Caller-supplied function governing whether and how long to wait before a
/// request is sent or retried.
///
/// The policy receives the common envelope of the most recent response. It
/// is invoked before every send once at least one response has been seen,
/// and it drives the retry loop on 429: the library resends after each
/// successful policy invocation and imposes no retry behavior of its own —
/// no backoff, no bounded attempt count. Returning an error aborts the call
/// without sending.
///
/// The function must be safe for concurrent use; the client invokes it from
/// whichever thread issued the call.
pub type RateLimitPolicy = Arc<dyn Fn(&ResponseCommon) -> Result<()> + Send + Sync>;

/// Configuration for a [`HelixClient`]
#[derive(Clone, Default)]
pub struct Options {
    /// Application client ID, sent as the `Client-Id` header
    pub client_id: String,
    /// App access token, used when no user access token is set
    pub app_access_token: Option<String>,
    /// User access token; takes precedence over the app access token
    pub user_access_token: Option<String>,
    /// Optional User-Agent header value
    pub user_agent: Option<String>,
    /// Base URL for API requests
    pub base_url: String,
}

impl Options {
    /// Create options for the given client ID with the default base URL
    pub fn new(client_id: impl Into<String>) -> Self {
        Options {
            client_id: client_id.into(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            ..Default::default()
        }
    }

    /// The bearer token to send, if any. The user access token wins when
    /// both tokens are configured.
    pub fn bearer_token(&self) -> Option<&str> {
        self.user_access_token
            .as_deref()
            .or(self.app_access_token.as_deref())
    }
}

/// Client for the Helix API.
///
/// Every call is an independent round trip through the configured
/// [`Transport`]. The only state shared across calls is the configuration
/// and the last response's envelope, which is kept behind a mutex to feed
/// the rate-limit policy. The client is safe for concurrent use provided
/// the injected transport and policy are themselves concurrency-safe,
/// which their `Send + Sync` bounds require.
pub struct HelixClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) opts: Options,
    pub(crate) rate_limit_policy: Option<RateLimitPolicy>,
    pub(crate) last_response: Mutex<Option<ResponseCommon>>,
}

impl HelixClient {
    /// Create a client for the given client ID with the default transport
    pub fn new(client_id: impl Into<String>) -> Self {
        HelixClient {
            transport: Arc::new(HttpTransport::new()),
            opts: Options::new(client_id),
            rate_limit_policy: None,
            last_response: Mutex::new(None),
        }
    }

    /// Create a client from pre-built options
    pub fn with_options(opts: Options) -> Self {
        HelixClient {
            transport: Arc::new(HttpTransport::new()),
            opts,
            rate_limit_policy: None,
            last_response: Mutex::new(None),
        }
    }

    /// Replace the transport, e.g. with a test double or a custom HTTP stack
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Set the app access token
    pub fn with_app_access_token(mut self, token: impl Into<String>) -> Self {
        self.opts.app_access_token = Some(token.into());
        self
    }

    /// Set the user access token
    pub fn with_user_access_token(mut self, token: impl Into<String>) -> Self {
        self.opts.user_access_token = Some(token.into());
        self
    }

    /// Set the User-Agent header value
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = Some(user_agent.into());
        self
    }

    /// Override the base URL (mainly useful against mock servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.opts.base_url = base_url.into();
        self
    }

    /// Install a rate-limit policy
    pub fn with_rate_limit_policy(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit_policy = Some(policy);
        self
    }

    /// The envelope of the most recent response, if any call completed yet
    pub fn last_response(&self) -> Option<ResponseCommon> {
        self.last_response
            .lock()
            .expect("last response lock poisoned")
            .clone()
    }

    pub(crate) fn store_last_response(&self, common: &ResponseCommon) {
        *self
            .last_response
            .lock()
            .expect("last response lock poisoned") = Some(common.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let opts = Options::new("client-123");
        assert_eq!(opts.client_id, "client-123");
        assert_eq!(opts.base_url, DEFAULT_API_BASE_URL);
        assert!(opts.bearer_token().is_none());
    }

    #[test]
    fn test_user_token_wins_over_app_token() {
        let client = HelixClient::new("client-123")
            .with_app_access_token("app-token")
            .with_user_access_token("user-token");
        assert_eq!(client.opts.bearer_token(), Some("user-token"));
    }

    #[test]
    fn test_app_token_used_when_alone() {
        let client = HelixClient::new("client-123").with_app_access_token("app-token");
        assert_eq!(client.opts.bearer_token(), Some("app-token"));
    }

    #[test]
    fn test_last_response_starts_empty() {
        let client = HelixClient::new("client-123");
        assert!(client.last_response().is_none());
    }
}
