use crate::error::{HelixError, Result};
use crate::transport::RawResponse;
use reqwest::header::HeaderMap;
use serde::Deserialize;

/// Rate-limit counters reported by the API on every response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// Maximum points in the bucket
    pub limit: u32,
    /// Points remaining in the bucket
    pub remaining: u32,
    /// Unix epoch second at which the bucket resets
    pub reset: u64,
}

impl RateLimit {
    /// Extract the counters from response headers.
    /// Missing or malformed headers leave the corresponding counter at zero.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        RateLimit {
            limit: header_number(headers, "Ratelimit-Limit"),
            remaining: header_number(headers, "Ratelimit-Remaining"),
            reset: header_number(headers, "Ratelimit-Reset"),
        }
    }
}

fn header_number<T>(headers: &HeaderMap, name: &str) -> T
where
    T: std::str::FromStr + Default,
{
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

/// Fields shared by every endpoint response: status code, the structured
/// error triple (populated only on 4xx), and rate-limit counters.
///
/// This is also the snapshot handed to a configured rate-limit policy as
/// "the most recent response".
#[derive(Debug, Clone, Default)]
pub struct ResponseCommon {
    /// HTTP status code of the response
    pub status_code: u16,
    /// Error label, e.g. "Bad Request" (empty on success)
    pub error: String,
    /// Status code repeated inside the error body (0 on success)
    pub error_status: u16,
    /// Human-readable error message (empty on success)
    pub error_message: String,
    /// Rate-limit counters from the response headers
    pub rate_limit: RateLimit,
}

impl ResponseCommon {
    /// Check whether the API returned a structured error
    pub fn has_error(&self) -> bool {
        self.error_status != 0 || !self.error.is_empty()
    }
}

/// A decoded API response: the common envelope plus the endpoint's typed
/// payload.
///
/// Exactly one of the payload and the error triple is populated, decided
/// solely by status class: `data` is `Some` for 2xx/3xx responses with a
/// body, the triple is filled for decodable 4xx bodies, and 5xx responses
/// carry neither.
#[derive(Debug, Clone)]
pub struct Response<D> {
    /// Common envelope fields
    pub common: ResponseCommon,
    /// Typed success payload; absent on error responses and empty bodies
    pub data: Option<D>,
}

impl<D> Response<D> {
    /// HTTP status code of the response
    pub fn status_code(&self) -> u16 {
        self.common.status_code
    }

    /// Check whether the API returned a structured error
    pub fn has_error(&self) -> bool {
        self.common.has_error()
    }
}

/// Shape of the structured error body returned for 4xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    status: u16,
    #[serde(default)]
    message: String,
}

/// Pagination cursor returned by list endpoints.
///
/// The token is opaque; thread it into the next request's `after` (or
/// `before`) field to continue the listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Payload type for endpoints whose success responses carry no body
/// (e.g. 204 from DELETE endpoints).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Empty {}

/// Decode a raw response into a typed [`Response`] according to its status
/// class, back-filling the common envelope fields in one place.
///
/// This is the only spot where envelope fields are copied into a typed
/// response; endpoint wrappers never assemble envelopes themselves.
pub(crate) fn decode_response<D>(raw: &RawResponse) -> Result<Response<D>>
where
    D: serde::de::DeserializeOwned,
{
    let status = raw.status.as_u16();
    let mut common = ResponseCommon {
        status_code: status,
        rate_limit: RateLimit::from_headers(&raw.headers),
        ..Default::default()
    };

    if raw.status.is_success() || raw.status.is_redirection() {
        let data = if raw.body.is_empty() {
            // 204 No Content and friends
            None
        } else {
            let payload = serde_json::from_slice(&raw.body)
                .map_err(|e| HelixError::response_decode(status, e))?;
            Some(payload)
        };
        return Ok(Response { common, data });
    }

    if raw.status.is_client_error() {
        // An empty or non-JSON body here is tolerated: the caller still
        // gets the status code, just no structured triple.
        if let Ok(body) = serde_json::from_slice::<ApiErrorBody>(&raw.body) {
            common.error = body.error;
            common.error_status = body.status;
            common.error_message = body.message;
        }
    }
    // 5xx: no decode attempt, the body may be arbitrary or absent

    Ok(Response { common, data: None })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use reqwest::StatusCode;

    #[derive(Debug, Deserialize)]
    struct ManyWidgets {
        data: Vec<Widget>,
        #[serde(default)]
        pagination: Pagination,
    }

    #[derive(Debug, Deserialize)]
    struct Widget {
        id: String,
    }

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_success_populates_payload_only() {
        let raw = raw(
            200,
            r#"{"data":[{"id":"42"}],"pagination":{"cursor":"abc"}}"#,
        );
        let response: Response<ManyWidgets> = decode_response(&raw).unwrap();

        assert_eq!(response.status_code(), 200);
        assert!(!response.has_error());
        let payload = response.data.expect("payload");
        assert_eq!(payload.data[0].id, "42");
        assert_eq!(payload.pagination.cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn test_client_error_populates_triple_only() {
        let body = r#"{"error":"Bad Request","status":400,"message":"Missing required parameter \"broadcaster_id\""}"#;
        let response: Response<ManyWidgets> = decode_response(&raw(400, body)).unwrap();

        assert!(response.data.is_none());
        assert!(response.has_error());
        assert_eq!(response.common.error, "Bad Request");
        assert_eq!(response.common.error_status, 400);
        assert_eq!(
            response.common.error_message,
            "Missing required parameter \"broadcaster_id\""
        );
    }

    #[test]
    fn test_client_error_tolerates_non_json_body() {
        let response: Response<ManyWidgets> = decode_response(&raw(404, "gone fishing")).unwrap();
        assert_eq!(response.status_code(), 404);
        assert!(response.data.is_none());
        assert!(!response.has_error());
    }

    #[test]
    fn test_server_error_skips_decoding() {
        let response: Response<ManyWidgets> =
            decode_response(&raw(502, "<html>bad gateway</html>")).unwrap();
        assert_eq!(response.status_code(), 502);
        assert!(response.data.is_none());
        assert!(!response.has_error());
    }

    #[test]
    fn test_empty_success_body_leaves_payload_absent() {
        let response: Response<Empty> = decode_response(&raw(204, "")).unwrap();
        assert_eq!(response.status_code(), 204);
        assert!(response.data.is_none());
        assert!(!response.has_error());
    }

    #[test]
    fn test_malformed_success_body_is_a_decode_error() {
        let result: Result<Response<ManyWidgets>> = decode_response(&raw(200, "{\"data\": [oops"));
        let error = result.unwrap_err();
        assert!(error.is_response_decode());
    }

    #[test]
    fn test_rate_limit_headers_are_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert("Ratelimit-Limit", HeaderValue::from_static("800"));
        headers.insert("Ratelimit-Remaining", HeaderValue::from_static("799"));
        headers.insert("Ratelimit-Reset", HeaderValue::from_static("1700000000"));

        let limits = RateLimit::from_headers(&headers);
        assert_eq!(
            limits,
            RateLimit {
                limit: 800,
                remaining: 799,
                reset: 1700000000,
            }
        );
    }

    #[test]
    fn test_missing_rate_limit_headers_default_to_zero() {
        let limits = RateLimit::from_headers(&HeaderMap::new());
        assert_eq!(limits, RateLimit::default());
    }
}
