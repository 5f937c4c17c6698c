use crate::client::HelixClient;
use crate::error::{HelixError, Result};
use crate::query::{self, QueryParams};
use crate::response::{decode_response, Response};
use crate::transport::Request;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use url::Url;

impl HelixClient {
    /// Issue a GET request to the given path and decode the payload into `D`
    pub fn get<D, P>(&self, path: &str, params: Option<&P>) -> Result<Response<D>>
    where
        D: serde::de::DeserializeOwned,
        P: QueryParams,
    {
        self.do_request(Method::GET, path, query::encode(params), None)
    }

    /// Issue a POST request with an optional JSON body
    pub fn post<D, P, B>(
        &self,
        path: &str,
        params: Option<&P>,
        body: Option<&B>,
    ) -> Result<Response<D>>
    where
        D: serde::de::DeserializeOwned,
        P: QueryParams,
        B: Serialize,
    {
        self.do_request(Method::POST, path, query::encode(params), encode_body(body)?)
    }

    /// Issue a PATCH request with an optional JSON body
    pub fn patch<D, P, B>(
        &self,
        path: &str,
        params: Option<&P>,
        body: Option<&B>,
    ) -> Result<Response<D>>
    where
        D: serde::de::DeserializeOwned,
        P: QueryParams,
        B: Serialize,
    {
        self.do_request(Method::PATCH, path, query::encode(params), encode_body(body)?)
    }

    /// Issue a PUT request with an optional JSON body
    pub fn put<D, P, B>(
        &self,
        path: &str,
        params: Option<&P>,
        body: Option<&B>,
    ) -> Result<Response<D>>
    where
        D: serde::de::DeserializeOwned,
        P: QueryParams,
        B: Serialize,
    {
        self.do_request(Method::PUT, path, query::encode(params), encode_body(body)?)
    }

    /// Issue a DELETE request; parameters are query-string only
    pub fn delete<D, P>(&self, path: &str, params: Option<&P>) -> Result<Response<D>>
    where
        D: serde::de::DeserializeOwned,
        P: QueryParams,
    {
        self.do_request(Method::DELETE, path, query::encode(params), None)
    }

    /// Execute one API call: build the request, run the rate-limit policy
    /// hook, send through the transport, and decode by status class.
    ///
    /// On 429 with a policy configured the loop re-enters the policy hook
    /// (which is expected to block until the bucket refills) and resends;
    /// without a policy the 429 envelope is returned like any other
    /// structured API error. Transport failures return immediately.
    pub(crate) fn do_request<D>(
        &self,
        method: Method,
        path: &str,
        query: String,
        body: Option<Vec<u8>>,
    ) -> Result<Response<D>>
    where
        D: serde::de::DeserializeOwned,
    {
        let request = self.build_request(method, path, &query, body)?;

        loop {
            if let Some(ref policy) = self.rate_limit_policy {
                if let Some(last) = self.last_response() {
                    policy(&last)?;
                }
            }

            let raw = self.transport.send(&request)?;
            tracing::debug!(
                method = %request.method,
                path,
                status = raw.status.as_u16(),
                "helix request completed"
            );

            if raw.status == StatusCode::TOO_MANY_REQUESTS && self.rate_limit_policy.is_some() {
                let response = decode_response::<D>(&raw)?;
                self.store_last_response(&response.common);
                tracing::warn!(
                    path,
                    reset = response.common.rate_limit.reset,
                    "rate limited, deferring to policy before resend"
                );
                continue;
            }

            let response = decode_response(&raw)?;
            self.store_last_response(&response.common);
            return Ok(response);
        }
    }

    /// Build a complete request for the fixed base URL plus `path`, with
    /// the uniform auth headers attached regardless of endpoint.
    pub(crate) fn build_request(
        &self,
        method: Method,
        path: &str,
        query: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Request> {
        let mut url = Url::parse(&format!("{}{}", self.opts.base_url, path))?;
        if !query.is_empty() {
            url.set_query(Some(query));
        }

        let mut headers = HeaderMap::new();
        headers.insert("Client-Id", header_value(&self.opts.client_id)?);
        if let Some(token) = self.opts.bearer_token() {
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", token))?);
        }
        if let Some(ref user_agent) = self.opts.user_agent {
            headers.insert(USER_AGENT, header_value(user_agent)?);
        }
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(Request {
            method,
            url,
            headers,
            body,
        })
    }
}

fn encode_body<B: Serialize>(body: Option<&B>) -> Result<Option<Vec<u8>>> {
    match body {
        Some(body) => serde_json::to_vec(body)
            .map(Some)
            .map_err(|e| HelixError::RequestBuild(format!("failed to encode body: {}", e))),
        None => Ok(None),
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| HelixError::RequestBuild(format!("invalid header value: {:?}", value)))
}
