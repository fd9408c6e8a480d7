//! # HTTP Retrieval Utilities
//!
//! This module provides a robust, asynchronous API client wrapper around
//! `reqwest`. It includes middleware support for exponential backoff retries
//! and standardized JSON response handling.

use reqwest::{
    header::{HeaderMap, AUTHORIZATION},
    Method, Url,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{de::DeserializeOwned, Serialize};

/// A standardized container for API responses.
///
/// This struct wraps the deserialized data along with metadata about the
/// HTTP transaction, such as status codes and headers.
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// The successfully deserialized response body, if any.
    pub data: Option<T>,
    /// The raw error body returned by the server if the request failed.
    pub error_body: Option<String>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
    /// The headers returned by the server.
    pub headers: HeaderMap,
}

/// A flexible asynchronous HTTP client.
///
/// Built on top of `reqwest_middleware`, it handles base URLs, query
/// parameters, authentication tokens, and automatic retries.
pub struct ApiClient {
    /// The underlying middleware-enabled client.
    inner: ClientWithMiddleware,
    /// The base URL to which all relative paths are joined.
    base_url: Url,
    /// An optional Bearer token used for authorization.
    auth_token: Option<String>,
}

impl ApiClient {
    /// Creates a new `ApiClient` instance with a retry policy.
    ///
    /// # Arguments
    /// * `base_url` - The absolute base URL for the API, ending in a slash
    ///   so relative paths append rather than replace (e.g.
    ///   "https://api.example.com/v1/").
    /// * `auth_token` - An optional string for the Authorization header.
    ///
    /// # Errors
    /// Fails if `base_url` is not a valid absolute URL.
    pub fn new(base_url: &str, auth_token: Option<String>) -> anyhow::Result<Self> {
        let url = Url::parse(base_url)?;

        // Exponential backoff with 3 retries for transient failures
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        let client = ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            inner: client,
            base_url: url,
            auth_token,
        })
    }

    /// Performs a generic HTTP request and handles the response.
    ///
    /// This method manages URL joining, query encoding, header injection,
    /// authentication, and JSON serialization/deserialization.
    ///
    /// # Arguments
    /// * `method` - The HTTP verb (GET, POST, etc.).
    /// * `path` - The relative path to append to the base URL.
    /// * `query` - Optional query pairs appended to the URL.
    /// * `headers` - Optional additional headers for this specific request.
    /// * `body` - Optional serializable object to send as the JSON body.
    ///
    /// # Errors
    /// Returns an `anyhow::Error` if URL joining, network execution, or
    /// response decoding fails. Non-2xx statuses are not errors; they are
    /// reported through `ApiResponse::success`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        headers: Option<HeaderMap>,
        body: Option<B>,
    ) -> anyhow::Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        // 1. Construct the full absolute URL
        let mut full_url = self.base_url.join(path)?;
        if let Some(pairs) = query {
            full_url.query_pairs_mut().extend_pairs(pairs);
        }
        let mut req = self.inner.request(method, full_url);

        // 2. Add custom headers if provided
        if let Some(h) = headers {
            req = req.headers(h);
        }

        // 3. Inject Bearer authentication if a token is present
        if let Some(token) = &self.auth_token {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        // 4. Serialize and attach the JSON body if present
        if let Some(b) = body {
            use reqwest::header::CONTENT_TYPE;
            let json_body = serde_json::to_string(&b)?;
            req = req.header(CONTENT_TYPE, "application/json").body(json_body);
        }

        // 5. Execute the request and capture response metadata
        let response: reqwest::Response = req.send().await?;
        let status = response.status();
        let resp_headers = response.headers().clone();
        let success = status.is_success();

        // 6. Handle the result based on success status
        if success {
            let data = response.json::<T>().await?;
            Ok(ApiResponse {
                data: Some(data),
                error_body: None,
                status: status.as_u16(),
                success: true,
                headers: resp_headers,
            })
        } else {
            // Capture the error body as a string for debugging
            let error_text = response.text().await.ok();
            Ok(ApiResponse {
                data: None,
                error_body: error_text,
                status: status.as_u16(),
                success: false,
                headers: resp_headers,
            })
        }
    }
}
