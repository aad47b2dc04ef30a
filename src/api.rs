// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! HTTP boundary for the GitHub REST API.
//!
//! The module exposes the [`ApiClient`] trait consumed by the paginator and
//! the fetch layer, together with the production [`GithubClient`] backed by
//! `reqwest`. The trait keeps the pipeline testable against canned responses
//! and pins down the two request shapes the run ever makes: an authenticated
//! GET against the fixed API origin, and a bounded-timeout probe against an
//! absolute URL whose failure the caller tolerates.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK};
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Fixed origin every relative endpoint is resolved against.
pub const API_ORIGIN: &str = "https://api.github.com";

/// Accept header pinning the consumed API version.
pub const ACCEPT_VERSIONED: &str = "application/vnd.github.v3+json";

/// Upper bound on a single releases probe request.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Successful response slice consumed by the pipeline.
///
/// Only the pieces the aggregation actually uses are retained: the decoded
/// body text and the pagination `Link` header. The status is always in the
/// 2xx range; non-2xx responses surface as [`Error::Http`] instead.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code of the response.
    pub status: u16,
    /// Raw UTF-8 response body.
    pub body:   String,
    /// Raw `Link` header value, when the platform paginated the collection.
    pub link:   Option<String>
}

impl ApiResponse {
    /// Decodes the response body into the requested type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the body does not match `T`.
    pub fn json<T>(&self, endpoint: &str) -> Result<T, Error>
    where
        T: DeserializeOwned
    {
        serde_json::from_str(&self.body).map_err(|source| Error::decode(endpoint, source))
    }
}

/// Minimal GET-only client surface the pipeline depends on.
///
/// Implementations resolve `endpoint` against [`API_ORIGIN`] and must map
/// non-2xx statuses to [`Error::Http`]; the run treats those as fatal
/// everywhere except the releases probe, where the caller converts any error
/// into a skipped contribution.
#[allow(async_fn_in_trait)]
pub trait ApiClient {
    /// Issues an authenticated GET against a relative API endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] for non-2xx statuses and [`Error::Transport`]
    /// for connection-level failures.
    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<ApiResponse, Error>;

    /// Issues a bounded-timeout GET against an absolute URL.
    ///
    /// Used only for the best-effort releases probe; callers are expected to
    /// tolerate every error this returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] for non-2xx statuses and [`Error::Transport`]
    /// for timeouts or connection-level failures.
    async fn probe(&self, url: &str) -> Result<ApiResponse, Error>;
}

/// Production client authenticated with a pre-obtained personal token.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http:   reqwest::Client,
    origin: String
}

impl GithubClient {
    /// Builds a client carrying the bearer token and versioned accept header
    /// on every request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the token cannot form a valid
    /// header value and [`Error::Transport`] when the underlying client
    /// cannot be constructed.
    pub fn new(token: &str) -> Result<Self, Error> {
        Self::with_origin(token, API_ORIGIN)
    }

    /// Builds a client against a custom origin. Exists for integration
    /// testing against local servers; production code uses [`API_ORIGIN`].
    pub fn with_origin(token: &str, origin: &str) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut authorization = HeaderValue::from_str(&format!("token {token}"))
            .map_err(|_| Error::validation("token contains non-header characters"))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VERSIONED));

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            origin: origin.trim_end_matches('/').to_owned()
        })
    }

    async fn dispatch(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder
    ) -> Result<ApiResponse, Error> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(format!("GET {endpoint}: {e}")))?;

        let status = response.status().as_u16();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        if !response.status().is_success() {
            return Err(Error::http(endpoint, status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("GET {endpoint}: {e}")))?;

        Ok(ApiResponse {
            status,
            body,
            link
        })
    }
}

impl ApiClient for GithubClient {
    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<ApiResponse, Error> {
        let url = format!("{}{endpoint}", self.origin);
        let request = self.http.get(url).query(query);
        self.dispatch(endpoint, request).await
    }

    async fn probe(&self, url: &str) -> Result<ApiResponse, Error> {
        let request = self.http.get(url).timeout(PROBE_TIMEOUT);
        self.dispatch(url, request).await
    }
}
