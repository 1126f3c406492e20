//! # tq-client
//!
//! HTTP access to the transit JSON:API.
//!
//! [`ApiClient::fetch_api_doc`] downloads the Swagger description used for
//! introspection and fails on any non-success status.
//! [`ApiClient::get`] runs a data query and returns the response whatever
//! its status, so callers can turn remote errors into result-level errors.

mod error;
mod http;

pub use error::ClientError;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tq_config::ApiConfig;
use tq_query::{QueryParams, request_url};
use tq_schema::ApiDoc;

use crate::http::check_response;

const API_KEY_HEADER: &str = "x-api-key";

/// A completed request, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Canonical request URL, parameters in builder order.
    pub url: String,
    pub status: u16,
    /// Canonical reason phrase for `status`, empty when unknown.
    pub reason: String,
    pub body: String,
}

impl ApiResponse {
    /// Drain a response into an [`ApiResponse`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the body cannot be read.
    pub async fn read(url: String, resp: reqwest::Response) -> Result<Self, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;
        Ok(Self {
            url,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    docs_url: String,
}

impl ApiClient {
    /// Build a client from the `api` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidApiKey`] if the key is not a valid header
    /// value, or [`ClientError::Http`] if the TLS backend fails to initialize.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = config.api_key() {
            let mut value = HeaderValue::from_str(key).map_err(|_| ClientError::InvalidApiKey)?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        } else {
            tracing::debug!("no API key configured; requests are rate limited more strictly");
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("transitq/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            docs_url: config.docs_url.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The URL [`Self::get`] would request.
    #[must_use]
    pub fn url_for(&self, path: &str, params: &QueryParams) -> String {
        request_url(&self.base_url, path, params)
    }

    /// Download and parse the API description document.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-success status, or
    /// a body that is not a valid description document.
    pub async fn fetch_api_doc(&self) -> Result<ApiDoc, ClientError> {
        tracing::info!(url = %self.docs_url, "fetching API description");
        let resp = check_response(self.http.get(&self.docs_url).send().await?).await?;
        let text = resp.text().await?;
        Ok(ApiDoc::from_json(&text)?)
    }

    /// Issue a GET for `path` with `params`.
    ///
    /// Non-2xx statuses are returned as an [`ApiResponse`], not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] only for transport failures.
    pub async fn get(&self, path: &str, params: &QueryParams) -> Result<ApiResponse, ClientError> {
        let url = self.url_for(path, params);
        tracing::debug!(%url, "GET");
        let resp = self.http.get(&url).send().await?;
        let response = ApiResponse::read(url, resp).await?;
        tracing::info!(
            url = %response.url,
            status = response.status,
            bytes = response.body.len(),
            "request completed"
        );
        Ok(response)
    }
}
