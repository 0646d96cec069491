// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! JSON-over-HTTP transport with bearer token handling.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// HTTP client speaking JSON to the backend.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        if config.base_url.is_empty() {
            return Err(ApiError::Config("base_url must not be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(config.token.clone()),
        })
    }

    /// Replaces the bearer token sent with every request.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    /// Returns the current bearer token.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let req = self.build_request(Method::GET, endpoint).await;
        let resp = self.execute(req).await?;
        Ok(resp.json().await?)
    }

    pub async fn get_with_query<T, Q>(&self, endpoint: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = self.build_request(Method::GET, endpoint).await.query(query);
        let resp = self.execute(req).await?;
        Ok(resp.json().await?)
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.build_request(Method::POST, endpoint).await.json(body);
        let resp = self.execute(req).await?;
        Ok(resp.json().await?)
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.build_request(Method::PUT, endpoint).await.json(body);
        let resp = self.execute(req).await?;
        Ok(resp.json().await?)
    }

    /// Sends a DELETE request, discarding any response body.
    pub async fn delete(&self, endpoint: &str) -> Result<(), ApiError> {
        let req = self.build_request(Method::DELETE, endpoint).await;
        let _ = self.execute(req).await?;
        Ok(())
    }

    /// Builds a request with the JSON content type and authentication headers.
    async fn build_request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%method, %url, "sending request");

        let mut req = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.token.read().await.as_deref() {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Executes a request and checks for HTTP errors.
    async fn execute(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            _ => status.canonical_reason().unwrap_or("Unknown").to_string(),
        };
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
