// Feeds API HTTP client.
// Handles authentication, request dispatch, and response/error processing.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Serialize;

use crate::error::{LedeError, Result};

use super::types::ApiMessage;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const TOTAL_TIMEOUT_SECS: u64 = 30;
const CLIENT_USER_AGENT: &str = "lede";

/// HTTP client for a news server's feeds API.
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl ApiClient {
    /// Create a new client rooted at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(TOTAL_TIMEOUT_SECS))
            .build()
            .map_err(LedeError::Api)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: None,
        })
    }

    /// Attach basic-auth credentials to every request.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((user.into(), password.into()));
        self
    }

    fn request(&self, method: reqwest::Method, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        let builder = self.client.request(method, &url);
        match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, Some(password)),
            None => builder,
        }
    }

    /// Make a GET request to the feeds API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let response = self
            .request(reqwest::Method::GET, endpoint)
            .send()
            .await
            .map_err(LedeError::Api)?;
        check_response(response).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response> {
        let response = self
            .request(reqwest::Method::POST, endpoint)
            .json(body)
            .send()
            .await
            .map_err(LedeError::Api)?;
        check_response(response).await
    }

    /// Make a POST request with no body.
    pub async fn post_empty(&self, endpoint: &str) -> Result<Response> {
        let response = self
            .request(reqwest::Method::POST, endpoint)
            .send()
            .await
            .map_err(LedeError::Api)?;
        check_response(response).await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, endpoint: &str) -> Result<Response> {
        let response = self
            .request(reqwest::Method::DELETE, endpoint)
            .send()
            .await
            .map_err(LedeError::Api)?;
        check_response(response).await
    }
}

/// Check response status and convert errors.
///
/// 4xx bodies carry `{message}`; that message is what callers surface on
/// the affected feed, so it is pulled out here rather than discarded.
async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED | StatusCode::NO_CONTENT => {
            Ok(response)
        }
        StatusCode::UNAUTHORIZED => Err(LedeError::Unauthorized),
        StatusCode::NOT_FOUND => {
            let url = response.url().to_string();
            Err(LedeError::NotFound(url))
        }
        status if status.is_client_error() => {
            let body: ApiMessage = response.json().await.unwrap_or_default();
            let message = if body.message.is_empty() {
                format!("HTTP {}", status)
            } else {
                body.message
            };
            Err(LedeError::Rejected { message })
        }
        status => Err(LedeError::Other(format!(
            "HTTP {}: {}",
            status,
            response.text().await.unwrap_or_default()
        ))),
    }
}
