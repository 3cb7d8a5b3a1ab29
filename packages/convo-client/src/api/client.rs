//! HTTP client for the conversation backend.

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use super::types::*;

/// Errors surfaced by the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("request rejected: {status} {message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("response decode error: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Typed client over the conversation endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            auth_token: None,
        }
    }

    /// Attach a bearer token sent with every request.
    pub fn with_auth_token(mut self, token: String) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Internal HTTP Methods
    // ========================================================================

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let mut request = self.client.get(format!("{}{}", self.base_url, path));

        if let Some(ref token) = self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        response.json().await.map_err(decode_error)
    }

    /// Make a POST request
    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let mut request = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body);

        if let Some(ref token) = self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        response.json().await.map_err(decode_error)
    }

    // ========================================================================
    // Health API
    // ========================================================================

    /// Check if the backend is reachable.
    pub async fn health(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    // ========================================================================
    // Conversation API
    // ========================================================================

    /// Fetch a conversation and its full message list.
    pub async fn fetch_conversation(
        &self,
        conversation_id: &str,
    ) -> Result<ConversationEnvelope, ApiError> {
        self.get(&format!("/conversations/{}", conversation_id))
            .await
    }

    /// Append a message to a conversation.
    ///
    /// The backend rejects this when the conversation is closed.
    pub async fn append_message(
        &self,
        conversation_id: &str,
        body: &str,
    ) -> Result<SendMessageResponse, ApiError> {
        self.post(
            &format!("/conversations/{}/messages", conversation_id),
            &SendMessagePayload {
                body: body.to_string(),
            },
        )
        .await
    }
}

fn decode_error(e: reqwest::Error) -> ApiError {
    if e.is_decode() {
        ApiError::Decode(e)
    } else {
        ApiError::Network(e)
    }
}
