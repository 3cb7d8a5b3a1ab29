//! Seam between the async controller and the backend.

use crate::api::{ApiClient, ApiError, ConversationEnvelope, SendMessageResponse};

/// Remote operations the thread controller consumes.
///
/// `ApiClient` is the production implementation; tests substitute an
/// in-memory fake so the send and reload lifecycles run without a
/// server.
#[allow(async_fn_in_trait)]
pub trait ConversationRemote {
    /// Fetch a conversation and its full message list.
    async fn fetch_conversation(
        &self,
        conversation_id: &str,
    ) -> Result<ConversationEnvelope, ApiError>;

    /// Append a message, returning the confirmed message and updated
    /// conversation stats.
    async fn append_message(
        &self,
        conversation_id: &str,
        body: &str,
    ) -> Result<SendMessageResponse, ApiError>;
}

impl ConversationRemote for ApiClient {
    async fn fetch_conversation(
        &self,
        conversation_id: &str,
    ) -> Result<ConversationEnvelope, ApiError> {
        ApiClient::fetch_conversation(self, conversation_id).await
    }

    async fn append_message(
        &self,
        conversation_id: &str,
        body: &str,
    ) -> Result<SendMessageResponse, ApiError> {
        ApiClient::append_message(self, conversation_id, body).await
    }
}
