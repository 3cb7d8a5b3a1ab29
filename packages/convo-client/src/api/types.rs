//! Wire types for the conversation backend.
//!
//! The exact wire format is the backend's concern; these mirror the two
//! operations this client consumes.

use convo_core::{Conversation, ConversationStats, Message};
use serde::{Deserialize, Serialize};

/// Response of `GET /conversations/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEnvelope {
    pub conversation: Conversation,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Request body of `POST /conversations/{id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessagePayload {
    pub body: String,
}

/// Response of `POST /conversations/{id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub message: Message,
    pub conversation_stats: ConversationStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use convo_core::SenderRole;

    #[test]
    fn test_envelope_deserializes_backend_shape() {
        let json = r#"{
            "conversation": {
                "id": "c1",
                "status": "open",
                "participants": [
                    { "id": "u1", "role": "initiator" },
                    { "id": "u2", "role": "counterparty" }
                ],
                "stats": { "totalResponses": 2 }
            },
            "messages": [
                {
                    "id": "m1",
                    "conversationId": "c1",
                    "senderId": "u1",
                    "senderRole": "initiator",
                    "body": "hi",
                    "sequenceNumber": 1,
                    "createdAt": "2026-08-01T12:00:00Z"
                }
            ]
        }"#;

        let envelope: ConversationEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.conversation.id, "c1");
        assert!(envelope.conversation.is_open());
        assert_eq!(envelope.conversation.stats.total_responses, 2);
        assert_eq!(envelope.messages.len(), 1);
        assert_eq!(envelope.messages[0].sender_role, SenderRole::Initiator);
    }

    #[test]
    fn test_send_response_deserializes_stats() {
        let json = r#"{
            "message": {
                "id": "m99",
                "conversationId": "c1",
                "senderId": "u1",
                "senderRole": "initiator",
                "body": "hello",
                "sequenceNumber": 3,
                "createdAt": "2026-08-01T12:01:00Z"
            },
            "conversationStats": { "totalResponses": 3, "lastActivity": "2026-08-01T12:01:00Z" }
        }"#;

        let response: SendMessageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message.id, "m99");
        assert!(!response.message.is_pending());
        assert_eq!(response.conversation_stats.total_responses, 3);
        assert!(response.conversation_stats.last_activity.is_some());
    }
}
