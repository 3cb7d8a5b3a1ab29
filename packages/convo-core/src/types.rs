//! Core data types for conversation threads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::temp_id;

/// A single message within a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Server-issued durable id, or a temporary id until confirmation
    pub id: String,
    /// Owning conversation
    pub conversation_id: String,
    /// Identifier of the sending party
    pub sender_id: String,
    /// The sender's relationship to the conversation
    pub sender_role: SenderRole,
    /// Text content
    pub body: String,
    /// Position within the conversation, assigned by the server on
    /// confirmation and guessed client-side for optimistic entries
    pub sequence_number: u32,
    /// Client clock for optimistic entries, server clock once confirmed
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Build an optimistic placeholder from the local participant's
    /// point of view. The caller supplies the temporary id and the
    /// sequence-number guess.
    pub fn optimistic(
        temp_id: &str,
        conversation_id: &str,
        sender: &Participant,
        body: &str,
        sequence_number: u32,
    ) -> Self {
        Self {
            id: temp_id.to_string(),
            conversation_id: conversation_id.to_string(),
            sender_id: sender.id.clone(),
            sender_role: sender.role,
            body: body.to_string(),
            sequence_number,
            created_at: Utc::now(),
        }
    }

    /// True while the message awaits server confirmation.
    pub fn is_pending(&self) -> bool {
        temp_id::is_temp_id(&self.id)
    }
}

/// The sender's relationship to the conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    Initiator,
    Counterparty,
}

impl SenderRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SenderRole::Initiator => "initiator",
            SenderRole::Counterparty => "counterparty",
        }
    }
}

/// One party in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub role: SenderRole,
}

impl Participant {
    pub fn new(id: &str, role: SenderRole) -> Self {
        Self {
            id: id.to_string(),
            role,
        }
    }
}

/// Conversation lifecycle status. `Closed` is terminal and rejects
/// new sends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    #[default]
    Open,
    Closed,
}

/// Server-maintained conversation counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStats {
    /// Total confirmed responses in the conversation
    #[serde(default)]
    pub total_responses: u32,
    /// When the conversation last saw activity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
}

/// A conversation between two fixed participants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub status: ConversationStatus,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub stats: ConversationStats,
}

impl Conversation {
    /// Create a conversation with the given status.
    pub fn new(id: &str, status: ConversationStatus, participants: Vec<Participant>) -> Self {
        Self {
            id: id.to_string(),
            status,
            participants,
            stats: ConversationStats::default(),
        }
    }

    /// Create an open conversation.
    pub fn open(id: &str, participants: Vec<Participant>) -> Self {
        Self::new(id, ConversationStatus::Open, participants)
    }

    pub fn is_open(&self) -> bool {
        self.status == ConversationStatus::Open
    }

    /// Find the participant holding the given role.
    pub fn participant(&self, role: SenderRole) -> Option<&Participant> {
        self.participants.iter().find(|p| p.role == role)
    }

    /// Sequence number the next confirmed response is expected to get,
    /// per the server-maintained count. Used for the "Response #N"
    /// indicator.
    pub fn next_sequence_number(&self) -> u32 {
        self.stats.total_responses + 1
    }
}
