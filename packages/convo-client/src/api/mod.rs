//! HTTP API surface for the conversation backend.

pub mod client;
pub mod types;

pub use client::{ApiClient, ApiError};
pub use types::{ConversationEnvelope, SendMessagePayload, SendMessageResponse};
