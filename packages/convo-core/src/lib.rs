//! Convo Core - optimistic conversation thread view-model.
//!
//! This crate provides the core state management for a client-side view
//! over a remote conversation:
//!
//! - **Conversation store**: slot-keyed ordered message log with atomic
//!   full replace, optimistic append, reconcile, and rollback
//! - **Send lifecycle**: synchronous begin/complete/fail halves of an
//!   optimistic send, correlated by temporary id
//! - **Thread state machine**: `Idle | Loading | Ready | Sending | Failed`
//!   replacing ad-hoc boolean flags
//!
//! Everything here is synchronous and runtime-agnostic; the async
//! orchestration against a real backend lives in `convo-client`.
//!
//! # Example
//!
//! ```rust
//! use convo_core::{Conversation, ConversationThread, Participant, SenderRole};
//!
//! let me = Participant::new("u1", SenderRole::Initiator);
//! let mut thread = ConversationThread::new(me);
//!
//! // Mount: reload the conversation from the backend.
//! thread.begin_reload().unwrap();
//! thread.apply_reload(Conversation::open("c1", Vec::new()), Vec::new());
//!
//! // Optimistic send: the placeholder is visible immediately.
//! thread.set_composer("hello there");
//! let pending = thread.begin_send().unwrap();
//! assert!(thread.store().entries().last().unwrap().message.is_pending());
//! assert_eq!(thread.composer(), "");
//! # let _ = pending;
//! ```

pub mod store;
pub mod temp_id;
pub mod thread;
pub mod types;

// Re-export commonly used types
pub use store::{ConversationStore, Entry};
pub use thread::{ConversationThread, PendingSend, ThreadPhase};
pub use types::{
    Conversation, ConversationStats, ConversationStatus, Message, Participant, SenderRole,
};

/// Error types for convo-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("message body is empty")]
    EmptyBody,

    #[error("conversation is closed")]
    ConversationClosed,

    #[error("a send is already in flight")]
    SendInFlight,

    #[error("a reload is already in flight")]
    ReloadInFlight,

    #[error("thread is not ready: {0}")]
    NotReady(String),
}

/// Result type for convo-core operations.
pub type Result<T> = std::result::Result<T, Error>;
