//! Async orchestration of reload and optimistic send cycles.

use convo_core::{ConversationThread, Message, Participant};
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::remote::ConversationRemote;

/// Errors surfaced by [`ThreadController`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Thread(#[from] convo_core::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Drives one [`ConversationThread`] against a remote backend.
///
/// Taking `&mut self` on both operations serializes them within one
/// controller, so the one-send-in-flight rule holds by construction;
/// `begin_send` still guards against re-entrancy when the thread is
/// driven directly.
pub struct ThreadController<R> {
    conversation_id: String,
    remote: R,
    thread: ConversationThread,
}

impl<R: ConversationRemote> ThreadController<R> {
    pub fn new(conversation_id: impl Into<String>, local: Participant, remote: R) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            remote,
            thread: ConversationThread::new(local),
        }
    }

    pub fn thread(&self) -> &ConversationThread {
        &self.thread
    }

    pub fn thread_mut(&mut self) -> &mut ConversationThread {
        &mut self.thread
    }

    pub fn set_composer(&mut self, text: impl Into<String>) {
        self.thread.set_composer(text);
    }

    /// Full reload of the conversation.
    ///
    /// Destructive replace on success; on failure the stale log stays
    /// untouched and the thread parks in `Failed` for an explicit retry.
    pub async fn reload(&mut self) -> Result<(), ClientError> {
        self.thread.begin_reload()?;
        debug!(conversation = %self.conversation_id, "reloading conversation");

        match self.remote.fetch_conversation(&self.conversation_id).await {
            Ok(envelope) => {
                debug!(
                    conversation = %self.conversation_id,
                    messages = envelope.messages.len(),
                    "reload complete"
                );
                self.thread.apply_reload(envelope.conversation, envelope.messages);
                Ok(())
            }
            Err(e) => {
                warn!(conversation = %self.conversation_id, error = %e, "reload failed");
                self.thread.fail_reload(e.to_string());
                Err(e.into())
            }
        }
    }

    /// One optimistic send cycle for the current composer text.
    ///
    /// Exactly one remote call per invocation. A failure rolls the
    /// placeholder back and restores the composer; there is no automatic
    /// retry. Returns the confirmed message on success.
    pub async fn send(&mut self) -> Result<Message, ClientError> {
        let pending = self.thread.begin_send()?;
        debug!(
            conversation = %self.conversation_id,
            temp_id = %pending.temp_id,
            "sending message"
        );

        match self
            .remote
            .append_message(&self.conversation_id, &pending.body)
            .await
        {
            Ok(response) => {
                let confirmed = response.message.clone();
                let replaced = self.thread.complete_send(
                    &pending,
                    response.message,
                    response.conversation_stats,
                );
                if !replaced {
                    debug!(
                        temp_id = %pending.temp_id,
                        "confirmed message had no matching placeholder; dropped"
                    );
                }
                Ok(confirmed)
            }
            Err(e) => {
                warn!(
                    conversation = %self.conversation_id,
                    temp_id = %pending.temp_id,
                    error = %e,
                    "send failed; rolling back placeholder"
                );
                self.thread.fail_send(&pending);
                Err(e.into())
            }
        }
    }
}
