//! Per-view conversation thread.
//!
//! `ConversationThread` bundles the store, the composer text, and a
//! single phase machine, and exposes the synchronous halves of the
//! reload and optimistic-send lifecycles. The async layer calls
//! `begin_*` before a network round trip and `apply_*`/`complete_*`/
//! `fail_*` after it, so every transition stays unit-testable without
//! a runtime.

use crate::store::ConversationStore;
use crate::temp_id;
use crate::types::{Conversation, ConversationStats, Message, Participant};
use crate::{Error, Result};

/// Lifecycle phase of one conversation view.
///
/// A tagged variant instead of independent `loading`/`sending` booleans
/// so that illegal combinations are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadPhase {
    /// Nothing loaded yet
    Idle,
    /// A reload is in flight
    Loading,
    /// Messages loaded, interactive
    Ready,
    /// One optimistic send is in flight
    Sending { temp_id: String },
    /// The last reload failed; retry re-enters `Loading`
    Failed { reason: String },
}

impl ThreadPhase {
    pub fn name(&self) -> &'static str {
        match self {
            ThreadPhase::Idle => "idle",
            ThreadPhase::Loading => "loading",
            ThreadPhase::Ready => "ready",
            ThreadPhase::Sending { .. } => "sending",
            ThreadPhase::Failed { .. } => "failed",
        }
    }
}

/// Correlation token for one in-flight optimistic send.
///
/// Carried through the send future as a value; the temporary id is the
/// only correlation key, never the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub temp_id: String,
    /// Original composer text, restored on failure
    pub body: String,
}

/// View-model for a single conversation.
#[derive(Debug, Clone)]
pub struct ConversationThread {
    local: Participant,
    store: ConversationStore,
    composer: String,
    phase: ThreadPhase,
}

impl ConversationThread {
    pub fn new(local: Participant) -> Self {
        Self {
            local,
            store: ConversationStore::new(),
            composer: String::new(),
            phase: ThreadPhase::Idle,
        }
    }

    pub fn phase(&self) -> &ThreadPhase {
        &self.phase
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn local_participant(&self) -> &Participant {
        &self.local
    }

    pub fn composer(&self) -> &str {
        &self.composer
    }

    pub fn set_composer(&mut self, text: impl Into<String>) {
        self.composer = text.into();
    }

    // ========================================================================
    // Reload lifecycle
    // ========================================================================

    /// Enter `Loading`.
    ///
    /// Accepted from every phase except an already-running reload. A
    /// refresh during an in-flight send is deliberately allowed: the
    /// reload result supersedes the placeholder, and the send's own
    /// completion then finds no matching temporary id and no-ops.
    pub fn begin_reload(&mut self) -> Result<()> {
        if self.phase == ThreadPhase::Loading {
            return Err(Error::ReloadInFlight);
        }
        self.phase = ThreadPhase::Loading;
        Ok(())
    }

    /// Apply a completed reload: destructive full replace of the log.
    pub fn apply_reload(&mut self, conversation: Conversation, messages: Vec<Message>) {
        self.store.load(conversation, messages);
        self.phase = ThreadPhase::Ready;
    }

    /// Record a failed reload.
    ///
    /// The stale log, if any, is left untouched so the view never blanks
    /// out on a refresh failure; only the phase carries the error.
    pub fn fail_reload(&mut self, reason: impl Into<String>) {
        self.phase = ThreadPhase::Failed {
            reason: reason.into(),
        };
    }

    // ========================================================================
    // Send lifecycle
    // ========================================================================

    /// Start an optimistic send for the current composer text.
    ///
    /// Validates first (non-empty trimmed body, open conversation, no
    /// send already in flight) and performs no side effect on rejection.
    /// On success the placeholder is appended, the composer cleared, and
    /// the returned token correlates the eventual confirmation or
    /// failure.
    pub fn begin_send(&mut self) -> Result<PendingSend> {
        match &self.phase {
            ThreadPhase::Ready => {}
            ThreadPhase::Sending { .. } => return Err(Error::SendInFlight),
            other => return Err(Error::NotReady(other.name().to_string())),
        }

        let body = self.composer.trim().to_string();
        if body.is_empty() {
            return Err(Error::EmptyBody);
        }

        let conversation = self
            .store
            .conversation()
            .ok_or_else(|| Error::NotReady("no conversation loaded".to_string()))?;
        if !conversation.is_open() {
            return Err(Error::ConversationClosed);
        }
        let conversation_id = conversation.id.clone();

        let tid = temp_id::mint();
        let sequence_number = self.store.message_count() as u32 + 1;
        let placeholder =
            Message::optimistic(&tid, &conversation_id, &self.local, &body, sequence_number);
        self.store.append_optimistic(placeholder)?;

        self.composer.clear();
        self.phase = ThreadPhase::Sending {
            temp_id: tid.clone(),
        };
        Ok(PendingSend {
            temp_id: tid,
            body,
        })
    }

    /// Apply a confirmed send.
    ///
    /// Replaces the placeholder in place and adopts the server stats.
    /// Returns whether the placeholder was actually replaced; when an
    /// intervening reload already removed it, the confirmed message is
    /// dropped and only the stats are applied.
    pub fn complete_send(
        &mut self,
        pending: &PendingSend,
        confirmed: Message,
        stats: ConversationStats,
    ) -> bool {
        let replaced = self.store.reconcile(&pending.temp_id, confirmed);
        self.store.set_stats(stats);
        self.leave_sending(pending);
        replaced
    }

    /// Roll back a failed send.
    ///
    /// Drops the placeholder (a no-op when a reload already replaced the
    /// log) and restores the original text to the composer so the user
    /// can resend. Failures are terminal for the attempt; there is no
    /// automatic retry.
    pub fn fail_send(&mut self, pending: &PendingSend) {
        self.store.rollback(&pending.temp_id);
        self.composer = pending.body.clone();
        self.leave_sending(pending);
    }

    /// Return to `Ready` if the phase still belongs to this send. A
    /// reload that completed in the meantime owns the phase instead.
    fn leave_sending(&mut self, pending: &PendingSend) {
        if matches!(&self.phase, ThreadPhase::Sending { temp_id } if *temp_id == pending.temp_id) {
            self.phase = ThreadPhase::Ready;
        }
    }
}
