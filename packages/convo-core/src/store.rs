//! Ordered in-memory log of messages for one conversation.
//!
//! The store keeps messages in stable insertion order and never
//! re-sorts, so a placeholder cannot jump around while it awaits
//! confirmation. Each view owns its own store instance; there is no
//! cross-view sharing.

use serde::{Deserialize, Serialize};

use crate::types::{Conversation, ConversationStats, Message};
use crate::{Error, Result};

/// One rendering slot in the log.
///
/// The slot number is a monotonic local counter and serves as the
/// stable rendering key: it survives the message id changing from
/// temporary to durable on reconciliation, so list diffing does not
/// flicker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub slot: u64,
    pub message: Message,
}

/// In-memory ordered view of one conversation and its messages.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversation: Option<Conversation>,
    entries: Vec<Entry>,
    next_slot: u64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire log atomically.
    ///
    /// No merge with prior state: a reload discards optimistic and
    /// confirmed entries alike in favor of the server-delivered order.
    pub fn load(&mut self, conversation: Conversation, messages: Vec<Message>) {
        self.entries.clear();
        for message in messages {
            self.push(message);
        }
        self.conversation = Some(conversation);
    }

    /// Append an optimistic placeholder to the end of the log.
    ///
    /// Rejected when the conversation is known to be closed. The
    /// one-send-in-flight rule is the thread's responsibility, not the
    /// store's.
    pub fn append_optimistic(&mut self, message: Message) -> Result<()> {
        if let Some(conversation) = &self.conversation {
            if !conversation.is_open() {
                return Err(Error::ConversationClosed);
            }
        }
        self.push(message);
        Ok(())
    }

    /// Replace the entry carrying `temp_id` in place with the confirmed
    /// message, keeping its slot and list position.
    ///
    /// Returns `false` when no such entry exists, for example because a
    /// reload replaced the log in the meantime; the confirmed message is
    /// dropped in that case.
    pub fn reconcile(&mut self, temp_id: &str, confirmed: Message) -> bool {
        match self.entries.iter_mut().find(|e| e.message.id == temp_id) {
            Some(entry) => {
                entry.message = confirmed;
                true
            }
            None => false,
        }
    }

    /// Remove the entry carrying `temp_id`, returning its message.
    pub fn rollback(&mut self, temp_id: &str) -> Option<Message> {
        let idx = self.entries.iter().position(|e| e.message.id == temp_id)?;
        Some(self.entries.remove(idx).message)
    }

    /// Update the server-maintained counters on the loaded conversation.
    pub fn set_stats(&mut self, stats: ConversationStats) {
        if let Some(conversation) = &mut self.conversation {
            conversation.stats = stats;
        }
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.as_ref()
    }

    /// All entries in rendering order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Messages in rendering order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().map(|e| &e.message)
    }

    pub fn message_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry still awaits confirmation.
    pub fn has_pending(&self) -> bool {
        self.entries.iter().any(|e| e.message.is_pending())
    }

    fn push(&mut self, message: Message) {
        let slot = self.next_slot;
        self.next_slot += 1;
        self.entries.push(Entry { slot, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temp_id;
    use crate::types::{ConversationStatus, Participant, SenderRole};

    fn sender() -> Participant {
        Participant::new("u1", SenderRole::Initiator)
    }

    fn server_message(id: &str, seq: u32) -> Message {
        Message {
            id: id.to_string(),
            conversation_id: "c1".to_string(),
            sender_id: "u2".to_string(),
            sender_role: SenderRole::Counterparty,
            body: format!("message {}", seq),
            sequence_number: seq,
            created_at: chrono::Utc::now(),
        }
    }

    fn loaded_store() -> ConversationStore {
        let mut store = ConversationStore::new();
        store.load(
            Conversation::open("c1", Vec::new()),
            vec![server_message("m1", 1), server_message("m2", 2)],
        );
        store
    }

    #[test]
    fn test_append_then_reconcile_preserves_position() {
        let mut store = loaded_store();
        let tid = temp_id::mint();
        let placeholder = Message::optimistic(&tid, "c1", &sender(), "hello", 3);
        store.append_optimistic(placeholder).unwrap();
        assert_eq!(store.message_count(), 3);

        let confirmed = server_message("m99", 3);
        assert!(store.reconcile(&tid, confirmed.clone()));

        assert_eq!(store.message_count(), 3);
        assert_eq!(store.entries()[2].message, confirmed);
        assert!(!store.entries()[2].message.is_pending());
    }

    #[test]
    fn test_reconcile_keeps_slot() {
        let mut store = loaded_store();
        let tid = temp_id::mint();
        store
            .append_optimistic(Message::optimistic(&tid, "c1", &sender(), "hello", 3))
            .unwrap();
        let slot_before = store.entries()[2].slot;

        store.reconcile(&tid, server_message("m99", 3));
        assert_eq!(store.entries()[2].slot, slot_before);
    }

    #[test]
    fn test_reconcile_unknown_temp_id_drops_message() {
        let mut store = loaded_store();
        assert!(!store.reconcile("temp-0-gone", server_message("m99", 3)));
        assert_eq!(store.message_count(), 2);
    }

    #[test]
    fn test_rollback_removes_exactly_one() {
        let mut store = loaded_store();
        let tid = temp_id::mint();
        store
            .append_optimistic(Message::optimistic(&tid, "c1", &sender(), "hello", 3))
            .unwrap();

        let removed = store.rollback(&tid).unwrap();
        assert_eq!(removed.body, "hello");
        assert_eq!(store.message_count(), 2);
        assert_eq!(store.entries()[0].message.id, "m1");
        assert_eq!(store.entries()[1].message.id, "m2");
    }

    #[test]
    fn test_rollback_unknown_temp_id_is_noop() {
        let mut store = loaded_store();
        assert!(store.rollback("temp-0-gone").is_none());
        assert_eq!(store.message_count(), 2);
    }

    #[test]
    fn test_load_is_full_replace() {
        let mut store = loaded_store();
        store
            .append_optimistic(Message::optimistic(
                &temp_id::mint(),
                "c1",
                &sender(),
                "hello",
                3,
            ))
            .unwrap();

        let fresh = vec![
            server_message("m1", 1),
            server_message("m2", 2),
            server_message("m3", 3),
        ];
        store.load(Conversation::open("c1", Vec::new()), fresh.clone());

        let messages: Vec<&Message> = store.messages().collect();
        assert_eq!(messages.len(), 3);
        for (got, want) in messages.iter().zip(fresh.iter()) {
            assert_eq!(*got, want);
        }
        assert!(!store.has_pending());
    }

    #[test]
    fn test_slots_stay_unique_across_reload() {
        let mut store = loaded_store();
        let old_slots: Vec<u64> = store.entries().iter().map(|e| e.slot).collect();

        store.load(
            Conversation::open("c1", Vec::new()),
            vec![server_message("m1", 1)],
        );
        for entry in store.entries() {
            assert!(!old_slots.contains(&entry.slot));
        }
    }

    #[test]
    fn test_append_to_closed_conversation_rejected() {
        let mut store = ConversationStore::new();
        store.load(
            Conversation::new("c1", ConversationStatus::Closed, Vec::new()),
            Vec::new(),
        );

        let result = store.append_optimistic(Message::optimistic(
            &temp_id::mint(),
            "c1",
            &sender(),
            "hello",
            1,
        ));
        assert!(matches!(result, Err(Error::ConversationClosed)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_stats() {
        let mut store = loaded_store();
        store.set_stats(ConversationStats {
            total_responses: 9,
            last_activity: None,
        });
        assert_eq!(store.conversation().unwrap().stats.total_responses, 9);
    }
}
