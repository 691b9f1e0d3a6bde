//! Transcript model
//!
//! The transcript is append-only. Assistant replies that are still being
//! composed are appended as pending entries and finalized exactly once
//! through the [`PendingEntry`] handle returned when they were created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::warn;
use uuid::Uuid;
use crate::utils::helpers::generate_uuid;

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum EntryBody {
    Pending { placeholder: String },
    Final { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub body: EntryBody,
}

impl TranscriptEntry {
    fn new(role: Role, body: EntryBody) -> Self {
        Self {
            id: generate_uuid(),
            role,
            created_at: Utc::now(),
            body,
        }
    }

    /// Current visible text: the placeholder while pending, the final text after
    pub fn text(&self) -> &str {
        match &self.body {
            EntryBody::Pending { placeholder } => placeholder,
            EntryBody::Final { text } => text,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.body, EntryBody::Pending { .. })
    }
}

/// Change notifications for renderers
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEvent {
    Appended(TranscriptEntry),
    /// A pending entry changed its placeholder text
    Updated(TranscriptEntry),
    Finalized(TranscriptEntry),
}

/// Handle to a pending entry. Consumed when the entry is finalized.
#[derive(Debug)]
#[must_use = "a pending entry must be finalized"]
pub struct PendingEntry {
    id: Uuid,
}

impl PendingEntry {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    events: broadcast::Sender<TranscriptEvent>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: Vec::new(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.events.subscribe()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn get(&self, id: Uuid) -> Option<&TranscriptEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_pending()).count()
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> Uuid {
        self.push_final(Role::User, text.into())
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> Uuid {
        self.push_final(Role::Assistant, text.into())
    }

    pub fn push_system(&mut self, text: impl Into<String>) -> Uuid {
        self.push_final(Role::System, text.into())
    }

    /// Append an assistant entry whose content is not known yet
    pub fn begin_assistant(&mut self, placeholder: impl Into<String>) -> PendingEntry {
        let entry = TranscriptEntry::new(
            Role::Assistant,
            EntryBody::Pending { placeholder: placeholder.into() },
        );
        let id = entry.id;
        self.append(entry);
        PendingEntry { id }
    }

    /// Replace the placeholder text of a still-pending entry
    pub fn update_placeholder(&mut self, pending: &PendingEntry, placeholder: impl Into<String>) {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == pending.id) else {
            warn!(entry_id = %pending.id, "Pending entry not found in transcript");
            return;
        };

        entry.body = EntryBody::Pending { placeholder: placeholder.into() };
        let _ = self.events.send(TranscriptEvent::Updated(entry.clone()));
    }

    /// Resolve a pending entry with its final text
    pub fn finalize(&mut self, pending: PendingEntry, text: impl Into<String>) {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == pending.id) else {
            warn!(entry_id = %pending.id, "Pending entry not found in transcript");
            return;
        };

        entry.body = EntryBody::Final { text: text.into() };
        let _ = self.events.send(TranscriptEvent::Finalized(entry.clone()));
    }

    fn push_final(&mut self, role: Role, text: String) -> Uuid {
        let entry = TranscriptEntry::new(role, EntryBody::Final { text });
        let id = entry.id;
        self.append(entry);
        id
    }

    fn append(&mut self, entry: TranscriptEntry) {
        // A send error only means nobody is listening
        let _ = self.events.send(TranscriptEvent::Appended(entry.clone()));
        self.entries.push(entry);
    }
}
