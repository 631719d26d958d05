use roost_common::{Attachment, OutgoingMessage};

/// In-memory state of the message being composed.
///
/// Created empty when a composer is constructed, mutated through the
/// composer's operations, and discarded when the composer is dropped —
/// drafts are never persisted.
#[derive(Debug, Clone, Default)]
pub struct DraftState {
    /// Current unsent text.
    pub content: String,
    /// Attachments ready to send, insertion order preserved. Order is the
    /// order of `media_ids` in the outgoing payload.
    pub attachments: Vec<Attachment>,
    /// Files currently uploading as a batch; 0 when idle.
    pub pending_upload_count: usize,
    /// Aggregate progress of the current batch, in `[0, 1]`.
    pub upload_progress: f32,
    /// Human-readable message from the most recent failed send.
    pub last_error: Option<String>,
    /// Monotonically increasing token bumped on every clear; drives the
    /// input synchronizer.
    pub reset_epoch: u64,
}

impl DraftState {
    /// A draft with no text and no attachments cannot be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.attachments.is_empty()
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub(crate) fn insert_newline(&mut self) {
        self.content.push('\n');
    }

    pub(crate) fn set_attachments(&mut self, attachments: Vec<Attachment>) {
        self.attachments = attachments;
    }

    /// Remove one attachment by index. Out-of-range indices are ignored.
    pub(crate) fn remove_attachment(&mut self, index: usize) {
        if index < self.attachments.len() {
            self.attachments.remove(index);
        }
    }

    /// Reset content, attachments, and upload counters, and bump the reset
    /// epoch. `last_error` is left alone; it is cleared by a successful
    /// send, not by clearing the draft. Returns the new epoch.
    pub(crate) fn clear(&mut self) -> u64 {
        self.content.clear();
        self.attachments.clear();
        self.pending_upload_count = 0;
        self.upload_progress = 0.0;
        self.reset_epoch += 1;
        self.reset_epoch
    }

    pub(crate) fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            content: self.content.clone(),
            attachments: self.attachments.clone(),
        }
    }
}

/// Immutable capture of the sendable fields of a draft, taken at
/// `begin_send` time and retained for rollback.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftSnapshot {
    pub content: String,
    pub attachments: Vec<Attachment>,
}

impl DraftSnapshot {
    /// Build the outgoing payload for `chat_id` from this snapshot.
    #[must_use]
    pub fn outgoing(&self, chat_id: &str) -> OutgoingMessage {
        OutgoingMessage {
            chat_id: chat_id.to_owned(),
            content: self.content.clone(),
            media_ids: self.attachments.iter().map(|a| a.id.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(id: &str) -> Attachment {
        Attachment {
            id: id.into(),
            kind: roost_common::MediaKind::Image,
            url: String::new(),
            preview_url: None,
            description: None,
        }
    }

    #[test]
    fn append_and_newline() {
        let mut draft = DraftState::default();
        draft.append_text("hello");
        draft.insert_newline();
        draft.append_text("world");
        assert_eq!(draft.content, "hello\nworld");
    }

    #[test]
    fn remove_attachment_ignores_out_of_range() {
        let mut draft = DraftState::default();
        draft.set_attachments(vec![attachment("a"), attachment("b")]);
        draft.remove_attachment(5);
        assert_eq!(draft.attachments.len(), 2);
        draft.remove_attachment(0);
        assert_eq!(draft.attachments.len(), 1);
        assert_eq!(draft.attachments[0].id, "b");
    }

    #[test]
    fn clear_bumps_epoch_and_keeps_last_error() {
        let mut draft = DraftState {
            content: "text".into(),
            attachments: vec![attachment("a")],
            pending_upload_count: 2,
            upload_progress: 0.4,
            last_error: Some("previous failure".into()),
            reset_epoch: 7,
        };
        let epoch = draft.clear();
        assert_eq!(epoch, 8);
        assert!(draft.is_empty());
        assert_eq!(draft.pending_upload_count, 0);
        assert_eq!(draft.upload_progress, 0.0);
        assert_eq!(draft.last_error.as_deref(), Some("previous failure"));
    }

    #[test]
    fn snapshot_preserves_media_order() {
        let mut draft = DraftState::default();
        draft.append_text("hi");
        draft.set_attachments(vec![attachment("first"), attachment("second")]);
        let outgoing = draft.snapshot().outgoing("chat-1");
        assert_eq!(outgoing.chat_id, "chat-1");
        assert_eq!(outgoing.media_ids, vec!["first", "second"]);
    }
}
