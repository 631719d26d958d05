//! Per-attempt send state machine: `Idle → Sending(snapshot) → { Idle |
//! Failed(snapshot, message) }`. The snapshot captured at `begin_send`
//! time is the rollback point; reconciliation in `finish_send` restores
//! content (never attachments) on recoverable failures.

use roost_common::{ChatMessage, OutgoingMessage};

use crate::draft::DraftSnapshot;

/// Shown when a send fails without a server-supplied message.
pub const GENERIC_SEND_FAILURE: &str = "Message failed to send.";

#[derive(Debug, Clone, Default)]
pub(crate) enum SendState {
    /// No send in flight.
    #[default]
    Idle,
    /// A request is in flight; the snapshot is the rollback point.
    Sending { snapshot: DraftSnapshot },
    /// The last attempt failed; content has been restored from the
    /// snapshot and `message` mirrors the draft's `last_error`.
    Failed {
        snapshot: DraftSnapshot,
        message: String,
    },
}

/// Everything `begin_send` hands to the delivery phase.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingSend {
    /// Immutable request payload captured from the draft.
    pub message: OutgoingMessage,
    /// The chat has not been accepted yet; delivery is accompanied by a
    /// one-time acceptance request that neither gates nor orders against
    /// the send itself.
    pub needs_accept: bool,
}

/// What a completed send attempt amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Nothing to send, or another send was already in flight.
    Skipped,
    /// The message was delivered.
    Delivered(ChatMessage),
    /// Delivery failed; content was restored and `last_error` set. The
    /// string is the message surfaced to the user.
    Recovered { error: String },
}
