//! Chat message composition and delivery pipeline.
//!
//! A [`Composer`] owns one draft (text plus pending attachments) for one
//! open chat panel. File selections fan out into concurrent uploads with
//! all-or-nothing settlement; sends clear the draft optimistically and
//! reconcile failures back into it; the first send into an unaccepted
//! chat triggers a one-time acceptance request. The network sits behind
//! the `roost-service-traits` seams, so hosts and tests can swap in any
//! implementation.

pub mod accept;
pub mod composer;
pub mod config;
pub mod draft;
pub mod error;
pub mod events;
pub mod send;
pub mod sync;
mod upload;

pub use {
    accept::AcceptanceCoordinator,
    composer::Composer,
    config::{ComposerConfig, DEFAULT_ATTACHMENT_LIMIT},
    draft::{DraftSnapshot, DraftState},
    error::{Error, Result},
    events::ComposerEvent,
    send::{GENERIC_SEND_FAILURE, OutgoingSend, SendOutcome},
    sync::{InputBinding, InputSynchronizer},
};
