//! Shared domain types used across all roost crates.

pub mod types;

pub use types::{Attachment, Chat, ChatMessage, FileSource, MediaKind, OutgoingMessage};
