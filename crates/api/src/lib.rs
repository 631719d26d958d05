//! reqwest client for the Pleroma/Rebased chat API.
//!
//! Implements the roost service traits: media upload with streaming
//! progress, chat message submission, and chat acceptance, plus the
//! instance configuration fetch hosts use to discover attachment limits.

pub mod chats;
pub mod client;
pub mod error;
pub mod instance;
pub mod media;
mod services;

pub use {
    client::ApiClient,
    error::{Error, Result},
    instance::{ChatConfiguration, DEFAULT_MAX_MEDIA_ATTACHMENTS, Instance, InstanceConfiguration},
};
