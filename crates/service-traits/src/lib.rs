//! Service trait seams between the composer pipeline and the network layer.
//!
//! Each trait has a `Noop` implementation that fails or drops requests,
//! allowing hosts and tests to construct a composer before the real API
//! client is wired in.

use std::error::Error as StdError;

use {
    async_trait::async_trait,
    tracing::{debug, warn},
};

use roost_common::{Attachment, ChatMessage, FileSource, OutgoingMessage};

/// Per-chunk upload progress callback: `(loaded_bytes, total_bytes)`.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send + Sync>;

// ── Errors ──────────────────────────────────────────────────────────────────

/// Failure uploading a single file. Any occurrence discards the batch the
/// file belonged to.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The server answered with a non-success status.
    #[error("upload rejected: HTTP {status}")]
    Http {
        status: u16,
        server_message: Option<String>,
    },

    /// The request never produced an HTTP response.
    #[error("upload transport failure: {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The upload service is not configured or not ready.
    #[error("upload unavailable: {message}")]
    Unavailable { message: String },

    /// Anything else (malformed response body, task failure).
    #[error("unexpected upload failure: {context}: {source}")]
    Unexpected {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl UploadError {
    #[must_use]
    pub fn http(status: u16, server_message: Option<String>) -> Self {
        Self::Http {
            status,
            server_message,
        }
    }

    #[must_use]
    pub fn transport(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            context: context.into(),
            source: Box::new(source),
        }
    }

    #[must_use]
    pub fn unavailable(message: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn unexpected(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Unexpected {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Failure submitting a chat message.
///
/// `Http` and `Transport` are recovered locally by the pipeline (content
/// restored, `last_error` set); everything else is surfaced to the caller
/// untouched.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The server answered with a non-success status, optionally carrying a
    /// human-readable `error` field in the body.
    #[error("send rejected: HTTP {status}")]
    Http {
        status: u16,
        server_message: Option<String>,
    },

    /// The request never produced an HTTP response.
    #[error("send transport failure: {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The message service is not configured or not ready.
    #[error("send unavailable: {message}")]
    Unavailable { message: String },

    /// Anything else. Never recovered, never retried.
    #[error("unexpected send failure: {context}: {source}")]
    Unexpected {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl SendError {
    #[must_use]
    pub fn http(status: u16, server_message: Option<String>) -> Self {
        Self::Http {
            status,
            server_message,
        }
    }

    #[must_use]
    pub fn transport(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            context: context.into(),
            source: Box::new(source),
        }
    }

    #[must_use]
    pub fn unavailable(message: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn unexpected(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Unexpected {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Whether the pipeline restores the draft content for this failure.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Transport { .. })
    }

    /// Server-supplied error text, when the server sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { server_message, .. } => server_message.as_deref(),
            _ => None,
        }
    }
}

/// Failure accepting a chat. Logged by the pipeline, never surfaced.
#[derive(Debug, thiserror::Error)]
pub enum AcceptError {
    #[error("accept rejected: HTTP {status}")]
    Http { status: u16 },

    #[error("accept transport failure: {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("accept unavailable: {message}")]
    Unavailable { message: String },
}

impl AcceptError {
    #[must_use]
    pub fn http(status: u16) -> Self {
        Self::Http { status }
    }

    #[must_use]
    pub fn transport(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            context: context.into(),
            source: Box::new(source),
        }
    }

    #[must_use]
    pub fn unavailable(message: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            message: message.to_string(),
        }
    }
}

// ── Upload ──────────────────────────────────────────────────────────────────

/// One-file-per-call media upload endpoint.
#[async_trait]
pub trait UploadService: Send + Sync {
    /// Upload one file, reporting per-chunk progress through `progress`.
    async fn upload(
        &self,
        file: FileSource,
        progress: ProgressFn,
    ) -> Result<Attachment, UploadError>;
}

pub struct NoopUploadService;

#[async_trait]
impl UploadService for NoopUploadService {
    async fn upload(
        &self,
        file: FileSource,
        _progress: ProgressFn,
    ) -> Result<Attachment, UploadError> {
        debug!(file = %file.file_name, "upload service not configured");
        Err(UploadError::unavailable("upload service not configured"))
    }
}

// ── Messages ────────────────────────────────────────────────────────────────

/// Chat message endpoints: send and one-time acceptance.
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Submit a completed draft to the chat message endpoint.
    async fn send_message(&self, message: &OutgoingMessage) -> Result<ChatMessage, SendError>;

    /// Mark a chat as accepted by the local user.
    async fn accept_chat(&self, chat_id: &str) -> Result<(), AcceptError>;
}

pub struct NoopMessageService;

#[async_trait]
impl MessageService for NoopMessageService {
    async fn send_message(&self, message: &OutgoingMessage) -> Result<ChatMessage, SendError> {
        debug!(chat_id = %message.chat_id, "message service not configured");
        Err(SendError::unavailable("message service not configured"))
    }

    async fn accept_chat(&self, chat_id: &str) -> Result<(), AcceptError> {
        debug!(chat_id, "message service not configured");
        Err(AcceptError::unavailable("message service not configured"))
    }
}

// ── Notices ─────────────────────────────────────────────────────────────────

/// User-facing notices the pipeline raises outside the draft state (the
/// host renders them as toasts or equivalent).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The user tried to attach more files than the server allows.
    AttachmentLimitExceeded { limit: usize },
}

/// Sink for notices — the host provides the concrete implementation.
pub trait NoticeSink: Send + Sync {
    fn notice(&self, notice: Notice);
}

/// Drops notices, logging them at warn level.
pub struct NoopNoticeSink;

impl NoticeSink for NoopNoticeSink {
    fn notice(&self, notice: Notice) {
        warn!(?notice, "notice dropped (no sink configured)");
    }
}
