use {
    bytes::Bytes,
    serde::{Deserialize, Serialize},
};

// ── Attachments ─────────────────────────────────────────────────────────────

/// Media category reported by the server for an uploaded attachment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MediaKind {
    Image,
    Video,
    Gifv,
    Audio,
    /// Any `type` string this client does not recognize.
    #[default]
    Unknown,
}

impl From<String> for MediaKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            "gifv" => Self::Gifv,
            "audio" => Self::Audio,
            _ => Self::Unknown,
        }
    }
}

/// A media attachment created by the upload endpoint.
///
/// Attachments are produced exclusively by the server; the composer never
/// fabricates one. Field layout follows the Pleroma media entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: MediaKind,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A user-picked file queued for upload.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl FileSource {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ── Chats ───────────────────────────────────────────────────────────────────

/// The remote chat a composer is bound to.
///
/// Only `id` and `accepted` are consumed by the pipeline; `accepted` gates
/// the one-time acceptance request issued alongside the first send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    #[serde(default)]
    pub accepted: bool,
}

impl Chat {
    pub fn new(id: impl Into<String>, accepted: bool) -> Self {
        Self {
            id: id.into(),
            accepted,
        }
    }
}

/// Immutable payload for one send attempt, captured from a draft snapshot.
///
/// `media_ids` preserves attachment insertion order; the server renders
/// attachments in the order given here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    #[serde(skip)]
    pub chat_id: String,
    pub content: String,
    pub media_ids: Vec<String>,
}

/// A chat message as returned by the send endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub chat_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
