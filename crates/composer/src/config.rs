use serde::{Deserialize, Serialize};

/// Fallback attachment limit when the host supplies no instance value.
pub const DEFAULT_ATTACHMENT_LIMIT: usize = 4;

/// Composer configuration supplied by the hosting application, typically
/// from the instance configuration fetched at session start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Maximum attachments per message. Admission-checked before any
    /// upload request is issued.
    #[serde(default = "default_attachment_limit")]
    pub attachment_limit: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            attachment_limit: DEFAULT_ATTACHMENT_LIMIT,
        }
    }
}

fn default_attachment_limit() -> usize {
    DEFAULT_ATTACHMENT_LIMIT
}
