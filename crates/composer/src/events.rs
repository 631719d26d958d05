use serde::Serialize;

/// Buffered events per composer; slow subscribers observe a lag error and
/// resynchronize from the next event.
pub(crate) const EVENT_BUFFER: usize = 64;

/// Events emitted by the composer for the host UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComposerEvent {
    /// Aggregate progress of the in-flight upload batch, in `[0, 1]`.
    UploadProgress { progress: f32 },

    /// The draft was cleared; `epoch` identifies the clear generation.
    /// The input synchronizer reacts to this by clearing the bound widget.
    DraftCleared { epoch: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_tagged() {
        let json = serde_json::to_value(ComposerEvent::DraftCleared { epoch: 3 }).unwrap();
        assert_eq!(json["kind"], "draft_cleared");
        assert_eq!(json["epoch"], 3);

        let json = serde_json::to_value(ComposerEvent::UploadProgress { progress: 0.5 }).unwrap();
        assert_eq!(json["kind"], "upload_progress");
    }
}
