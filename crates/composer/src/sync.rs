//! One-directional reconciliation between the composer and the bound
//! text-input widget.
//!
//! Some native text controls retain their own value independently of the
//! host framework's state path; assigning through the framework does not
//! reach listeners attached to the control itself (auto-resize, height
//! tracking). The composer therefore never touches the widget — it only
//! emits [`ComposerEvent::DraftCleared`] with a version token, and the
//! widget-binding layer owns reconciliation through this module.

use {
    tokio::sync::broadcast,
    tracing::{debug, warn},
};

use crate::events::ComposerEvent;

/// Widget-side binding the host implements.
pub trait InputBinding: Send + Sync {
    /// Force the native control's retained value to empty and fire the
    /// control's own change notification so listeners bound to the widget
    /// (auto-resize and the like) recompute.
    fn clear_input(&self);
}

/// Applies draft-clear events to an [`InputBinding`], at most once per
/// reset epoch.
pub struct InputSynchronizer<B> {
    binding: B,
    last_epoch: u64,
}

impl<B: InputBinding> InputSynchronizer<B> {
    pub fn new(binding: B) -> Self {
        Self {
            binding,
            last_epoch: 0,
        }
    }

    /// Apply one composer event. Returns whether the widget was cleared.
    /// Stale and duplicate epochs are skipped; epochs only move forward.
    pub fn observe(&mut self, event: &ComposerEvent) -> bool {
        let ComposerEvent::DraftCleared { epoch } = event else {
            return false;
        };
        if *epoch <= self.last_epoch {
            debug!(epoch, last = self.last_epoch, "stale reset epoch skipped");
            return false;
        }
        self.last_epoch = *epoch;
        self.binding.clear_input();
        true
    }

    /// Drive the synchronizer over a composer event stream until the
    /// composer is dropped. A lagged stream resynchronizes on the next
    /// event; epoch monotonicity makes dropped events harmless.
    pub async fn run(mut self, mut events: broadcast::Receiver<ComposerEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    self.observe(&event);
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "composer event stream lagged");
                },
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}
