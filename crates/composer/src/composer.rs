//! The composer: owns the draft for one open chat panel, admits and runs
//! upload batches, and coordinates send attempts with optimistic clearing
//! and rollback.

use std::sync::{Arc, Mutex, MutexGuard};

use {
    tokio::{sync::broadcast, task::JoinHandle},
    tracing::{debug, warn},
};

use {
    roost_common::{Attachment, Chat, ChatMessage, FileSource},
    roost_service_traits::{
        MessageService, Notice, NoticeSink, NoopNoticeSink, SendError, UploadService,
    },
};

use crate::{
    accept::AcceptanceCoordinator,
    config::ComposerConfig,
    draft::DraftState,
    error::{Error, Result},
    events::{ComposerEvent, EVENT_BUFFER},
    send::{GENERIC_SEND_FAILURE, OutgoingSend, SendOutcome, SendState},
    upload,
};

struct Inner {
    draft: DraftState,
    send: SendState,
}

/// One composer per open chat panel. All mutation goes through short
/// critical sections; the only suspension points are the network awaits.
pub struct Composer<S> {
    services: Arc<S>,
    config: ComposerConfig,
    notices: Arc<dyn NoticeSink>,
    inner: Arc<Mutex<Inner>>,
    events: broadcast::Sender<ComposerEvent>,
}

impl<S> Composer<S> {
    pub fn new(services: Arc<S>, config: ComposerConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            services,
            config,
            notices: Arc::new(NoopNoticeSink),
            inner: Arc::new(Mutex::new(Inner {
                draft: DraftState::default(),
                send: SendState::Idle,
            })),
            events,
        }
    }

    /// Route notices (the attachment-limit toast) to the host's sink.
    #[must_use]
    pub fn with_notice_sink(mut self, notices: Arc<dyn NoticeSink>) -> Self {
        self.notices = notices;
        self
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Subscribe to composer events (upload progress, draft clears).
    pub fn subscribe(&self) -> broadcast::Receiver<ComposerEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the current draft state.
    pub fn draft(&self) -> DraftState {
        self.lock().draft.clone()
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.lock().send, SendState::Sending { .. })
    }

    /// Message of the most recent failed send attempt, if the composer is
    /// currently in the failed state.
    pub fn send_failure(&self) -> Option<String> {
        match &self.lock().send {
            SendState::Failed { message, .. } => Some(message.clone()),
            _ => None,
        }
    }

    // ── Draft mutation ───────────────────────────────────────────────────

    pub fn append_text(&self, text: &str) {
        self.lock().draft.append_text(text);
    }

    pub fn insert_newline(&self) {
        self.lock().draft.insert_newline();
    }

    /// Replace the attachment sequence wholesale.
    pub fn set_attachments(&self, attachments: Vec<Attachment>) {
        self.lock().draft.set_attachments(attachments);
    }

    /// Remove one attachment by index; no network call, the server-side
    /// media object is simply never referenced.
    pub fn remove_attachment(&self, index: usize) {
        self.lock().draft.remove_attachment(index);
    }

    /// Reset the draft (user cancel). Bumps the reset epoch so the bound
    /// input widget clears too.
    pub fn clear(&self) {
        let epoch = self.lock().draft.clear();
        let _ = self.events.send(ComposerEvent::DraftCleared { epoch });
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<S: UploadService> Composer<S> {
    /// Upload a batch of files and append the resulting attachments to
    /// the draft.
    ///
    /// Admission is checked once, before any network call: a selection
    /// that would exceed the attachment limit fails with
    /// [`Error::AttachmentLimit`] and raises the limit notice, and a
    /// batch submitted while another is in flight fails with
    /// [`Error::UploadInFlight`]. An admitted batch is all-or-nothing:
    /// on failure the draft's attachments are untouched and the counters
    /// return to idle.
    pub async fn attach_files(&self, files: Vec<FileSource>) -> Result<()> {
        if files.is_empty() {
            return Err(Error::EmptyBatch);
        }
        let count = files.len();
        let limit = self.config.attachment_limit;
        {
            let mut inner = self.lock();
            if inner.draft.pending_upload_count > 0 {
                return Err(Error::UploadInFlight);
            }
            if inner.draft.attachments.len() + count > limit {
                drop(inner);
                debug!(count, limit, "attachment selection over limit");
                self.notices.notice(Notice::AttachmentLimitExceeded { limit });
                return Err(Error::AttachmentLimit { limit });
            }
            inner.draft.pending_upload_count = count;
            inner.draft.upload_progress = 0.0;
        }

        let progress: Arc<dyn Fn(f32) + Send + Sync> = {
            let inner = Arc::clone(&self.inner);
            let events = self.events.clone();
            Arc::new(move |mean: f32| {
                let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
                inner.draft.upload_progress = mean;
                drop(inner);
                let _ = events.send(ComposerEvent::UploadProgress { progress: mean });
            })
        };

        let result = upload::run_batch(self.services.as_ref(), files, progress).await;

        let mut inner = self.lock();
        inner.draft.pending_upload_count = 0;
        inner.draft.upload_progress = 0.0;
        let uploaded = result?;
        inner.draft.attachments.extend(uploaded);
        Ok(())
    }

    /// Route a clipboard paste into the upload pipeline. The paste is
    /// taken only when nothing is typed or attached and it carries
    /// exactly one file; returns whether it was taken.
    pub async fn paste_files(&self, files: Vec<FileSource>) -> Result<bool> {
        let take = files.len() == 1 && self.lock().draft.is_empty();
        if !take {
            return Ok(false);
        }
        self.attach_files(files).await.map(|()| true)
    }
}

impl<S: MessageService> Composer<S> {
    /// Start a send attempt: capture the payload, optimistically clear
    /// the draft, and move to the sending state.
    ///
    /// Returns `None` — leaving all state untouched — when the draft is
    /// empty or a send is already in flight (re-entrancy guard). The
    /// returned [`OutgoingSend`] says whether the chat still needs its
    /// one-time acceptance request.
    pub fn begin_send(&self, chat: &Chat) -> Option<OutgoingSend> {
        let (message, epoch) = {
            let mut inner = self.lock();
            if matches!(inner.send, SendState::Sending { .. }) {
                debug!(chat_id = %chat.id, "send already in flight");
                return None;
            }
            if inner.draft.is_empty() {
                return None;
            }
            let snapshot = inner.draft.snapshot();
            let message = snapshot.outgoing(&chat.id);
            let epoch = inner.draft.clear();
            inner.send = SendState::Sending { snapshot };
            (message, epoch)
        };
        let _ = self.events.send(ComposerEvent::DraftCleared { epoch });
        Some(OutgoingSend {
            message,
            needs_accept: !chat.accepted,
        })
    }

    /// Reconcile a settled send attempt back into the draft.
    ///
    /// Success returns to idle and clears `last_error`. A recoverable
    /// failure (HTTP or transport) restores the pre-send content —
    /// attachments are consumed and not restored — and records the most
    /// specific available message. Any other failure is returned to the
    /// caller untouched.
    pub fn finish_send(
        &self,
        outcome: std::result::Result<ChatMessage, SendError>,
    ) -> Result<SendOutcome> {
        let mut inner = self.lock();
        let snapshot = match std::mem::take(&mut inner.send) {
            SendState::Sending { snapshot } => snapshot,
            state => {
                warn!("finish_send without a send in flight");
                inner.send = state;
                return Ok(SendOutcome::Skipped);
            },
        };
        match outcome {
            Ok(message) => {
                debug!(id = %message.id, chat_id = %message.chat_id, "chat message delivered");
                inner.draft.last_error = None;
                Ok(SendOutcome::Delivered(message))
            },
            Err(error) if error.is_recoverable() => {
                let text = error
                    .server_message()
                    .map(str::to_owned)
                    .unwrap_or_else(|| GENERIC_SEND_FAILURE.to_owned());
                warn!(error = %error, "send failed, restoring draft content");
                inner.draft.content = snapshot.content.clone();
                inner.draft.last_error = Some(text.clone());
                inner.send = SendState::Failed {
                    snapshot,
                    message: text.clone(),
                };
                Ok(SendOutcome::Recovered { error: text })
            },
            Err(error) => {
                inner.send = SendState::Idle;
                Err(Error::Send(error))
            },
        }
    }

    /// Drive one send attempt to completion: begin, deliver, reconcile.
    ///
    /// When the chat is unaccepted the acceptance request runs
    /// concurrently with the delivery; neither gates the other and their
    /// completion order is unconstrained.
    pub async fn send_now(&self, chat: &Chat) -> Result<SendOutcome> {
        let Some(OutgoingSend {
            message,
            needs_accept,
        }) = self.begin_send(chat)
        else {
            return Ok(SendOutcome::Skipped);
        };
        let outcome = if needs_accept {
            let coordinator = AcceptanceCoordinator::new(Arc::clone(&self.services));
            let (outcome, ()) = tokio::join!(
                self.services.send_message(&message),
                coordinator.accept(&chat.id),
            );
            outcome
        } else {
            self.services.send_message(&message).await
        };
        self.finish_send(outcome)
    }
}

impl<S: MessageService + 'static> Composer<S> {
    /// Fire-and-forget send. The draft is cleared before this returns;
    /// delivery and reconciliation run in a spawned task whose handle
    /// carries any unrecoverable error. Returns `None` when there was
    /// nothing to send or a send is already in flight.
    pub fn send(self: Arc<Self>, chat: &Chat) -> Option<JoinHandle<Result<SendOutcome>>> {
        let OutgoingSend {
            message,
            needs_accept,
        } = self.begin_send(chat)?;
        if needs_accept {
            let coordinator = AcceptanceCoordinator::new(Arc::clone(&self.services));
            let chat_id = message.chat_id.clone();
            tokio::spawn(async move { coordinator.accept(&chat_id).await });
        }
        Some(tokio::spawn(async move {
            let outcome = self.services.send_message(&message).await;
            self.finish_send(outcome)
        }))
    }
}
