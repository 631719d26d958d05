//! One-time chat acceptance side effect.

use std::sync::Arc;

use tracing::{debug, warn};

use roost_service_traits::MessageService;

/// Fires the acceptance request for a chat the local user has not yet
/// accepted. Issues exactly one request per invocation with no internal
/// deduplication — idempotence comes from the caller checking
/// `chat.accepted` before invoking.
pub struct AcceptanceCoordinator<S: ?Sized> {
    service: Arc<S>,
}

impl<S: MessageService + ?Sized> AcceptanceCoordinator<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    /// Request the accepted transition. Failure is logged and not
    /// surfaced to the user; the accompanying send is unaffected.
    pub async fn accept(&self, chat_id: &str) {
        match self.service.accept_chat(chat_id).await {
            Ok(()) => debug!(chat_id, "chat accepted"),
            Err(error) => warn!(chat_id, error = %error, "chat accept request failed"),
        }
    }
}
