//! Service trait implementations backed by the REST endpoints.

use async_trait::async_trait;

use {
    roost_common::{Attachment, ChatMessage, FileSource, OutgoingMessage},
    roost_service_traits::{
        AcceptError, MessageService, ProgressFn, SendError, UploadError, UploadService,
    },
};

use crate::{ApiClient, Error};

#[async_trait]
impl UploadService for ApiClient {
    async fn upload(
        &self,
        file: FileSource,
        progress: ProgressFn,
    ) -> Result<Attachment, UploadError> {
        self.upload_media(file, progress)
            .await
            .map_err(Error::into_upload_error)
    }
}

#[async_trait]
impl MessageService for ApiClient {
    async fn send_message(&self, message: &OutgoingMessage) -> Result<ChatMessage, SendError> {
        self.send_chat_message(message)
            .await
            .map_err(Error::into_send_error)
    }

    async fn accept_chat(&self, chat_id: &str) -> Result<(), AcceptError> {
        // The inherent method; this impl discards the returned chat entity.
        ApiClient::accept_chat(self, chat_id)
            .await
            .map(|_| ())
            .map_err(Error::into_accept_error)
    }
}
