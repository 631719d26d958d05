//! Chat endpoints: message submission and one-time acceptance.

use {reqwest::Method, tracing::debug};

use roost_common::{Chat, ChatMessage, OutgoingMessage};

use crate::{ApiClient, Result};

impl ApiClient {
    /// Submit a chat message: `POST /api/v1/pleroma/chats/{id}/messages`.
    ///
    /// The body carries `content` and `media_ids` in attachment insertion
    /// order; the chat id travels in the path.
    pub async fn send_chat_message(&self, message: &OutgoingMessage) -> Result<ChatMessage> {
        let url = self.endpoint(&format!(
            "/api/v1/pleroma/chats/{}/messages",
            message.chat_id
        ))?;
        debug!(
            chat_id = %message.chat_id,
            media = message.media_ids.len(),
            "sending chat message"
        );
        let response = self.request(Method::POST, url).json(message).send().await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    /// Accept a pending chat: `POST /api/v1/pleroma/chats/{id}/accept`.
    pub async fn accept_chat(&self, chat_id: &str) -> Result<Chat> {
        let url = self.endpoint(&format!("/api/v1/pleroma/chats/{chat_id}/accept"))?;
        debug!(chat_id, "accepting chat");
        let response = self.request(Method::POST, url).send().await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }
}
