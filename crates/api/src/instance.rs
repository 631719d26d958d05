//! Instance configuration: `GET /api/v1/instance`.
//!
//! Hosts fetch this once per session to discover the chat attachment
//! limit before constructing a composer.

use {reqwest::Method, serde::Deserialize};

use crate::{ApiClient, Result};

/// Fallback when the instance omits a chat attachment limit.
pub const DEFAULT_MAX_MEDIA_ATTACHMENTS: usize = 4;

/// Subset of the instance entity this client consumes. Unknown fields are
/// ignored and missing fields decode to defaults so older servers keep
/// working.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Instance {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub configuration: InstanceConfiguration,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceConfiguration {
    #[serde(default)]
    pub chats: ChatConfiguration,
}

/// Chat limits advertised by the instance.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfiguration {
    #[serde(default = "default_max_media_attachments")]
    pub max_media_attachments: usize,
}

impl Default for ChatConfiguration {
    fn default() -> Self {
        Self {
            max_media_attachments: DEFAULT_MAX_MEDIA_ATTACHMENTS,
        }
    }
}

fn default_max_media_attachments() -> usize {
    DEFAULT_MAX_MEDIA_ATTACHMENTS
}

impl ApiClient {
    /// Fetch the instance entity.
    pub async fn instance(&self) -> Result<Instance> {
        let url = self.endpoint("/api/v1/instance")?;
        let response = self.request(Method::GET, url).send().await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_instance_decodes_to_defaults() {
        let instance: Instance = serde_json::from_str("{}").unwrap();
        assert_eq!(
            instance.configuration.chats.max_media_attachments,
            DEFAULT_MAX_MEDIA_ATTACHMENTS
        );
    }

    #[test]
    fn configured_limit_is_decoded() {
        let instance: Instance = serde_json::from_value(serde_json::json!({
            "title": "example.com",
            "configuration": { "chats": { "max_media_attachments": 9 } }
        }))
        .unwrap();
        assert_eq!(instance.configuration.chats.max_media_attachments, 9);
    }

    #[tokio::test]
    async fn instance_fetch_decodes_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/instance")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "title": "roost test",
                    "configuration": { "chats": { "max_media_attachments": 2 } }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let instance = client.instance().await.unwrap();
        assert_eq!(instance.title, "roost test");
        assert_eq!(instance.configuration.chats.max_media_attachments, 2);
        mock.assert_async().await;
    }
}
