//! Thin authenticated wrapper around `reqwest::Client`.

use {reqwest::Method, tracing::debug, url::Url};

use crate::{
    Result,
    error::{Error, ErrorBody},
};

/// HTTP client bound to a single Pleroma/Rebased instance.
///
/// Cloning is cheap; all clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url` (scheme and host, no trailing path).
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
            token: None,
        })
    }

    /// Attach an OAuth bearer token to every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Turn a non-success response into [`Error::Http`], decoding the
    /// structured error body when the server sent one.
    pub(crate) async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body: ErrorBody = response.json().await.unwrap_or_default();
        debug!(status = status.as_u16(), message = ?body.error, "api request rejected");
        Err(Error::Http {
            status: status.as_u16(),
            server_message: body.error,
        })
    }
}
