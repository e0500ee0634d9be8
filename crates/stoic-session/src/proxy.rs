use async_trait::async_trait;
use std::time::Duration;
use stoic_types::{ChatFailure, ChatReply, ChatRequest};

use crate::error::ProxyError;

/// Path of the chat route on the proxy endpoint
pub const CHAT_PATH: &str = "/api/chat";

/// Sends one chat turn to the proxy endpoint and returns the reply text
#[async_trait]
pub trait ProxyClient: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<String, ProxyError>;
}

/// [`ProxyClient`] over HTTP
pub struct HttpProxyClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpProxyClient {
    /// `base_url` is the proxy origin, e.g. `http://127.0.0.1:3000`
    pub fn new(base_url: &str) -> Result<Self, ProxyError> {
        let base = base_url.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ProxyError::InvalidUrl(base_url.to_string()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(180))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: format!("{}{}", base, CHAT_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProxyClient for HttpProxyClient {
    async fn send(&self, request: &ChatRequest) -> Result<String, ProxyError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Body is informational only; any non-2xx is a failure
            let details = response
                .json::<ChatFailure>()
                .await
                .ok()
                .map(|f| f.details);
            return Err(ProxyError::Status {
                status: status.as_u16(),
                details,
            });
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| ProxyError::Decode(e.to_string()))?;

        Ok(reply.text)
    }
}
