use serde::{Deserialize, Serialize};

/// Fixed `message` field of every failure body returned by `/api/chat`
pub const FAILURE_MESSAGE: &str = "Error processing request.";

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// User text, may be empty when only an image is sent
    #[serde(default)]
    pub message: String,

    /// Optional `data:<mime>;base64,<payload>` image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Success body (HTTP 200)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    pub success: bool,
}

impl ChatReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }
}

/// Failure body (HTTP 500)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFailure {
    pub message: String,
    pub details: String,
}

impl ChatFailure {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            message: FAILURE_MESSAGE.to_string(),
            details: details.into(),
        }
    }
}
