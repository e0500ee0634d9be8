use serde::{Deserialize, Serialize};

/// One piece of a turn, serialized the way Gemini expects:
/// `{"text": ...}` or `{"inlineData": {"mimeType": ..., "data": ...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    /// Plain text
    Text(String),

    /// Binary content carried inline as base64
    InlineData(InlineData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 payload, without any `data:` prefix
    pub data: String,
}

impl Part {
    /// Create text part
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create inline-data part from a MIME type and base64 payload
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData(InlineData {
            mime_type: mime_type.into(),
            data: data.into(),
        })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::InlineData(_) => None,
        }
    }

    pub fn is_inline_data(&self) -> bool {
        matches!(self, Self::InlineData(_))
    }
}

impl From<String> for Part {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Part {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
