use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataUriError {
    #[error("Image is not a data URI")]
    MissingScheme,

    #[error("Image data URI has no payload")]
    MissingPayload,

    #[error("Image data URI has no MIME type")]
    MissingMimeType,

    #[error("Image data URI is not base64 encoded")]
    NotBase64,
}

/// A `data:<mime>;base64,<payload>` string split into its two halves.
///
/// The payload is kept as the base64 text; it is forwarded upstream as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub data: String,
}

impl DataUri {
    /// Split a data URI into MIME type and base64 payload
    pub fn parse(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri.strip_prefix("data:").ok_or(DataUriError::MissingScheme)?;
        let (header, data) = rest.split_once(',').ok_or(DataUriError::MissingPayload)?;
        let (mime_type, encoding) = header.split_once(';').ok_or(DataUriError::NotBase64)?;

        if encoding != "base64" {
            return Err(DataUriError::NotBase64);
        }
        if mime_type.is_empty() {
            return Err(DataUriError::MissingMimeType);
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    /// Encode raw bytes under the given MIME type
    pub fn encode(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

impl FromStr for DataUri {
    type Err = DataUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
