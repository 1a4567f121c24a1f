//! Inline file attachments.
//!
//! The API takes binary content inline as base64 with a MIME type. An
//! attachment is buffered in the session until the next turn is sent.

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::ChatError;

/// Base64 payload plus MIME type, serialized as the API's `inlineData`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub data: String,
    #[serde(rename = "mimeType", alias = "mime_type")]
    pub mime_type: String,
}

// Payloads are large; print the size instead.
impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("mime_type", &self.mime_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Attachment {
    /// Wrap already-encoded base64 data.
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Encode raw bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::new(B64.encode(bytes), mime_type)
    }

    /// Read a file and guess its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, ChatError> {
        let bytes = std::fs::read(path).map_err(|e| {
            ChatError::Attachment(format!("failed to read {}: {e}", path.display()))
        })?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        Ok(Self::from_bytes(&bytes, mime.essence_str()))
    }

    /// Parse a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Result<Self, ChatError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| ChatError::Attachment("not a data URL".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ChatError::Attachment("data URL has no payload".into()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| ChatError::Attachment("data URL is not base64-encoded".into()))?;

        B64.decode(payload)
            .map_err(|e| ChatError::Attachment(format!("invalid base64 payload: {e}")))?;

        let mime = if mime.is_empty() {
            "application/octet-stream"
        } else {
            mime
        };
        Ok(Self::new(payload, mime))
    }

    /// Size of the decoded payload in bytes, if the data is valid base64.
    pub fn decoded_len(&self) -> Option<usize> {
        B64.decode(&self.data).ok().map(|bytes| bytes.len())
    }
}
