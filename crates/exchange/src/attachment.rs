use serde::{Deserialize, Serialize};

use cambio_core::{DomainError, DomainResult};

/// Largest document accepted alongside a transaction (5 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Document types accepted alongside a transaction.
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

/// Reference to a supporting document (receipt, transfer proof).
///
/// Only the reference travels with the transaction; uploading and storing the
/// bytes happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRef {
    pub name: String,
    pub url: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl AttachmentRef {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
    ) -> DomainResult<Self> {
        let attachment = Self {
            name: name.into(),
            url: url.into(),
            mime_type: mime_type.into(),
            size_bytes,
        };
        attachment.validate()?;
        Ok(attachment)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("attachment name cannot be empty"));
        }
        if self.url.trim().is_empty() {
            return Err(DomainError::validation("attachment url cannot be empty"));
        }
        if !ALLOWED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(DomainError::validation(format!(
                "attachment type not allowed: {}",
                self.mime_type
            )));
        }
        if self.size_bytes > MAX_ATTACHMENT_BYTES {
            return Err(DomainError::validation(format!(
                "attachment exceeds {MAX_ATTACHMENT_BYTES} bytes"
            )));
        }
        Ok(())
    }
}
