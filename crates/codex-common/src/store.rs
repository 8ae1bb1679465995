//! Collaborator traits for persistence and image hosting.
//!
//! The wiki core consumes these; it never implements them against a real
//! backend. `MemoryStore` is the in-process double used by tests and local
//! tooling.

use std::collections::HashMap;
use std::sync::Mutex;

use smol_str::{SmolStr, format_smolstr};

use codex_blocks::StoredDocument;

use crate::error::{CodexError, UploadError};

/// Persists one opaque document envelope per wiki page.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    async fn get(&self, page: &str) -> Result<Option<StoredDocument>, CodexError>;
    async fn put(&self, page: &str, doc: &StoredDocument) -> Result<(), CodexError>;
}

/// Turns image bytes into a public URL.
///
/// Failures surface to the author; the caller must not insert an image block
/// when `upload` errors.
#[allow(async_fn_in_trait)]
pub trait ImageStore {
    async fn upload(&self, bytes: &[u8], group: Option<&str>) -> Result<SmolStr, UploadError>;
}

/// Upload size limit enforced by `MemoryStore`, matching the hosted limit.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// In-memory implementation of both collaborator traits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, StoredDocument>>,
    uploads: Mutex<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many uploads have succeeded.
    pub fn upload_count(&self) -> u64 {
        *self.uploads.lock().expect("uploads lock")
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, page: &str) -> Result<Option<StoredDocument>, CodexError> {
        Ok(self.documents.lock().expect("documents lock").get(page).cloned())
    }

    async fn put(&self, page: &str, doc: &StoredDocument) -> Result<(), CodexError> {
        self.documents
            .lock()
            .expect("documents lock")
            .insert(page.to_string(), doc.clone());
        Ok(())
    }
}

impl ImageStore for MemoryStore {
    async fn upload(&self, bytes: &[u8], group: Option<&str>) -> Result<SmolStr, UploadError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge {
                limit_bytes: MAX_IMAGE_BYTES,
            });
        }
        if sniff_image_mime(bytes).is_none() {
            return Err(UploadError::UnsupportedType {
                mime: "application/octet-stream".into(),
            });
        }

        let mut uploads = self.uploads.lock().expect("uploads lock");
        *uploads += 1;
        let group = group.unwrap_or("misc");
        Ok(format_smolstr!("memory://{}/img-{}", group, *uploads))
    }
}

/// Recognize the image formats the uploader accepts, by magic bytes.
fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codex_blocks::WikiDocument;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n rest";

    #[tokio::test]
    async fn test_document_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("blood-angels").await.unwrap().is_none());

        let doc = WikiDocument::empty().to_stored();
        store.put("blood-angels", &doc).await.unwrap();
        assert_eq!(store.get("blood-angels").await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn test_upload_returns_url() {
        let store = MemoryStore::new();
        let url = store.upload(PNG_HEADER, Some("wiki")).await.unwrap();
        assert_eq!(url, "memory://wiki/img-1");
        assert_eq!(store.upload_count(), 1);
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized() {
        let store = MemoryStore::new();
        let huge = vec![0u8; MAX_IMAGE_BYTES + 1];
        let err = store.upload(&huge, None).await.unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
        assert_eq!(store.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_unknown_bytes() {
        let store = MemoryStore::new();
        let err = store.upload(b"not an image", None).await.unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
    }
}
