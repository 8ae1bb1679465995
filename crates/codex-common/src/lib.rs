//! codex-common: shared error types and external-collaborator traits.
//!
//! The wiki core does not own persistence or file hosting. This crate
//! defines the seams: `DocumentStore` for the opaque per-page JSON document
//! and `ImageStore` for turning image bytes into a public URL, plus the
//! boundary error type.

pub mod error;
pub mod store;

pub use error::{CodexError, UploadError};
pub use store::{DocumentStore, ImageStore, MemoryStore};
