//! The wiki document and its persisted envelope.
//!
//! A `WikiDocument` is the ordered root block tree one editing session owns.
//! It persists as `{"type": FORMAT_TAG, "blocks": [...]}`; anything without
//! the matching tag is treated as absent content and loads as the seeded
//! empty document rather than an error.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::block::{Block, BlockKind};
use crate::id::make_block_id;

/// Format discriminator for documents written by this editor.
pub const FORMAT_TAG: &str = "codex-wiki";

/// The persisted JSON envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(rename = "type")]
    pub format: SmolStr,
    pub blocks: Vec<Block>,
}

impl StoredDocument {
    pub fn is_current_format(&self) -> bool {
        self.format == FORMAT_TAG
    }
}

/// An ordered tree of blocks; the in-memory form of one wiki page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WikiDocument {
    pub blocks: Vec<Block>,
}

impl WikiDocument {
    /// The seeded state for a new page: a single empty paragraph.
    pub fn empty() -> Self {
        Self {
            blocks: vec![Block::new(make_block_id(0), BlockKind::Paragraph)],
        }
    }

    /// Adopt a stored document, falling back to `empty()` when the envelope
    /// is absent or carries a foreign format tag.
    pub fn from_stored(stored: Option<StoredDocument>) -> Self {
        match stored {
            Some(stored) if stored.is_current_format() => Self {
                blocks: stored.blocks,
            },
            Some(stored) => {
                tracing::debug!(format = %stored.format, "foreign format tag, starting empty");
                Self::empty()
            }
            None => Self::empty(),
        }
    }

    /// Adopt a raw stored JSON value (the opaque column the persistence
    /// layer hands back). Any shape that does not decode as a current-format
    /// envelope loads as the empty document.
    pub fn from_stored_json(value: Option<&serde_json::Value>) -> Self {
        let Some(value) = value else {
            return Self::empty();
        };
        match serde_json::from_value::<StoredDocument>(value.clone()) {
            Ok(stored) => Self::from_stored(Some(stored)),
            Err(err) => {
                tracing::warn!(%err, "malformed stored document, starting empty");
                Self::empty()
            }
        }
    }

    /// Wrap the current tree in the stored envelope.
    pub fn to_stored(&self) -> StoredDocument {
        StoredDocument {
            format: SmolStr::new(FORMAT_TAG),
            blocks: self.blocks.clone(),
        }
    }

    /// Whether no block in the document carries visible text.
    pub fn is_visually_empty(&self) -> bool {
        fn block_empty(block: &Block) -> bool {
            let own = match &block.kind {
                BlockKind::Quote { text, .. } => text.is_empty(),
                BlockKind::Image { url, .. } => url.is_empty(),
                _ => block.content.iter().all(|span| span.is_empty_text()),
            };
            own && block.children.iter().all(block_empty)
        }
        self.blocks.iter().all(block_empty)
    }
}
