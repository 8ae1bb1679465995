//! codex-blocks: the wiki block content model.
//!
//! This crate provides:
//! - `Block` / `BlockKind` - the tagged block tree (paragraphs, headings,
//!   lists, plus the custom alert/lore/quote kinds)
//! - `InlineSpan` / `Styles` - styled inline runs inside text-bearing blocks
//! - `WikiDocument` / `StoredDocument` - the in-memory tree and its persisted
//!   JSON envelope, with lossless round-trip
//! - `IdGen` - block id generation

pub mod block;
pub mod document;
pub mod id;
pub mod inline;

pub use block::{AlertType, Block, BlockKind, LoreIcon};
pub use document::{FORMAT_TAG, StoredDocument, WikiDocument};
pub use id::{IdGen, make_block_id};
pub use inline::{InlineSpan, Mark, Styles};
pub use smol_str::SmolStr;
