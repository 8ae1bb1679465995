//! codex-editor-core: framework-free wiki editing logic.
//!
//! This crate provides:
//! - `Edit` + `apply_edit` - pure edits over immutable document snapshots
//! - `EditorSession` - one per open document; owns the current snapshot,
//!   undo history, and change notification
//! - the slash-command catalog and its filter

pub mod commands;
pub mod edit;
pub mod session;

pub use commands::{
    BlockTemplate, SlashCommand, TRIGGER_CHAR, command_catalog, filter_commands,
};
pub use edit::{Edit, apply_edit, find_block};
pub use session::EditorSession;
