//! One editing session per open document.
//!
//! The session owns the current snapshot, an undo history of previous
//! snapshots, and the change listener. Every committed edit replaces the
//! snapshot and notifies the listener with the full stored envelope - there
//! is no diffing, the contract is "always emit the full current state".

use smol_str::SmolStr;

use codex_blocks::{Block, BlockKind, IdGen, StoredDocument, WikiDocument};
use codex_common::{ImageStore, UploadError};

use crate::commands::SlashCommand;
use crate::edit::{Edit, apply_edit, find_block};

/// Undo depth kept per session.
const MAX_UNDO_STEPS: usize = 100;

type ChangeListener = Box<dyn FnMut(&StoredDocument)>;

pub struct EditorSession {
    doc: WikiDocument,
    ids: IdGen,
    revision: u64,
    undo_stack: Vec<WikiDocument>,
    redo_stack: Vec<WikiDocument>,
    on_change: Option<ChangeListener>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Session over a fresh page: a single empty paragraph.
    pub fn new() -> Self {
        Self::load(None)
    }

    /// Open a persisted document. Absent content or a foreign format tag
    /// starts the seeded empty document instead.
    pub fn load(stored: Option<StoredDocument>) -> Self {
        let doc = WikiDocument::from_stored(stored);
        let ids = IdGen::seeded_for(&doc);
        Self {
            doc,
            ids,
            revision: 0,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            on_change: None,
        }
    }

    /// Open from the raw JSON value the persistence layer hands back.
    pub fn load_json(value: Option<&serde_json::Value>) -> Self {
        let doc = WikiDocument::from_stored_json(value);
        let ids = IdGen::seeded_for(&doc);
        Self {
            doc,
            ids,
            revision: 0,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            on_change: None,
        }
    }

    /// Register the change listener. Called after every committed edit with
    /// the full current envelope.
    pub fn set_on_change(&mut self, listener: impl FnMut(&StoredDocument) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    /// The current snapshot.
    pub fn document(&self) -> &WikiDocument {
        &self.doc
    }

    /// Bumped on every committed change (edits, undo, redo, clear).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Produce a fresh block id unique within this session.
    pub fn next_id(&mut self) -> SmolStr {
        self.ids.next_id()
    }

    /// Apply one edit. Edits addressing a missing block leave the snapshot
    /// untouched and do not notify.
    pub fn apply(&mut self, edit: &Edit) -> &WikiDocument {
        let next = apply_edit(&self.doc, edit);
        if next != self.doc {
            self.commit(next);
        }
        &self.doc
    }

    /// Insert a slash command's block at the cursor block: replaces the
    /// cursor block when it is an empty paragraph placeholder, inserts after
    /// it otherwise, appends at the end with no cursor. Returns the new
    /// block's id.
    pub fn insert_command(&mut self, command: &SlashCommand, cursor: Option<&str>) -> SmolStr {
        let block = command.template.instantiate(&mut self.ids);
        self.insert_at_cursor(block, cursor)
    }

    /// Upload image bytes and insert the resulting image block. A failed
    /// upload returns the error and leaves the document unchanged.
    pub async fn insert_image<S: ImageStore>(
        &mut self,
        store: &S,
        bytes: &[u8],
        group: Option<&str>,
        caption: &str,
        cursor: Option<&str>,
    ) -> Result<SmolStr, UploadError> {
        let url = store.upload(bytes, group).await?;
        let block = Block::new(
            self.ids.next_id(),
            BlockKind::Image {
                url,
                caption: SmolStr::new(caption),
            },
        );
        Ok(self.insert_at_cursor(block, cursor))
    }

    /// Serialize the current snapshot into the stored envelope.
    pub fn save(&self) -> StoredDocument {
        self.doc.to_stored()
    }

    /// Reset to the seeded single-paragraph state, discarding all blocks.
    pub fn clear(&mut self) {
        let empty = WikiDocument::empty();
        if self.doc != empty {
            self.commit(empty);
        }
        // Keep fresh ids unique against the seeded paragraph without winding
        // the counter back; undo can restore blocks with higher ids.
        self.ids.advance_past(&self.doc);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(prev) => {
                let current = std::mem::replace(&mut self.doc, prev);
                self.redo_stack.push(current);
                self.revision += 1;
                self.notify();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.doc, next);
                self.undo_stack.push(current);
                self.revision += 1;
                self.notify();
                true
            }
            None => false,
        }
    }

    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn insert_at_cursor(&mut self, block: Block, cursor: Option<&str>) -> SmolStr {
        let id = block.id.clone();
        let edit = match cursor.and_then(|c| find_block(&self.doc, c)) {
            Some(target) if target.is_empty_paragraph() => Edit::ReplaceBlock {
                id: target.id.clone(),
                block,
            },
            Some(target) => Edit::InsertBlock {
                after: Some(target.id.clone()),
                block,
            },
            None => Edit::InsertBlock { after: None, block },
        };
        self.apply(&edit);
        id
    }

    fn commit(&mut self, next: WikiDocument) {
        if self.undo_stack.len() == MAX_UNDO_STEPS {
            self.undo_stack.remove(0);
        }
        let prev = std::mem::replace(&mut self.doc, next);
        self.undo_stack.push(prev);
        self.redo_stack.clear();
        self.revision += 1;
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(listener) = self.on_change.as_mut() {
            let stored = self.doc.to_stored();
            listener(&stored);
        }
    }
}
