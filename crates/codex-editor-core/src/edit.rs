//! Pure edits over immutable document snapshots.
//!
//! The UI layer owns the "current" document pointer; `apply_edit` never
//! mutates its input. An edit addressing an id that does not exist is a
//! no-op returning the snapshot unchanged - same philosophy as rendering,
//! where structurally odd input degrades instead of failing.

use smol_str::SmolStr;

use codex_blocks::{Block, BlockKind, InlineSpan, WikiDocument};

/// One committed change to the block tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Insert as a sibling after `after`, or at the end of the document
    /// when `after` is `None`.
    InsertBlock {
        after: Option<SmolStr>,
        block: Block,
    },
    /// Swap a block (and its subtree) for a new one.
    ReplaceBlock { id: SmolStr, block: Block },
    /// Change a block's kind/properties, keeping content and children.
    UpdateProps { id: SmolStr, kind: BlockKind },
    /// Replace a block's inline content.
    SetContent {
        id: SmolStr,
        content: Vec<InlineSpan>,
    },
    /// Append a child to the named parent.
    AppendChild { parent: SmolStr, block: Block },
    /// Remove a block and its subtree.
    DeleteBlock { id: SmolStr },
}

/// Apply one edit, producing the next snapshot.
pub fn apply_edit(doc: &WikiDocument, edit: &Edit) -> WikiDocument {
    let mut next = doc.clone();
    let applied = match edit {
        Edit::InsertBlock { after: None, block } => {
            next.blocks.push(block.clone());
            true
        }
        Edit::InsertBlock {
            after: Some(after),
            block,
        } => insert_after(&mut next.blocks, after, block),
        Edit::ReplaceBlock { id, block } => match find_mut(&mut next.blocks, id) {
            Some(slot) => {
                *slot = block.clone();
                true
            }
            None => false,
        },
        Edit::UpdateProps { id, kind } => match find_mut(&mut next.blocks, id) {
            Some(block) => {
                block.kind = kind.clone();
                true
            }
            None => false,
        },
        Edit::SetContent { id, content } => match find_mut(&mut next.blocks, id) {
            Some(block) => {
                block.content = content.clone();
                true
            }
            None => false,
        },
        Edit::AppendChild { parent, block } => match find_mut(&mut next.blocks, parent) {
            Some(target) => {
                target.children.push(block.clone());
                true
            }
            None => false,
        },
        Edit::DeleteBlock { id } => delete(&mut next.blocks, id),
    };

    if !applied {
        tracing::debug!(?edit, "edit target not found, document unchanged");
    }
    next
}

/// Find a block anywhere in the tree.
pub fn find_block<'a>(doc: &'a WikiDocument, id: &str) -> Option<&'a Block> {
    fn walk<'a>(blocks: &'a [Block], id: &str) -> Option<&'a Block> {
        for block in blocks {
            if block.id == id {
                return Some(block);
            }
            if let Some(found) = walk(&block.children, id) {
                return Some(found);
            }
        }
        None
    }
    walk(&doc.blocks, id)
}

fn find_mut<'a>(blocks: &'a mut [Block], id: &str) -> Option<&'a mut Block> {
    for block in blocks.iter_mut() {
        if block.id == id {
            return Some(block);
        }
        if let Some(found) = find_mut(&mut block.children, id) {
            return Some(found);
        }
    }
    None
}

fn insert_after(blocks: &mut Vec<Block>, after: &str, block: &Block) -> bool {
    if let Some(pos) = blocks.iter().position(|b| b.id == after) {
        blocks.insert(pos + 1, block.clone());
        return true;
    }
    for candidate in blocks.iter_mut() {
        if insert_after(&mut candidate.children, after, block) {
            return true;
        }
    }
    false
}

fn delete(blocks: &mut Vec<Block>, id: &str) -> bool {
    if let Some(pos) = blocks.iter().position(|b| b.id == id) {
        blocks.remove(pos);
        return true;
    }
    for candidate in blocks.iter_mut() {
        if delete(&mut candidate.children, id) {
            return true;
        }
    }
    false
}
