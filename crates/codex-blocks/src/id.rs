//! Block id generation.
//!
//! Ids are `b-{n}` from a monotonic counter. Loaded documents keep their ids
//! verbatim; `IdGen::seeded_for` advances the counter past any `b-{n}` ids
//! already present so fresh ids never collide.

use smol_str::{SmolStr, format_smolstr};

use crate::block::Block;
use crate::document::WikiDocument;

/// Generate a block id from a counter value.
pub fn make_block_id(n: u64) -> SmolStr {
    format_smolstr!("b-{}", n)
}

/// Monotonic id generator, one per editing session.
#[derive(Debug, Clone, Default)]
pub struct IdGen {
    next: u64,
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator whose counter starts past every `b-{n}` id in `doc`.
    pub fn seeded_for(doc: &WikiDocument) -> Self {
        fn scan(blocks: &[Block], max: &mut u64) {
            for block in blocks {
                if let Some(n) = block
                    .id
                    .strip_prefix("b-")
                    .and_then(|rest| rest.parse::<u64>().ok())
                {
                    *max = (*max).max(n + 1);
                }
                scan(&block.children, max);
            }
        }

        let mut next = 0;
        scan(&doc.blocks, &mut next);
        Self { next }
    }

    /// Advance the counter past every `b-{n}` id in `doc`. Never moves the
    /// counter backward, so ids already handed out stay unique even when
    /// `doc` is near-empty.
    pub fn advance_past(&mut self, doc: &WikiDocument) {
        self.next = self.next.max(Self::seeded_for(doc).next);
    }

    /// Produce a fresh id.
    pub fn next_id(&mut self) -> SmolStr {
        let id = make_block_id(self.next);
        self.next += 1;
        id
    }
}
