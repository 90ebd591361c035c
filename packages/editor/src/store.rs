//! # Document Store
//!
//! The mutable state container for one editing session: the ordered block
//! list, the current selection, and the bounded snapshot history. All
//! structural mutations flow through the store; every other component only
//! reads snapshots or calls store operations.
//!
//! One store instance is owned per session and passed by reference. There
//! is no ambient singleton, so multiple documents or tabs never share state.
//!
//! ## Failure semantics
//!
//! "Not found" and "unregistered kind" conditions are user-recoverable
//! no-ops: the operation does nothing, logs at `debug`, and pushes no
//! history entry. Every mutating operation that does change state pushes
//! exactly one entry.

use serde_json::Value;
use tracing::debug;

use trellis_blocks::serializer;
use trellis_blocks::wire::PersistedRecord;
use trellis_blocks::{block, registry, Block, BlockContent, BlockError, IdGenerator};

use crate::history::History;

/// Mutable document state scoped to one editing session
#[derive(Debug)]
pub struct DocumentStore {
    blocks: Vec<Block>,
    selection: Option<String>,
    history: History,
    ids: IdGenerator,
}

impl DocumentStore {
    /// Create an empty document
    pub fn new(document_id: &str) -> Self {
        Self {
            blocks: Vec::new(),
            selection: None,
            history: History::new(Vec::new()),
            ids: IdGenerator::new(document_id),
        }
    }

    /// Create a document hydrated from existing blocks
    pub fn from_blocks(document_id: &str, mut blocks: Vec<Block>) -> Self {
        normalize(&mut blocks);
        Self {
            history: History::new(blocks.clone()),
            blocks,
            selection: None,
            ids: IdGenerator::new(document_id),
        }
    }

    /// Current block list snapshot
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Selection changes are not history entries
    pub fn set_selection(&mut self, block_id: Option<String>) {
        self.selection = block_id;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Create a block of `kind` with its registered default content and
    /// insert it at `at_index` (clamped), or at the end.
    ///
    /// Returns the new block's id, or `None` if the kind is unregistered.
    pub fn add_block(&mut self, kind: &str, at_index: Option<usize>) -> Option<String> {
        let Some(descriptor) = registry::get(kind) else {
            debug!(kind, "ignoring add for unregistered block kind");
            return None;
        };

        let id = self.ids.new_id();
        let block = Block::new(id.clone(), descriptor.default_content(), 0);
        let index = at_index.unwrap_or(self.blocks.len()).min(self.blocks.len());
        self.blocks.insert(index, block);
        self.commit();
        Some(id)
    }

    /// Shallow-merge `patch` into the content of the block with `id`,
    /// wherever it lives in the tree. No-op if the id is unknown or the
    /// patch changes nothing, so a rejected patch never costs an undo step.
    pub fn update_block(&mut self, id: &str, patch: &Value) {
        let Some(block) = block::find_mut(&mut self.blocks, id) else {
            debug!(id, "ignoring update for missing block");
            return;
        };
        let merged = block.content.merged(patch);
        if merged == block.content {
            debug!(id, "ignoring patch that changes nothing");
            return;
        }
        block.content = merged;
        self.commit();
    }

    /// Delete the block with `id`; container descendants leave with it.
    /// No-op if the id is unknown.
    pub fn remove_block(&mut self, id: &str) {
        if block::remove_by_id(&mut self.blocks, id).is_none() {
            debug!(id, "ignoring remove for missing block");
            return;
        }
        if self.selection.as_deref() == Some(id) {
            self.selection = None;
        }
        self.commit();
    }

    /// Relocate a root-level block from one position to another, reindexing
    /// the list densely. Out-of-range source positions are a no-op.
    pub fn move_block(&mut self, from: usize, to: usize) {
        if from >= self.blocks.len() {
            debug!(from, "ignoring move from out-of-range position");
            return;
        }
        let to = to.min(self.blocks.len() - 1);
        if from == to {
            return;
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        self.commit();
    }

    /// Bulk-replace the block list (document load, batched drag-drop
    /// reorder). This is the single point that re-establishes the dense
    /// order-index invariant for arbitrary input.
    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
        self.commit();
    }

    /// Run a multi-step structural edit as one transaction: the closure
    /// mutates the block list in place, and if it reports a change, exactly
    /// one history entry is pushed. Used for cross-container reorders so a
    /// remove+insert pair never shows up as two undo steps.
    pub fn edit<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Vec<Block>) -> bool,
    {
        if f(&mut self.blocks) {
            self.commit();
            true
        } else {
            false
        }
    }

    /// Step back one history entry, if any. No-op at the start of history.
    pub fn undo(&mut self) {
        let Some(snapshot) = self.history.undo().map(<[Block]>::to_vec) else {
            debug!("undo at start of history");
            return;
        };
        self.blocks = snapshot;
        self.drop_stale_selection();
    }

    /// Step forward one history entry, if any. No-op at the end of history.
    pub fn redo(&mut self) {
        let Some(snapshot) = self.history.redo().map(<[Block]>::to_vec) else {
            debug!("redo at end of history");
            return;
        };
        self.blocks = snapshot;
        self.drop_stale_selection();
    }

    /// Serialize the current snapshot to persisted records
    pub fn to_records(&self) -> Result<Vec<PersistedRecord>, BlockError> {
        serializer::serialize(&self.blocks)
    }

    /// Replace the document with the contents of persisted records
    pub fn load_records(&mut self, records: &[PersistedRecord]) {
        let blocks = serializer::deserialize(records, &mut self.ids);
        self.set_blocks(blocks);
    }

    fn commit(&mut self) {
        normalize(&mut self.blocks);
        self.history.record(self.blocks.clone());
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = self.selection.as_deref() {
            if block::find(&self.blocks, id).is_none() {
                self.selection = None;
            }
        }
    }
}

/// Reassign order indices densely per parent grouping across the flat list,
/// and recursively inside embedded container lists.
fn normalize(blocks: &mut [Block]) {
    let mut groups: Vec<(Option<String>, usize)> = Vec::new();
    for block in blocks.iter_mut() {
        let next = match groups
            .iter_mut()
            .find(|(parent, _)| *parent == block.parent_block_id)
        {
            Some((_, count)) => {
                *count += 1;
                *count - 1
            }
            None => {
                groups.push((block.parent_block_id.clone(), 1));
                0
            }
        };
        block.order_index = next;
        normalize_embedded(&mut block.content);
    }
}

fn normalize_embedded(content: &mut BlockContent) {
    for list in content.child_lists_mut() {
        for (index, child) in list.iter_mut().enumerate() {
            child.order_index = index;
            normalize_embedded(&mut child.content);
        }
    }
}
