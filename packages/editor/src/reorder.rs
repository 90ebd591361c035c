//! # Reorder Controller
//!
//! Drag-and-drop index computation on top of the store.
//!
//! Same-list drags delegate to `move_block` (root level) or run as one
//! transaction inside a container list. Cross-container moves are a
//! remove-then-insert pair wrapped in a single [`DocumentStore::edit`]
//! transaction, so one user-visible drag records exactly one history entry
//! and reindexes both sibling lists.
//!
//! Dropping outside any valid target is a no-op, not an error. Dropping a
//! container into another container is refused (the render layer caps
//! container nesting at depth one, so the structure is never created in the
//! first place).

use serde::{Deserialize, Serialize};
use tracing::debug;

use trellis_blocks::block;

use crate::store::DocumentStore;

/// Where a dragged block was dropped. Serializable so drop payloads can
/// cross the UI boundary as plain data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DropTarget {
    /// Position in the root block list
    Root { index: usize },

    /// Position inside one embedded list of a container block
    Container {
        container_id: String,
        /// Which child list (column) of the container
        list: usize,
        index: usize,
    },
}

/// Reorder within the root list. Delegates to [`DocumentStore::move_block`].
pub fn reorder_root(store: &mut DocumentStore, from: usize, to: usize) {
    store.move_block(from, to);
}

/// Reorder within one embedded container list, as a single history entry.
/// Returns whether anything moved.
pub fn reorder_in_container(
    store: &mut DocumentStore,
    container_id: &str,
    list: usize,
    from: usize,
    to: usize,
) -> bool {
    store.edit(|blocks| {
        let Some(container) = block::find_mut(blocks, container_id) else {
            debug!(container_id, "ignoring reorder in missing container");
            return false;
        };
        let mut lists = container.content.child_lists_mut();
        let Some(siblings) = lists.get_mut(list) else {
            debug!(container_id, list, "ignoring reorder in missing container list");
            return false;
        };
        if from >= siblings.len() {
            debug!(from, "ignoring reorder from out-of-range position");
            return false;
        }
        let to = to.min(siblings.len() - 1);
        if from == to {
            return false;
        }
        let moved = siblings.remove(from);
        siblings.insert(to, moved);
        true
    })
}

/// Move a block to a drop target, possibly across containment levels.
///
/// `None` means the drop landed outside any valid target. Returns whether
/// the document changed; when it did, exactly one history entry was pushed.
pub fn move_to(store: &mut DocumentStore, block_id: &str, target: Option<DropTarget>) -> bool {
    let Some(target) = target else {
        debug!(block_id, "drop outside any valid target");
        return false;
    };

    // Validate before touching the tree so a refused drop leaves no trace.
    let Some(dragged) = block::find(store.blocks(), block_id) else {
        debug!(block_id, "ignoring drop of missing block");
        return false;
    };
    let dragged_is_container = dragged.is_container();

    if let DropTarget::Container {
        container_id, list, ..
    } = &target
    {
        if dragged_is_container {
            debug!(block_id, container_id, "refusing container-in-container drop");
            return false;
        }
        let Some(container) = block::find(store.blocks(), container_id) else {
            debug!(container_id, "ignoring drop into missing container");
            return false;
        };
        if container.content.child_lists().get(*list).is_none() {
            debug!(container_id, list, "ignoring drop into missing container list");
            return false;
        }
    }

    store.edit(|blocks| {
        let Some(mut moved) = block::remove_by_id(blocks, block_id) else {
            return false;
        };
        moved.parent_block_id = None;

        match &target {
            DropTarget::Root { index } => {
                let index = (*index).min(blocks.len());
                blocks.insert(index, moved);
            }
            DropTarget::Container {
                container_id,
                list,
                index,
            } => {
                // Validated above; the container cannot have been inside the
                // dragged block because containers are refused as payloads.
                let mut pending = Some(moved);
                if let Some(container) = block::find_mut(blocks, container_id) {
                    let mut lists = container.content.child_lists_mut();
                    if let Some(siblings) = lists.get_mut(*list) {
                        if let Some(dragged) = pending.take() {
                            let index = (*index).min(siblings.len());
                            siblings.insert(index, dragged);
                        }
                    }
                }
                if let Some(dragged) = pending {
                    // Target vanished mid-transaction; reattach at the root
                    // rather than losing the block.
                    blocks.push(dragged);
                }
            }
        }
        true
    })
}

/// Compute the destination index for a drop between two siblings, given the
/// source position. Dropping after the source accounts for the removal
/// shifting later siblings left by one.
pub fn destination_index(from: usize, drop_before: usize) -> usize {
    if drop_before > from {
        drop_before - 1
    } else {
        drop_before
    }
}
