//! Block records and tree traversal helpers.
//!
//! The document is a flat, order-indexed list of root blocks; container
//! blocks embed further block lists inside their content. The free functions
//! here walk both levels so callers never reach into container internals
//! directly.

use serde::{Deserialize, Serialize};

use crate::content::BlockContent;

/// One node of editable content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Globally unique within the document, assigned at creation
    pub id: String,

    /// Registry discriminant; mirrors `content.kind()`
    pub kind: String,

    pub content: BlockContent,

    /// Dense position among siblings sharing `parent_block_id`
    pub order_index: usize,

    #[serde(default)]
    pub parent_block_id: Option<String>,
}

impl Block {
    pub fn new(id: impl Into<String>, content: BlockContent, order_index: usize) -> Self {
        let kind = content.kind().to_string();
        Self {
            id: id.into(),
            kind,
            content,
            order_index,
            parent_block_id: None,
        }
    }

    pub fn with_parent(mut self, parent_block_id: impl Into<String>) -> Self {
        self.parent_block_id = Some(parent_block_id.into());
        self
    }

    pub fn is_container(&self) -> bool {
        self.content.is_container()
    }
}

/// Reassign `order_index` densely (0..n-1) over one sibling list
pub fn reindex(blocks: &mut [Block]) {
    for (index, block) in blocks.iter_mut().enumerate() {
        block.order_index = index;
    }
}

/// Find a block by id, descending into embedded container content
pub fn find<'a>(blocks: &'a [Block], id: &str) -> Option<&'a Block> {
    for block in blocks {
        if block.id == id {
            return Some(block);
        }
        for list in block.content.child_lists() {
            if let Some(found) = find(list, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn find_mut<'a>(blocks: &'a mut [Block], id: &str) -> Option<&'a mut Block> {
    for block in blocks {
        if block.id == id {
            return Some(block);
        }
        for list in block.content.child_lists_mut() {
            if let Some(found) = find_mut(list, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Remove a block by id from whichever sibling list holds it, returning the
/// removed block. The affected list is reindexed; descendants leave with
/// their container.
pub fn remove_by_id(blocks: &mut Vec<Block>, id: &str) -> Option<Block> {
    if let Some(position) = blocks.iter().position(|block| block.id == id) {
        let removed = blocks.remove(position);
        reindex(blocks);
        return Some(removed);
    }

    for block in blocks.iter_mut() {
        for list in block.content.child_lists_mut() {
            if let Some(removed) = remove_by_id(list, id) {
                return Some(removed);
            }
        }
    }
    None
}

/// Total number of blocks, embedded children included
pub fn count(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .map(|block| {
            1 + block
                .content
                .child_lists()
                .iter()
                .map(|list| count(list))
                .sum::<usize>()
        })
        .sum()
}
