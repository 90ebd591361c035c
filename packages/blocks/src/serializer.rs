//! # Serialization Layer
//!
//! Converts between the persisted flat record list and the in-memory block
//! list the store operates on.
//!
//! `serialize` is lossless for anything the registry can produce; the
//! round-trip law is pinned by tests here and in `trellis-editor`.
//! `deserialize` is tolerant: one corrupt record never aborts loading the
//! rest of the document. The corrupt block comes back with empty content
//! and a warning, and unregistered kinds survive verbatim so the dispatch
//! layers can surface them instead of dropping user data.

use serde_json::{Map, Value};
use tracing::warn;

use crate::block::Block;
use crate::content::BlockContent;
use crate::error::BlockError;
use crate::ids::IdGenerator;
use crate::wire::PersistedRecord;

/// Flatten a block list into persisted records, preserving list order.
///
/// Container children stay embedded inside their parent's content string;
/// blocks carrying `parent_block_id` keep it on the record. Both containment
/// styles of the wire contract survive a round trip.
pub fn serialize(blocks: &[Block]) -> Result<Vec<PersistedRecord>, BlockError> {
    blocks
        .iter()
        .map(|block| {
            let value = block
                .content
                .to_wire_value()
                .map_err(|source| BlockError::Serialize {
                    kind: block.kind.clone(),
                    source,
                })?;
            let content =
                serde_json::to_string(&value).map_err(|source| BlockError::Serialize {
                    kind: block.kind.clone(),
                    source,
                })?;

            Ok(PersistedRecord {
                kind: block.kind.clone(),
                content,
                order_index: block.order_index,
                parent_block_id: block.parent_block_id.clone(),
                id: Some(block.id.clone()),
            })
        })
        .collect()
}

/// Rebuild a block list from persisted records.
///
/// Records may arrive in any order; they are re-sorted by `order_index`
/// within each parent grouping, with root blocks first and each parent's
/// grouping following its parent's position. Records without an id get a
/// fresh one.
pub fn deserialize(records: &[PersistedRecord], ids: &mut IdGenerator) -> Vec<Block> {
    let mut groups: Vec<(Option<String>, Vec<Block>)> = Vec::new();

    for record in records {
        let value = match serde_json::from_str::<Value>(&record.content) {
            Ok(value) => value,
            Err(err) => {
                warn!(kind = %record.kind, %err, "unparsable block content, substituting empty content");
                Value::Object(Map::new())
            }
        };
        let content = BlockContent::from_wire(&record.kind, value);

        let id = record.id.clone().unwrap_or_else(|| ids.new_id());
        let mut block = Block::new(id, content, record.order_index);
        block.parent_block_id = record.parent_block_id.clone();

        match groups
            .iter_mut()
            .find(|(parent, _)| *parent == record.parent_block_id)
        {
            Some((_, list)) => list.push(block),
            None => groups.push((record.parent_block_id.clone(), vec![block])),
        }
    }

    for (_, list) in &mut groups {
        list.sort_by_key(|block| block.order_index);
    }

    let mut blocks = Vec::new();
    if let Some(position) = groups.iter().position(|(parent, _)| parent.is_none()) {
        let (_, roots) = groups.remove(position);
        blocks.extend(roots);
    }

    // Child groupings follow their parent's position; orphaned groupings go
    // last rather than getting dropped.
    groups.sort_by_key(|(parent, _)| {
        parent
            .as_deref()
            .and_then(|parent_id| blocks.iter().position(|block| block.id == parent_id))
            .unwrap_or(usize::MAX)
    });
    for (parent, list) in groups {
        if let Some(parent_id) = parent.as_deref() {
            if !blocks.iter().any(|block| block.id == parent_id) {
                warn!(parent_id, "records reference a missing parent, keeping them at the end");
            }
        }
        blocks.extend(list);
    }

    blocks
}
