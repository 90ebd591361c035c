//! # Trellis Editor
//!
//! Document editing engine for Trellis block content.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: model + registry + wire codec       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: store + history + reorder + session │
//! │  - All structural mutations flow through    │
//! │    the store                                │
//! │  - One history entry per user-visible edit  │
//! │  - Persistence and resumability as traits   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **The store is the sole writer**: everything else reads snapshots or
//!    calls store operations
//! 2. **User mistakes are no-ops**: unknown kinds, missing ids, invalid
//!    drops and history-bound undo/redo never error
//! 3. **Synchronous mutations**: every operation runs to completion before
//!    the next event; async persistence re-enters through a normal store
//!    call
//!
//! ## Usage
//!
//! ```rust
//! use trellis_editor::DocumentStore;
//! use serde_json::json;
//!
//! let mut store = DocumentStore::new("post-1");
//! let id = store.add_block("heading", None).unwrap();
//! store.update_block(&id, &json!({"text": "Welcome"}));
//! store.undo();
//! store.redo();
//! ```

mod error;
mod history;
mod reorder;
mod session;
mod store;

pub use error::EditorError;
pub use history::{History, MAX_HISTORY_ENTRIES};
pub use reorder::{destination_index, move_to, reorder_in_container, reorder_root, DropTarget};
pub use session::{
    EditSession, InMemoryBackend, InMemorySlot, PersistenceBackend, SnapshotSlot,
};
pub use store::DocumentStore;
