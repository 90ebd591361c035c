//! # Trellis Blocks
//!
//! Block model for the Trellis content editor: the typed content sum type,
//! the static block-kind registry, id generation, the persisted wire shape,
//! tolerant serialization, and submission validation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: model + registry + wire codec       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: document store + history + reorder  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ render: block list → virtual node tree      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Two containment styles coexist by contract: container blocks embed child
//! lists inside their content, while flat lists link via `parent_block_id`.
//! The embedded form is canonical in memory; `serializer` adapts both at the
//! persistence boundary.

pub mod block;
pub mod content;
pub mod error;
pub mod ids;
pub mod registry;
pub mod serializer;
pub mod validate;
pub mod wire;

pub use block::Block;
pub use content::{BlockContent, FormField, FormFieldKind};
pub use error::BlockError;
pub use ids::IdGenerator;
pub use registry::BlockDescriptor;
pub use validate::{validate, Diagnostic};
pub use wire::PersistedRecord;
