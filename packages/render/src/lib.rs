//! # Trellis Render
//!
//! Read-only projection of block documents plus the editor-control
//! dispatch: block list → virtual node tree, block kind → control surface.
//!
//! Both dispatches are stateless matches over the closed content sum type
//! with mandatory fallbacks: an unknown kind always produces a visible
//! diagnostic node and a generic raw editor, never nothing.

mod controls;
mod render;
mod virt;

pub use controls::{control_for, control_for_block, EditorControl, FieldInput, FieldSpec};
pub use render::{render_block, render_document};
pub use virt::{VirtualElement, VirtualNode};
