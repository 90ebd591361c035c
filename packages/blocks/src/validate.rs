//! # Validation
//!
//! Structural checks run before a document is considered submittable.
//! Pure: takes a block list, returns a list of diagnostics. An empty list
//! means valid. Validation never blocks editing, only submission.

use crate::block::Block;
use crate::content::BlockContent;

/// One user-facing validation finding
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Offending block, or `None` for document-level findings
    pub block_id: Option<String>,
    pub message: String,
}

impl Diagnostic {
    fn document(message: impl Into<String>) -> Self {
        Self {
            block_id: None,
            message: message.into(),
        }
    }

    fn block(block: &Block, message: impl Into<String>) -> Self {
        Self {
            block_id: Some(block.id.clone()),
            message: message.into(),
        }
    }
}

/// Validate a document's block list, descending into container content
pub fn validate(blocks: &[Block]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if blocks.is_empty() {
        diagnostics.push(Diagnostic::document("Document has no content"));
        return diagnostics;
    }

    check_blocks(blocks, &mut diagnostics);
    diagnostics
}

fn check_blocks(blocks: &[Block], diagnostics: &mut Vec<Diagnostic>) {
    for block in blocks {
        check_block(block, diagnostics);
        for list in block.content.child_lists() {
            check_blocks(list, diagnostics);
        }
    }
}

fn check_block(block: &Block, diagnostics: &mut Vec<Diagnostic>) {
    match &block.content {
        BlockContent::Heading { text, .. } => {
            if text.trim().is_empty() {
                diagnostics.push(Diagnostic::block(block, "Heading has no text"));
            }
        }
        BlockContent::Image { url, .. } => {
            if url.trim().is_empty() {
                diagnostics.push(Diagnostic::block(block, "Image has no URL"));
            }
        }
        BlockContent::Button { label, url } => {
            if label.trim().is_empty() {
                diagnostics.push(Diagnostic::block(block, "Button has no label"));
            }
            if url.trim().is_empty() {
                diagnostics.push(Diagnostic::block(block, "Button has no link"));
            }
        }
        BlockContent::Embed { url, .. } => {
            if url.trim().is_empty() {
                diagnostics.push(Diagnostic::block(block, "Embed has no URL"));
            }
        }
        BlockContent::Form { fields, .. } => {
            if fields.is_empty() {
                diagnostics.push(Diagnostic::block(block, "Form has no fields"));
            }
        }
        BlockContent::List { items, .. } => {
            if items.is_empty() {
                diagnostics.push(Diagnostic::block(block, "List has no items"));
            }
        }
        BlockContent::Quote { text, .. } => {
            if text.trim().is_empty() {
                diagnostics.push(Diagnostic::block(block, "Quote has no text"));
            }
        }
        // Text, dividers, and container wrappers have no required fields;
        // unknown kinds are surfaced by the dispatch layers, not here.
        BlockContent::Text { .. }
        | BlockContent::Divider {}
        | BlockContent::Columns { .. }
        | BlockContent::Section { .. }
        | BlockContent::Unknown { .. } => {}
    }
}
