//! # Editor Control Dispatch
//!
//! Maps a block kind to the control surface that edits its content: a
//! static dispatch table over the closed kind set with a mandatory
//! fallback. The fallback edits the raw content generically, so a block
//! from an unregistered kind is still editable rather than read-only or
//! invisible.
//!
//! This replaces name-derived lookup (building a control identifier from
//! the kind string at runtime) with an exhaustive match, so adding a kind
//! without a control is a compile error, not a silent miss.

use trellis_blocks::{registry, Block};

/// How one content field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Text,
    RichText,
    Url,
    Number,
    Toggle,
    StringList,
    FormFields,
    /// Generic JSON editor, used by the fallback control
    Json,
}

/// One editable field of a block's content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Top-level content key the field patches
    pub key: &'static str,
    pub label: &'static str,
    pub input: FieldInput,
}

/// The control surface for one block kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorControl {
    /// Kind this control was resolved for
    pub kind: String,
    pub label: &'static str,
    pub fields: &'static [FieldSpec],
    /// True when this is the generic fallback rather than a dedicated
    /// control
    pub is_fallback: bool,
}

const FALLBACK_FIELDS: &[FieldSpec] = &[FieldSpec {
    key: "raw",
    label: "Raw content",
    input: FieldInput::Json,
}];

/// Resolve the editor control for a block kind
pub fn control_for(kind: &str) -> EditorControl {
    let fields: Option<&'static [FieldSpec]> = match kind {
        "heading" => Some(&[
            FieldSpec {
                key: "text",
                label: "Text",
                input: FieldInput::Text,
            },
            FieldSpec {
                key: "level",
                label: "Level",
                input: FieldInput::Number,
            },
        ]),
        "text" => Some(&[FieldSpec {
            key: "html",
            label: "Body",
            input: FieldInput::RichText,
        }]),
        "image" => Some(&[
            FieldSpec {
                key: "url",
                label: "Image URL",
                input: FieldInput::Url,
            },
            FieldSpec {
                key: "alt",
                label: "Alt text",
                input: FieldInput::Text,
            },
            FieldSpec {
                key: "caption",
                label: "Caption",
                input: FieldInput::Text,
            },
        ]),
        "button" => Some(&[
            FieldSpec {
                key: "label",
                label: "Label",
                input: FieldInput::Text,
            },
            FieldSpec {
                key: "url",
                label: "Link",
                input: FieldInput::Url,
            },
        ]),
        "quote" => Some(&[
            FieldSpec {
                key: "text",
                label: "Quote",
                input: FieldInput::Text,
            },
            FieldSpec {
                key: "attribution",
                label: "Attribution",
                input: FieldInput::Text,
            },
        ]),
        "list" => Some(&[
            FieldSpec {
                key: "ordered",
                label: "Numbered",
                input: FieldInput::Toggle,
            },
            FieldSpec {
                key: "items",
                label: "Items",
                input: FieldInput::StringList,
            },
        ]),
        "divider" => Some(&[]),
        "embed" => Some(&[
            FieldSpec {
                key: "url",
                label: "Embed URL",
                input: FieldInput::Url,
            },
            FieldSpec {
                key: "provider",
                label: "Provider",
                input: FieldInput::Text,
            },
        ]),
        "form" => Some(&[
            FieldSpec {
                key: "title",
                label: "Title",
                input: FieldInput::Text,
            },
            FieldSpec {
                key: "fields",
                label: "Fields",
                input: FieldInput::FormFields,
            },
            FieldSpec {
                key: "submit_label",
                label: "Submit label",
                input: FieldInput::Text,
            },
        ]),
        // Container children are edited on the canvas, not in the panel.
        "columns" => Some(&[]),
        "section" => Some(&[FieldSpec {
            key: "title",
            label: "Title",
            input: FieldInput::Text,
        }]),
        _ => None,
    };

    match fields {
        Some(fields) => EditorControl {
            kind: kind.to_string(),
            label: registry::get_or_unknown(kind).label,
            fields,
            is_fallback: false,
        },
        None => EditorControl {
            kind: kind.to_string(),
            label: registry::unknown_descriptor().label,
            fields: FALLBACK_FIELDS,
            is_fallback: true,
        },
    }
}

/// Resolve the control for a concrete block
pub fn control_for_block(block: &Block) -> EditorControl {
    control_for(&block.kind)
}
