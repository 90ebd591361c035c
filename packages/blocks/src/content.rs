//! # Block Content
//!
//! The typed content payload carried by every block.
//!
//! Content is a closed sum type with one variant per registered block kind,
//! plus [`BlockContent::Unknown`] which preserves payloads whose kind is not
//! registered, so a newer document never loses data when opened by an older
//! build (the dispatch layers surface a diagnostic instead).
//!
//! ## Wire shape
//!
//! On the wire a block's content is an opaque JSON string whose shape is
//! selected by the record's `type` column, not by an embedded tag. The
//! internally-tagged serde form is only used for children embedded inside
//! container content; [`BlockContent::from_wire`] and
//! [`BlockContent::to_wire_value`] adapt between the two at the record
//! boundary.
//!
//! ## Containment
//!
//! Container variants (`Columns`, `Section`) embed their children as block
//! lists inside their own content. This is the canonical in-memory
//! containment form; flat `parent_block_id` linkage exists only at the
//! persistence boundary.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::block::Block;
use crate::registry;

fn default_heading_level() -> u8 {
    2
}

/// A single input field inside a form block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub field_kind: FormFieldKind,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFieldKind {
    #[default]
    Text,
    Email,
    Phone,
    Textarea,
}

/// Typed content, one variant per registered block kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockContent {
    Heading {
        #[serde(default)]
        text: String,
        #[serde(default = "default_heading_level")]
        level: u8,
    },

    /// Rich text. The markup itself is opaque to the engine.
    Text {
        #[serde(default)]
        html: String,
    },

    Image {
        #[serde(default)]
        url: String,
        #[serde(default)]
        alt: String,
        #[serde(default)]
        caption: String,
    },

    Button {
        #[serde(default)]
        label: String,
        #[serde(default)]
        url: String,
    },

    Quote {
        #[serde(default)]
        text: String,
        #[serde(default)]
        attribution: String,
    },

    List {
        #[serde(default)]
        ordered: bool,
        #[serde(default)]
        items: Vec<String>,
    },

    Divider {},

    Embed {
        #[serde(default)]
        url: String,
        #[serde(default)]
        provider: String,
    },

    Form {
        #[serde(default)]
        title: String,
        #[serde(default)]
        fields: Vec<FormField>,
        #[serde(default)]
        submit_label: String,
    },

    /// Side-by-side columns, each holding its own ordered block list
    Columns {
        #[serde(default)]
        columns: Vec<Vec<Block>>,
    },

    /// A titled wrapper around one ordered block list
    Section {
        #[serde(default)]
        title: String,
        #[serde(default)]
        blocks: Vec<Block>,
    },

    /// Payload for an unregistered kind, preserved verbatim
    Unknown {
        #[serde(rename = "unknown_kind")]
        kind: String,
        #[serde(default)]
        raw: Value,
    },
}

impl BlockContent {
    /// The registry discriminant for this content
    pub fn kind(&self) -> &str {
        match self {
            BlockContent::Heading { .. } => "heading",
            BlockContent::Text { .. } => "text",
            BlockContent::Image { .. } => "image",
            BlockContent::Button { .. } => "button",
            BlockContent::Quote { .. } => "quote",
            BlockContent::List { .. } => "list",
            BlockContent::Divider {} => "divider",
            BlockContent::Embed { .. } => "embed",
            BlockContent::Form { .. } => "form",
            BlockContent::Columns { .. } => "columns",
            BlockContent::Section { .. } => "section",
            BlockContent::Unknown { kind, .. } => kind,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(
            self,
            BlockContent::Columns { .. } | BlockContent::Section { .. }
        )
    }

    /// Embedded child lists, in column order. Empty for leaf kinds.
    pub fn child_lists(&self) -> Vec<&Vec<Block>> {
        match self {
            BlockContent::Columns { columns } => columns.iter().collect(),
            BlockContent::Section { blocks, .. } => vec![blocks],
            _ => Vec::new(),
        }
    }

    pub fn child_lists_mut(&mut self) -> Vec<&mut Vec<Block>> {
        match self {
            BlockContent::Columns { columns } => columns.iter_mut().collect(),
            BlockContent::Section { blocks, .. } => vec![blocks],
            _ => Vec::new(),
        }
    }

    /// Build content from the wire form: a kind discriminant plus the parsed
    /// content object.
    ///
    /// Unregistered kinds are preserved as [`BlockContent::Unknown`]. A
    /// payload that does not match its kind's shape is replaced by the
    /// kind's empty content rather than failing the load.
    pub fn from_wire(kind: &str, value: Value) -> BlockContent {
        if registry::get(kind).is_none() {
            return BlockContent::Unknown {
                kind: kind.to_string(),
                raw: value,
            };
        }

        match Self::parse_tagged(kind, value.clone()) {
            Ok(content) => content,
            Err(err) => {
                warn!(kind, %err, "content payload did not match its kind, substituting empty content");
                Self::parse_tagged(kind, Value::Object(Map::new())).unwrap_or_else(|_| {
                    BlockContent::Unknown {
                        kind: kind.to_string(),
                        raw: value,
                    }
                })
            }
        }
    }

    fn parse_tagged(kind: &str, value: Value) -> Result<BlockContent, serde_json::Error> {
        let mut map = match value {
            Value::Object(map) => map,
            // Non-object payloads cannot match any registered shape; parse
            // the empty object so every `#[serde(default)]` field applies.
            _ => Map::new(),
        };
        map.insert("kind".to_string(), Value::String(kind.to_string()));
        serde_json::from_value(Value::Object(map))
    }

    /// The wire form of this content: a plain JSON object without the kind
    /// tag (the tag lives in the record's `type` column).
    pub fn to_wire_value(&self) -> Result<Value, serde_json::Error> {
        if let BlockContent::Unknown { raw, .. } = self {
            return Ok(raw.clone());
        }

        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            map.remove("kind");
        }
        Ok(value)
    }

    /// Shallow-merge a patch into this content at the top level.
    ///
    /// Unrecognized keys in the patch survive only for unknown kinds; for
    /// registered kinds the merged object is re-parsed through the kind's
    /// shape, so stray keys are dropped. A patch value that does not fit
    /// the shape leaves the content unchanged; existing data is never
    /// replaced by empty content.
    pub fn merged(&self, patch: &Value) -> BlockContent {
        let Value::Object(delta) = patch else {
            debug!(kind = self.kind(), "ignoring non-object content patch");
            return self.clone();
        };

        if let BlockContent::Unknown { kind, raw } = self {
            let mut base = match raw.clone() {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            for (key, value) in delta {
                base.insert(key.clone(), value.clone());
            }
            return BlockContent::Unknown {
                kind: kind.clone(),
                raw: Value::Object(base),
            };
        }

        let mut value = match self.to_wire_value() {
            Ok(value) => value,
            Err(err) => {
                warn!(kind = self.kind(), %err, "content not patchable, keeping previous value");
                return self.clone();
            }
        };
        if let Value::Object(base) = &mut value {
            for (key, patched) in delta {
                base.insert(key.clone(), patched.clone());
            }
        }
        // Not `from_wire`: its empty-content substitution would discard the
        // existing data a bad patch failed to replace.
        match Self::parse_tagged(self.kind(), value) {
            Ok(content) => content,
            Err(err) => {
                warn!(kind = self.kind(), %err, "patch did not fit the content shape, keeping previous value");
                self.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            BlockContent::Heading {
                text: "Hi".to_string(),
                level: 2
            }
            .kind(),
            "heading"
        );
        assert_eq!(BlockContent::Divider {}.kind(), "divider");

        let unknown = BlockContent::Unknown {
            kind: "gallery".to_string(),
            raw: json!({"images": []}),
        };
        assert_eq!(unknown.kind(), "gallery");
    }

    #[test]
    fn wire_value_has_no_tag() {
        let content = BlockContent::Image {
            url: "https://cdn.example.com/a.jpg".to_string(),
            alt: "a".to_string(),
            caption: String::new(),
        };
        let value = content.to_wire_value().unwrap();
        assert!(value.get("kind").is_none());
        assert_eq!(value["url"], "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn from_wire_roundtrips_registered_kind() {
        let content = BlockContent::Quote {
            text: "said".to_string(),
            attribution: "someone".to_string(),
        };
        let value = content.to_wire_value().unwrap();
        assert_eq!(BlockContent::from_wire("quote", value), content);
    }

    #[test]
    fn from_wire_preserves_unknown_kind() {
        let raw = json!({"images": ["a.jpg", "b.jpg"]});
        let content = BlockContent::from_wire("gallery", raw.clone());
        assert_eq!(
            content,
            BlockContent::Unknown {
                kind: "gallery".to_string(),
                raw
            }
        );
    }

    #[test]
    fn from_wire_substitutes_empty_content_on_shape_mismatch() {
        // items must be an array of strings
        let content = BlockContent::from_wire("list", json!({"items": 42}));
        assert_eq!(
            content,
            BlockContent::List {
                ordered: false,
                items: vec![]
            }
        );
    }

    #[test]
    fn merge_is_shallow_and_typed() {
        let content = BlockContent::Heading {
            text: "Old".to_string(),
            level: 3,
        };
        let merged = content.merged(&json!({"text": "New"}));
        assert_eq!(
            merged,
            BlockContent::Heading {
                text: "New".to_string(),
                level: 3
            }
        );
    }

    #[test]
    fn merge_into_unknown_keeps_extra_keys() {
        let content = BlockContent::Unknown {
            kind: "gallery".to_string(),
            raw: json!({"images": [], "layout": "grid"}),
        };
        let merged = content.merged(&json!({"images": ["a.jpg"]}));
        assert_eq!(
            merged,
            BlockContent::Unknown {
                kind: "gallery".to_string(),
                raw: json!({"images": ["a.jpg"], "layout": "grid"}),
            }
        );
    }

    #[test]
    fn ill_typed_patch_value_keeps_existing_content() {
        let content = BlockContent::Heading {
            text: "Welcome".to_string(),
            level: 2,
        };
        // level does not fit in a u8, so the merge cannot apply; the
        // existing text must survive.
        assert_eq!(content.merged(&json!({"level": 300})), content);
    }

    #[test]
    fn non_object_patch_is_ignored() {
        let content = BlockContent::Text {
            html: "<p>hi</p>".to_string(),
        };
        assert_eq!(content.merged(&json!("oops")), content);
    }
}
