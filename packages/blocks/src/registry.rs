//! # Block Type Registry
//!
//! Static catalog of block kind descriptors. Lookup is a binary search over
//! a table sorted by id; registration happens at compile time, there is no
//! runtime mutation. An unregistered kind is an expected condition: callers
//! get `None` from [`get`] and fall back to [`unknown_descriptor`].

use serde_json::Value;

use crate::content::BlockContent;

/// Immutable description of one block kind
pub struct BlockDescriptor {
    /// Discriminant used by records, dispatch tables, and the store
    pub id: &'static str,

    /// Human-readable name for pickers and diagnostics
    pub label: &'static str,

    /// Whether this kind embeds child block lists inside its content
    pub allows_nesting: bool,

    default_content: fn() -> BlockContent,
}

impl BlockDescriptor {
    /// A fresh copy of this kind's default content
    pub fn default_content(&self) -> BlockContent {
        (self.default_content)()
    }
}

// Sorted by id for binary search.
static DESCRIPTORS: &[BlockDescriptor] = &[
    BlockDescriptor {
        id: "button",
        label: "Button",
        allows_nesting: false,
        default_content: || BlockContent::Button {
            label: String::new(),
            url: String::new(),
        },
    },
    BlockDescriptor {
        id: "columns",
        label: "Columns",
        allows_nesting: true,
        default_content: || BlockContent::Columns {
            columns: vec![Vec::new(), Vec::new()],
        },
    },
    BlockDescriptor {
        id: "divider",
        label: "Divider",
        allows_nesting: false,
        default_content: || BlockContent::Divider {},
    },
    BlockDescriptor {
        id: "embed",
        label: "Embed",
        allows_nesting: false,
        default_content: || BlockContent::Embed {
            url: String::new(),
            provider: String::new(),
        },
    },
    BlockDescriptor {
        id: "form",
        label: "Form",
        allows_nesting: false,
        default_content: || BlockContent::Form {
            title: String::new(),
            fields: Vec::new(),
            submit_label: "Submit".to_string(),
        },
    },
    BlockDescriptor {
        id: "heading",
        label: "Heading",
        allows_nesting: false,
        default_content: || BlockContent::Heading {
            text: String::new(),
            level: 2,
        },
    },
    BlockDescriptor {
        id: "image",
        label: "Image",
        allows_nesting: false,
        default_content: || BlockContent::Image {
            url: String::new(),
            alt: String::new(),
            caption: String::new(),
        },
    },
    BlockDescriptor {
        id: "list",
        label: "List",
        allows_nesting: false,
        default_content: || BlockContent::List {
            ordered: false,
            items: Vec::new(),
        },
    },
    BlockDescriptor {
        id: "quote",
        label: "Quote",
        allows_nesting: false,
        default_content: || BlockContent::Quote {
            text: String::new(),
            attribution: String::new(),
        },
    },
    BlockDescriptor {
        id: "section",
        label: "Section",
        allows_nesting: true,
        default_content: || BlockContent::Section {
            title: String::new(),
            blocks: Vec::new(),
        },
    },
    BlockDescriptor {
        id: "text",
        label: "Text",
        allows_nesting: false,
        default_content: || BlockContent::Text {
            html: String::new(),
        },
    },
];

static UNKNOWN: BlockDescriptor = BlockDescriptor {
    id: "unknown",
    label: "Unknown block",
    allows_nesting: false,
    default_content: || BlockContent::Unknown {
        kind: "unknown".to_string(),
        raw: Value::Null,
    },
};

/// Look up a descriptor by kind id
pub fn get(kind: &str) -> Option<&'static BlockDescriptor> {
    DESCRIPTORS
        .binary_search_by(|descriptor| descriptor.id.cmp(kind))
        .ok()
        .map(|index| &DESCRIPTORS[index])
}

/// Like [`get`], but falls back to a diagnostic descriptor so callers that
/// only need labels never branch on the miss
pub fn get_or_unknown(kind: &str) -> &'static BlockDescriptor {
    get(kind).unwrap_or(&UNKNOWN)
}

/// Fallback descriptor for unregistered kinds
pub fn unknown_descriptor() -> &'static BlockDescriptor {
    &UNKNOWN
}

/// All registered descriptors, sorted by id
pub fn all() -> &'static [BlockDescriptor] {
    DESCRIPTORS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_for_binary_search() {
        let ids: Vec<&str> = all().iter().map(|d| d.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn lookup_hits_every_registered_kind() {
        for descriptor in all() {
            let found = get(descriptor.id).expect("registered kind must resolve");
            assert_eq!(found.id, descriptor.id);
        }
    }

    #[test]
    fn lookup_misses_are_none() {
        assert!(get("gallery").is_none());
        assert!(get("").is_none());
    }

    #[test]
    fn fallback_descriptor_for_misses() {
        let descriptor = get_or_unknown("gallery");
        assert_eq!(descriptor.id, "unknown");
        assert!(!descriptor.allows_nesting);
    }

    #[test]
    fn default_content_matches_descriptor_kind() {
        for descriptor in all() {
            assert_eq!(descriptor.default_content().kind(), descriptor.id);
        }
    }

    #[test]
    fn only_containers_allow_nesting() {
        for descriptor in all() {
            assert_eq!(
                descriptor.allows_nesting,
                descriptor.default_content().is_container(),
            );
        }
    }
}
