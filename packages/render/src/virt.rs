//! Virtual node definitions for rendered block output
//!
//! This is what the render dispatch produces - a platform-agnostic tree
//! that can be:
//! 1. Rendered directly in the storefront page
//! 2. Diffed for incremental preview updates
//! 3. Walked by tests without a DOM

use serde::{Deserialize, Serialize};

/// Virtual HTML node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VirtualNode {
    Element(VirtualElement),
    Text(String),
    Fragment(Vec<VirtualNode>),
}

/// Virtual element with source mapping back to its block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualElement {
    /// HTML tag name
    pub tag: String,

    /// Block id this element was rendered from (empty for structural
    /// wrappers below the block level)
    pub source_id: String,

    /// HTML attributes
    pub attributes: Vec<(String, String)>,

    /// CSS class names
    pub class_names: Vec<String>,

    /// Child nodes
    pub children: Vec<VirtualNode>,
}

impl VirtualElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            source_id: String::new(),
            attributes: Vec::new(),
            class_names: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn source(mut self, id: impl Into<String>) -> Self {
        self.source_id = id.into();
        self
    }

    pub fn class(mut self, name: impl Into<String>) -> Self {
        self.class_names.push(name.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, node: VirtualNode) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = VirtualNode>) -> Self {
        self.children.extend(nodes);
        self
    }
}

impl From<VirtualElement> for VirtualNode {
    fn from(element: VirtualElement) -> Self {
        VirtualNode::Element(element)
    }
}
