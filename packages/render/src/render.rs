//! # Render Dispatch
//!
//! Block list → virtual node tree. A stateless match over the closed
//! content sum type; there is no transition state, only recursion into
//! container content.
//!
//! Every kind renders *something*: unknown kinds get a visible diagnostic
//! placeholder rather than disappearing, and a container encountered inside
//! another container renders a warning placeholder instead of recursing.
//! Container nesting is capped at depth one, which bounds call depth for
//! any input, including hand-crafted persisted documents.

use tracing::warn;

use trellis_blocks::{registry, Block, BlockContent, FormFieldKind};

use crate::virt::{VirtualElement, VirtualNode};

/// Container nesting cap: a container renders its children, but a container
/// child inside one is refused.
const MAX_CONTAINER_DEPTH: usize = 1;

/// Render a document's block list to one fragment
pub fn render_document(blocks: &[Block]) -> VirtualNode {
    VirtualNode::Fragment(render_list(blocks, 0))
}

fn render_list(blocks: &[Block], container_depth: usize) -> Vec<VirtualNode> {
    blocks
        .iter()
        .map(|block| render_block(block, container_depth))
        .collect()
}

/// Render a single block at the given container depth
pub fn render_block(block: &Block, container_depth: usize) -> VirtualNode {
    if block.content.is_container() && container_depth >= MAX_CONTAINER_DEPTH {
        warn!(
            block_id = %block.id,
            kind = %block.kind,
            "container nested beyond the depth cap, rendering placeholder"
        );
        return nesting_placeholder(block);
    }

    match &block.content {
        BlockContent::Heading { text, level } => {
            let level = (*level).clamp(1, 6);
            VirtualElement::new(format!("h{level}"))
                .source(&block.id)
                .class("block-heading")
                .child(VirtualNode::Text(text.clone()))
                .into()
        }

        BlockContent::Text { html } => VirtualElement::new("div")
            .source(&block.id)
            .class("block-text")
            // Rich text markup is opaque to the engine; the host decides
            // how to mount it.
            .child(VirtualNode::Text(html.clone()))
            .into(),

        BlockContent::Image { url, alt, caption } => {
            let img = VirtualElement::new("img")
                .attr("src", url)
                .attr("alt", alt);
            let mut figure = VirtualElement::new("figure")
                .source(&block.id)
                .class("block-image")
                .child(img.into());
            if !caption.is_empty() {
                figure = figure.child(
                    VirtualElement::new("figcaption")
                        .child(VirtualNode::Text(caption.clone()))
                        .into(),
                );
            }
            figure.into()
        }

        BlockContent::Button { label, url } => VirtualElement::new("a")
            .source(&block.id)
            .class("block-button")
            .attr("href", url)
            .child(VirtualNode::Text(label.clone()))
            .into(),

        BlockContent::Quote { text, attribution } => {
            let mut quote = VirtualElement::new("blockquote")
                .source(&block.id)
                .class("block-quote")
                .child(VirtualNode::Text(text.clone()));
            if !attribution.is_empty() {
                quote = quote.child(
                    VirtualElement::new("cite")
                        .child(VirtualNode::Text(attribution.clone()))
                        .into(),
                );
            }
            quote.into()
        }

        BlockContent::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            VirtualElement::new(tag)
                .source(&block.id)
                .class("block-list")
                .children(items.iter().map(|item| {
                    VirtualElement::new("li")
                        .child(VirtualNode::Text(item.clone()))
                        .into()
                }))
                .into()
        }

        BlockContent::Divider {} => VirtualElement::new("hr")
            .source(&block.id)
            .class("block-divider")
            .into(),

        BlockContent::Embed { url, provider } => VirtualElement::new("iframe")
            .source(&block.id)
            .class("block-embed")
            .attr("src", url)
            .attr("data-provider", provider)
            .into(),

        BlockContent::Form {
            title,
            fields,
            submit_label,
        } => {
            let mut form = VirtualElement::new("form")
                .source(&block.id)
                .class("block-form");
            if !title.is_empty() {
                form = form.child(
                    VirtualElement::new("h3")
                        .child(VirtualNode::Text(title.clone()))
                        .into(),
                );
            }
            form = form.children(fields.iter().map(|field| {
                let tag = match field.field_kind {
                    FormFieldKind::Textarea => "textarea",
                    _ => "input",
                };
                let mut input = VirtualElement::new(tag)
                    .attr("name", &field.name)
                    .attr("placeholder", &field.label);
                if field.required {
                    input = input.attr("required", "required");
                }
                input.into()
            }));
            form.child(
                VirtualElement::new("button")
                    .attr("type", "submit")
                    .child(VirtualNode::Text(submit_label.clone()))
                    .into(),
            )
            .into()
        }

        BlockContent::Columns { columns } => VirtualElement::new("div")
            .source(&block.id)
            .class("block-columns")
            .children(columns.iter().map(|column| {
                VirtualElement::new("div")
                    .class("block-column")
                    .children(render_list(column, container_depth + 1))
                    .into()
            }))
            .into(),

        BlockContent::Section { title, blocks } => {
            let mut section = VirtualElement::new("section")
                .source(&block.id)
                .class("block-section");
            if !title.is_empty() {
                section = section.child(
                    VirtualElement::new("h2")
                        .child(VirtualNode::Text(title.clone()))
                        .into(),
                );
            }
            section
                .children(render_list(blocks, container_depth + 1))
                .into()
        }

        BlockContent::Unknown { kind, raw } => {
            warn!(block_id = %block.id, kind = %kind, "rendering placeholder for unknown block kind");
            unknown_placeholder(block, kind, raw)
        }
    }
}

// The fallback is always visible: never an empty fragment, so an
// unrenderable block still has an affordance in the page.
fn unknown_placeholder(
    block: &Block,
    kind: &str,
    raw: &serde_json::Value,
) -> VirtualNode {
    let label = registry::get_or_unknown(kind).label;
    VirtualElement::new("div")
        .source(&block.id)
        .class("block-unknown")
        .attr("data-kind", kind)
        .child(VirtualNode::Text(format!("{label}: {kind}")))
        .child(
            VirtualElement::new("pre")
                .child(VirtualNode::Text(raw.to_string()))
                .into(),
        )
        .into()
}

fn nesting_placeholder(block: &Block) -> VirtualNode {
    VirtualElement::new("div")
        .source(&block.id)
        .class("block-nesting-refused")
        .attr("data-kind", &block.kind)
        .child(VirtualNode::Text(
            "Nested layout blocks are not supported here".to_string(),
        ))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn element(node: &VirtualNode) -> &VirtualElement {
        match node {
            VirtualNode::Element(element) => element,
            other => panic!("expected element, got {other:?}"),
        }
    }

    #[test]
    fn every_registered_kind_renders_something() {
        for descriptor in registry::all() {
            let block = Block::new("b-1", descriptor.default_content(), 0);
            let node = render_block(&block, 0);
            match node {
                VirtualNode::Element(_) => {}
                other => panic!("kind {} rendered {other:?}", descriptor.id),
            }
        }
    }

    #[test]
    fn heading_level_is_clamped_to_valid_tags() {
        let block = Block::new(
            "h-1",
            BlockContent::Heading {
                text: "Hi".to_string(),
                level: 9,
            },
            0,
        );
        assert_eq!(element(&render_block(&block, 0)).tag, "h6");
    }

    #[test]
    fn container_renders_its_children() {
        let child = Block::new(
            "c-1",
            BlockContent::Heading {
                text: "Inside".to_string(),
                level: 2,
            },
            0,
        );
        let section = Block::new(
            "s-1",
            BlockContent::Section {
                title: "Part".to_string(),
                blocks: vec![child],
            },
            0,
        );

        let rendered = element(&render_block(&section, 0)).clone();
        assert_eq!(rendered.tag, "section");
        // Title heading + one child block.
        assert_eq!(rendered.children.len(), 2);
        assert_eq!(element(&rendered.children[1]).source_id, "c-1");
    }

    #[test]
    fn container_in_container_renders_a_placeholder_not_recursion() {
        let inner = Block::new(
            "inner",
            BlockContent::Section {
                title: String::new(),
                blocks: vec![Block::new(
                    "leaf",
                    BlockContent::Text {
                        html: "deep".to_string(),
                    },
                    0,
                )],
            },
            0,
        );
        let outer = Block::new(
            "outer",
            BlockContent::Columns {
                columns: vec![vec![inner]],
            },
            0,
        );

        let rendered = element(&render_block(&outer, 0)).clone();
        let column = element(&rendered.children[0]).clone();
        let refused = element(&column.children[0]).clone();
        assert_eq!(refused.class_names, vec!["block-nesting-refused"]);
        assert_eq!(refused.source_id, "inner");
    }

    #[test]
    fn unknown_kind_renders_a_visible_diagnostic() {
        let block = Block::new(
            "u-1",
            BlockContent::Unknown {
                kind: "gallery".to_string(),
                raw: json!({"images": ["a.jpg"]}),
            },
            0,
        );

        let rendered = element(&render_block(&block, 0)).clone();
        assert_eq!(rendered.class_names, vec!["block-unknown"]);
        assert!(!rendered.children.is_empty());
        assert!(rendered
            .attributes
            .contains(&("data-kind".to_string(), "gallery".to_string())));
    }

    #[test]
    fn document_renders_blocks_in_order() {
        let blocks = vec![
            Block::new(
                "a",
                BlockContent::Heading {
                    text: "One".to_string(),
                    level: 1,
                },
                0,
            ),
            Block::new("b", BlockContent::Divider {}, 1),
        ];

        match render_document(&blocks) {
            VirtualNode::Fragment(nodes) => {
                assert_eq!(element(&nodes[0]).source_id, "a");
                assert_eq!(element(&nodes[1]).source_id, "b");
            }
            other => panic!("expected fragment, got {other:?}"),
        }
    }
}
