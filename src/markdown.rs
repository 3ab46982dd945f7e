// ABOUTME: Markdown handling for slide content
// ABOUTME: Static HTML conversion and plain structured text for PPTX frames

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{markdown_to_html, parse_document, Arena, ComrakOptions};

fn options() -> ComrakOptions {
    let mut options = ComrakOptions::default();
    options.render.unsafe_ = true; // Allow raw HTML
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
}

/// Convert markdown to an HTML fragment.
pub fn to_html(source: &str) -> String {
    markdown_to_html(source, &options())
}

/// How a block of markdown text should be presented in a text frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading(u8),
    Bullet(u32),
    Numbered(u32),
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub kind: BlockKind,
    pub text: String,
}

/// Strip markdown down to one block per paragraph, heading, list item or
/// code line. Inline formatting is dropped; link text is kept.
pub fn to_text_blocks(source: &str) -> Vec<TextBlock> {
    let arena = Arena::new();
    let root = parse_document(&arena, source, &options());
    let mut blocks = Vec::new();
    let mut lists = Vec::new();
    collect_blocks(root, &mut lists, &mut blocks);
    blocks
}

fn collect_blocks<'a>(node: &'a AstNode<'a>, lists: &mut Vec<ListType>, out: &mut Vec<TextBlock>) {
    for child in node.children() {
        collect_node(child, lists, out);
    }
}

fn collect_node<'a>(node: &'a AstNode<'a>, lists: &mut Vec<ListType>, out: &mut Vec<TextBlock>) {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Heading(heading) => out.push(TextBlock {
            kind: BlockKind::Heading(heading.level),
            text: inline_text(node),
        }),
        NodeValue::Paragraph => out.push(TextBlock {
            kind: BlockKind::Paragraph,
            text: inline_text(node),
        }),
        NodeValue::CodeBlock(code) => {
            out.extend(code.literal.lines().map(|line| TextBlock {
                kind: BlockKind::Code,
                text: line.to_string(),
            }));
        }
        NodeValue::List(list) => {
            lists.push(list.list_type);
            collect_blocks(node, lists, out);
            lists.pop();
        }
        NodeValue::Item(_) => collect_item(node, lists, out),
        NodeValue::TableRow(_) => {
            let cells: Vec<String> = node.children().map(inline_text).collect();
            out.push(TextBlock {
                kind: BlockKind::Paragraph,
                text: cells.join(" | "),
            });
        }
        NodeValue::HtmlBlock(_) | NodeValue::ThematicBreak => {}
        _ => collect_blocks(node, lists, out),
    }
}

fn collect_item<'a>(item: &'a AstNode<'a>, lists: &mut Vec<ListType>, out: &mut Vec<TextBlock>) {
    let level = lists.len().saturating_sub(1) as u32;
    let kind = match lists.last() {
        Some(ListType::Ordered) => BlockKind::Numbered(level),
        _ => BlockKind::Bullet(level),
    };
    let mut marked = false;
    for child in item.children() {
        let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
        if is_paragraph && !marked {
            out.push(TextBlock {
                kind,
                text: inline_text(child),
            });
            marked = true;
        } else if is_paragraph {
            out.push(TextBlock {
                kind: BlockKind::Paragraph,
                text: inline_text(child),
            });
        } else {
            collect_node(child, lists, out);
        }
    }
}

fn inline_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        match &descendant.data.borrow().value {
            NodeValue::Text(literal) => text.push_str(literal),
            NodeValue::Code(code) => text.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}
