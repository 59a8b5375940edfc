use serde_json::{Map, Value, json};

use crate::ast::*;
use crate::render::{Visitor, render};

/// Build the document as a nested JSON tree:
/// `{"type":"root","children":[...]}` with one object per node.
pub fn build_tree(document: &Document) -> Value {
    render(document, &mut TreeBuilder)
}

/// Serialize the document tree to compact JSON.
pub fn serialize_tree(document: &Document) -> String {
    build_tree(document).to_string()
}

pub fn serialize_tree_pretty(document: &Document) -> String {
    let tree = build_tree(document);
    serde_json::to_string_pretty(&tree).unwrap_or_else(|_| tree.to_string())
}

struct TreeBuilder;

impl TreeBuilder {
    fn children(&mut self, nodes: &[Node]) -> Value {
        Value::Array(nodes.iter().map(|node| node.accept(self)).collect())
    }

    fn items(&mut self, items: &[ListItem]) -> Value {
        Value::Array(items.iter().map(|item| item.accept(self)).collect())
    }

    fn node(kind: &str, fields: Vec<(&str, Value)>) -> Value {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::from(kind));
        for (key, value) in fields {
            object.insert(key.to_string(), value);
        }
        Value::Object(object)
    }
}

impl Visitor for TreeBuilder {
    type Output = Value;

    fn visit_document(&mut self, document: &Document) -> Value {
        json!({
            "type": "root",
            "children": self.children(&document.children),
        })
    }

    fn visit_heading(&mut self, heading: &Heading) -> Value {
        TreeBuilder::node(
            "heading",
            vec![
                ("level", json!(heading.level)),
                ("value", json!(heading.text)),
            ],
        )
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) -> Value {
        let children = self.children(&paragraph.children);
        TreeBuilder::node("paragraph", vec![("children", children)])
    }

    fn visit_code_block(&mut self, code_block: &CodeBlock) -> Value {
        TreeBuilder::node(
            "code_block",
            vec![
                ("lang", json!(code_block.language)),
                ("value", json!(code_block.code)),
            ],
        )
    }

    fn visit_bullet_list(&mut self, list: &BulletList) -> Value {
        let items = self.items(&list.items);
        TreeBuilder::node("bullet_list", vec![("items", items)])
    }

    fn visit_ordered_list(&mut self, list: &OrderedList) -> Value {
        let items = self.items(&list.items);
        TreeBuilder::node("ordered_list", vec![("items", items)])
    }

    fn visit_list_item(&mut self, item: &ListItem) -> Value {
        let children = self.children(&item.children);
        TreeBuilder::node("list_item", vec![("children", children)])
    }

    fn visit_blockquote(&mut self, blockquote: &Blockquote) -> Value {
        TreeBuilder::node("blockquote", vec![("value", json!(blockquote.content))])
    }

    fn visit_text(&mut self, text: &Text) -> Value {
        TreeBuilder::node("text", vec![("value", json!(text.content))])
    }

    fn visit_bold(&mut self, bold: &Bold) -> Value {
        let children = self.children(&bold.children);
        TreeBuilder::node("bold", vec![("children", children)])
    }

    fn visit_italic(&mut self, italic: &Italic) -> Value {
        let children = self.children(&italic.children);
        TreeBuilder::node("italic", vec![("children", children)])
    }

    fn visit_strikethrough(&mut self, strikethrough: &Strikethrough) -> Value {
        let children = self.children(&strikethrough.children);
        TreeBuilder::node("strikethrough", vec![("children", children)])
    }

    fn visit_inline_code(&mut self, code: &InlineCode) -> Value {
        TreeBuilder::node("inline_code", vec![("value", json!(code.code))])
    }

    fn visit_link(&mut self, link: &Link) -> Value {
        TreeBuilder::node(
            "link",
            vec![("url", json!(link.url)), ("value", json!(link.text))],
        )
    }

    fn visit_image(&mut self, image: &Image) -> Value {
        TreeBuilder::node(
            "image",
            vec![("url", json!(image.url)), ("alt", json!(image.alt_text))],
        )
    }
}
