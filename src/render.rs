use serde::{Deserialize, Serialize};

use crate::ast::*;
use crate::chat::ChatRenderer;
use crate::html::HtmlRenderer;

/// One method per node kind. Adding a node variant breaks every visitor
/// until it handles the new kind.
pub trait Visitor {
    type Output;

    fn visit_document(&mut self, document: &Document) -> Self::Output;

    // Block nodes
    fn visit_heading(&mut self, heading: &Heading) -> Self::Output;
    fn visit_paragraph(&mut self, paragraph: &Paragraph) -> Self::Output;
    fn visit_code_block(&mut self, code_block: &CodeBlock) -> Self::Output;
    fn visit_bullet_list(&mut self, list: &BulletList) -> Self::Output;
    fn visit_ordered_list(&mut self, list: &OrderedList) -> Self::Output;
    fn visit_list_item(&mut self, item: &ListItem) -> Self::Output;
    fn visit_blockquote(&mut self, blockquote: &Blockquote) -> Self::Output;

    // Inline nodes
    fn visit_text(&mut self, text: &Text) -> Self::Output;
    fn visit_bold(&mut self, bold: &Bold) -> Self::Output;
    fn visit_italic(&mut self, italic: &Italic) -> Self::Output;
    fn visit_strikethrough(&mut self, strikethrough: &Strikethrough) -> Self::Output;
    fn visit_inline_code(&mut self, code: &InlineCode) -> Self::Output;
    fn visit_link(&mut self, link: &Link) -> Self::Output;
    fn visit_image(&mut self, image: &Image) -> Self::Output;
}

/// Render `document` with any visitor.
pub fn render<V: Visitor>(document: &Document, visitor: &mut V) -> V::Output {
    document.accept(visitor)
}

/// The built-in string renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    Html,
    ChatText,
}

impl RendererKind {
    pub fn name(&self) -> &'static str {
        match self {
            RendererKind::Html => "html",
            RendererKind::ChatText => "chat_text",
        }
    }
}

pub fn render_as(document: &Document, kind: RendererKind) -> String {
    match kind {
        RendererKind::Html => render(document, &mut HtmlRenderer::new()),
        RendererKind::ChatText => render(document, &mut ChatRenderer::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;

    /// Counts nodes to check that a custom visitor needs no AST changes.
    struct NodeCounter;

    impl NodeCounter {
        fn sum(&mut self, children: &[Node]) -> usize {
            children.iter().map(|child| child.accept(self)).sum()
        }
    }

    impl Visitor for NodeCounter {
        type Output = usize;

        fn visit_document(&mut self, document: &Document) -> usize {
            self.sum(&document.children)
        }
        fn visit_heading(&mut self, _: &Heading) -> usize {
            1
        }
        fn visit_paragraph(&mut self, paragraph: &Paragraph) -> usize {
            1 + self.sum(&paragraph.children)
        }
        fn visit_code_block(&mut self, _: &CodeBlock) -> usize {
            1
        }
        fn visit_bullet_list(&mut self, list: &BulletList) -> usize {
            1 + list.items.iter().map(|item| item.accept(self)).sum::<usize>()
        }
        fn visit_ordered_list(&mut self, list: &OrderedList) -> usize {
            1 + list.items.iter().map(|item| item.accept(self)).sum::<usize>()
        }
        fn visit_list_item(&mut self, item: &ListItem) -> usize {
            1 + self.sum(&item.children)
        }
        fn visit_blockquote(&mut self, _: &Blockquote) -> usize {
            1
        }
        fn visit_text(&mut self, _: &Text) -> usize {
            1
        }
        fn visit_bold(&mut self, bold: &Bold) -> usize {
            1 + self.sum(&bold.children)
        }
        fn visit_italic(&mut self, italic: &Italic) -> usize {
            1 + self.sum(&italic.children)
        }
        fn visit_strikethrough(&mut self, strike: &Strikethrough) -> usize {
            1 + self.sum(&strike.children)
        }
        fn visit_inline_code(&mut self, _: &InlineCode) -> usize {
            1
        }
        fn visit_link(&mut self, _: &Link) -> usize {
            1
        }
        fn visit_image(&mut self, _: &Image) -> usize {
            1
        }
    }

    #[test]
    fn custom_visitor_walks_whole_tree() {
        let doc = parse_markdown("# T\n**a** b\n- x\n- y");
        // heading + paragraph(bold(text), text) + list(item(text), item(text))
        assert_eq!(10, render(&doc, &mut NodeCounter));
    }

    #[test]
    fn render_as_selects_builtin_renderer() {
        let doc = parse_markdown("# Hi");
        assert_eq!("<h1>Hi</h1>", render_as(&doc, RendererKind::Html));
        assert_eq!("§1§lHi§r", render_as(&doc, RendererKind::ChatText));
    }

    #[test]
    fn empty_document_renders_empty() {
        let doc = Document::default();
        assert_eq!("", render_as(&doc, RendererKind::Html));
        assert_eq!("", render_as(&doc, RendererKind::ChatText));
    }
}
