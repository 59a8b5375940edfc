use crate::render::Visitor;

pub const MIN_HEADING_LEVEL: u8 = 1;
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Root of a parsed document.
///
/// Kept separate from [`Node`] so a document can never be nested inside
/// another one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Document { children }
    }

    /// Document whose only child is `raw` verbatim as one text leaf.
    pub fn plain_text(raw: impl Into<String>) -> Self {
        Document {
            children: vec![Node::text(raw)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_document(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    // Block nodes
    Heading(Heading),
    Paragraph(Paragraph),
    CodeBlock(CodeBlock),
    BulletList(BulletList),
    OrderedList(OrderedList),
    Blockquote(Blockquote),

    // Inline nodes
    Text(Text),
    Bold(Bold),
    Italic(Italic),
    Strikethrough(Strikethrough),
    InlineCode(InlineCode),
    Link(Link),
    Image(Image),
}

impl Node {
    pub fn name(&self) -> &'static str {
        match self {
            Node::Heading(_) => "heading",
            Node::Paragraph(_) => "paragraph",
            Node::CodeBlock(_) => "code_block",
            Node::BulletList(_) => "bullet_list",
            Node::OrderedList(_) => "ordered_list",
            Node::Blockquote(_) => "blockquote",
            Node::Text(_) => "text",
            Node::Bold(_) => "bold",
            Node::Italic(_) => "italic",
            Node::Strikethrough(_) => "strikethrough",
            Node::InlineCode(_) => "inline_code",
            Node::Link(_) => "link",
            Node::Image(_) => "image",
        }
    }

    pub fn is_block(&self) -> bool {
        match self {
            Node::Heading(_)
            | Node::Paragraph(_)
            | Node::CodeBlock(_)
            | Node::BulletList(_)
            | Node::OrderedList(_)
            | Node::Blockquote(_) => true,
            Node::Text(_)
            | Node::Bold(_)
            | Node::Italic(_)
            | Node::Strikethrough(_)
            | Node::InlineCode(_)
            | Node::Link(_)
            | Node::Image(_) => false,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(Text {
            content: content.into(),
        })
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Node::Heading(node) => visitor.visit_heading(node),
            Node::Paragraph(node) => visitor.visit_paragraph(node),
            Node::CodeBlock(node) => visitor.visit_code_block(node),
            Node::BulletList(node) => visitor.visit_bullet_list(node),
            Node::OrderedList(node) => visitor.visit_ordered_list(node),
            Node::Blockquote(node) => visitor.visit_blockquote(node),
            Node::Text(node) => visitor.visit_text(node),
            Node::Bold(node) => visitor.visit_bold(node),
            Node::Italic(node) => visitor.visit_italic(node),
            Node::Strikethrough(node) => visitor.visit_strikethrough(node),
            Node::InlineCode(node) => visitor.visit_inline_code(node),
            Node::Link(node) => visitor.visit_link(node),
            Node::Image(node) => visitor.visit_image(node),
        }
    }

    /// Concatenated text content of this node and its descendants, without
    /// any markup.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Heading(node) => out.push_str(&node.text),
            Node::Paragraph(Paragraph { children })
            | Node::Bold(Bold { children })
            | Node::Italic(Italic { children })
            | Node::Strikethrough(Strikethrough { children }) => {
                for child in children {
                    child.collect_text(out);
                }
            }
            Node::CodeBlock(node) => out.push_str(&node.code),
            Node::BulletList(BulletList { items }) | Node::OrderedList(OrderedList { items }) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    for child in &item.children {
                        child.collect_text(out);
                    }
                }
            }
            Node::Blockquote(node) => out.push_str(&node.content),
            Node::Text(node) => out.push_str(&node.content),
            Node::InlineCode(node) => out.push_str(&node.code),
            Node::Link(node) => out.push_str(&node.text),
            Node::Image(node) => out.push_str(&node.alt_text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Always within `MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL`.
    pub level: u8,
    pub text: String,
}

impl Heading {
    /// Clamps `level` into the valid heading range.
    pub fn new(level: usize, text: impl Into<String>) -> Self {
        let level = level.clamp(MIN_HEADING_LEVEL as usize, MAX_HEADING_LEVEL as usize) as u8;
        Heading {
            level,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bold {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Italic {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Strikethrough {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineCode {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Empty when the fence carried no language tag.
    pub language: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub alt_text: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletList {
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedList {
    pub items: Vec<ListItem>,
}

/// One entry of a bullet or ordered list; never appears outside one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    pub children: Vec<Node>,
}

impl ListItem {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_list_item(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blockquote {
    pub content: String,
}
