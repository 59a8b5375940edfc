use serde::{Deserialize, Serialize};

/// Token represents a single lexical unit in markup source.
///
/// Unlike a pure span, a token owns its text: link and image tokens carry a
/// synthesized `text|url` payload that does not appear verbatim in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub tag: Tag,
    pub text: String,
    pub loc: Loc,
    /// 1-based line of the token's first byte.
    pub line: u32,
}

impl Token {
    pub fn new(tag: Tag, text: impl Into<String>, loc: Loc, line: u32) -> Self {
        Token {
            tag,
            text: text.into(),
            loc,
            line,
        }
    }

    /// End-of-input sentinel placed at `offset`.
    pub fn eof(offset: usize, line: u32) -> Self {
        Token::new(
            Tag::Eof,
            "",
            Loc {
                start: offset,
                end: offset,
            },
            line,
        )
    }
}

/// Byte range of a token in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loc {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    // Block-level tokens
    Heading,
    CodeBlock,
    ListItemUnordered,
    ListItemOrdered,
    Blockquote,

    // Inline tokens
    Bold,
    Italic,
    Strikethrough,
    InlineCode,
    Link,
    Image,
    Text,

    // Whitespace and structural
    Newline,
    Whitespace,

    // Special
    Eof,
}

impl Tag {
    pub fn symbol(&self) -> &'static str {
        match self {
            Tag::Heading => "#",
            Tag::CodeBlock => "```",
            Tag::ListItemUnordered => "-",
            Tag::ListItemOrdered => "1.",
            Tag::Blockquote => ">",
            Tag::Bold => "**",
            Tag::Italic => "*",
            Tag::Strikethrough => "~~",
            Tag::InlineCode => "`",
            Tag::Link => "[",
            Tag::Image => "![",
            Tag::Newline => "\\n",
            Tag::Eof => "EOF",
            Tag::Text | Tag::Whitespace => self.name(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tag::Heading => "heading",
            Tag::CodeBlock => "code_block",
            Tag::ListItemUnordered => "list_item_unordered",
            Tag::ListItemOrdered => "list_item_ordered",
            Tag::Blockquote => "blockquote",
            Tag::Bold => "bold",
            Tag::Italic => "italic",
            Tag::Strikethrough => "strikethrough",
            Tag::InlineCode => "inline_code",
            Tag::Link => "link",
            Tag::Image => "image",
            Tag::Text => "text",
            Tag::Newline => "newline",
            Tag::Whitespace => "whitespace",
            Tag::Eof => "eof",
        }
    }

    /// Tokens that start a new block and therefore end any open paragraph.
    pub fn is_block_start(&self) -> bool {
        match self {
            Tag::Heading
            | Tag::CodeBlock
            | Tag::ListItemUnordered
            | Tag::ListItemOrdered
            | Tag::Blockquote
            | Tag::Newline
            | Tag::Eof => true,
            Tag::Bold
            | Tag::Italic
            | Tag::Strikethrough
            | Tag::InlineCode
            | Tag::Link
            | Tag::Image
            | Tag::Text
            | Tag::Whitespace => false,
        }
    }

    /// Delimiter tokens that open and close a nested inline span.
    pub fn is_span_delimiter(&self) -> bool {
        matches!(self, Tag::Bold | Tag::Italic | Tag::Strikethrough)
    }
}
