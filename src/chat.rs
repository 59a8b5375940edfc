use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::*;
use crate::render::Visitor;

/// Prefix character of every chat formatting code.
pub const FORMAT_PREFIX: char = '§';

/// Chat formatting codes: sixteen colours, five decorations and reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatFormatting {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
}

impl ChatFormatting {
    pub const ALL: [ChatFormatting; 22] = [
        ChatFormatting::Black,
        ChatFormatting::DarkBlue,
        ChatFormatting::DarkGreen,
        ChatFormatting::DarkAqua,
        ChatFormatting::DarkRed,
        ChatFormatting::DarkPurple,
        ChatFormatting::Gold,
        ChatFormatting::Gray,
        ChatFormatting::DarkGray,
        ChatFormatting::Blue,
        ChatFormatting::Green,
        ChatFormatting::Aqua,
        ChatFormatting::Red,
        ChatFormatting::LightPurple,
        ChatFormatting::Yellow,
        ChatFormatting::White,
        ChatFormatting::Obfuscated,
        ChatFormatting::Bold,
        ChatFormatting::Strikethrough,
        ChatFormatting::Underline,
        ChatFormatting::Italic,
        ChatFormatting::Reset,
    ];

    pub fn code(&self) -> char {
        match self {
            ChatFormatting::Black => '0',
            ChatFormatting::DarkBlue => '1',
            ChatFormatting::DarkGreen => '2',
            ChatFormatting::DarkAqua => '3',
            ChatFormatting::DarkRed => '4',
            ChatFormatting::DarkPurple => '5',
            ChatFormatting::Gold => '6',
            ChatFormatting::Gray => '7',
            ChatFormatting::DarkGray => '8',
            ChatFormatting::Blue => '9',
            ChatFormatting::Green => 'a',
            ChatFormatting::Aqua => 'b',
            ChatFormatting::Red => 'c',
            ChatFormatting::LightPurple => 'd',
            ChatFormatting::Yellow => 'e',
            ChatFormatting::White => 'f',
            ChatFormatting::Obfuscated => 'k',
            ChatFormatting::Bold => 'l',
            ChatFormatting::Strikethrough => 'm',
            ChatFormatting::Underline => 'n',
            ChatFormatting::Italic => 'o',
            ChatFormatting::Reset => 'r',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        Self::ALL.iter().copied().find(|format| format.code() == code)
    }

    /// Name used by the chat-component JSON shape.
    pub fn name(&self) -> &'static str {
        match self {
            ChatFormatting::Black => "black",
            ChatFormatting::DarkBlue => "dark_blue",
            ChatFormatting::DarkGreen => "dark_green",
            ChatFormatting::DarkAqua => "dark_aqua",
            ChatFormatting::DarkRed => "dark_red",
            ChatFormatting::DarkPurple => "dark_purple",
            ChatFormatting::Gold => "gold",
            ChatFormatting::Gray => "gray",
            ChatFormatting::DarkGray => "dark_gray",
            ChatFormatting::Blue => "blue",
            ChatFormatting::Green => "green",
            ChatFormatting::Aqua => "aqua",
            ChatFormatting::Red => "red",
            ChatFormatting::LightPurple => "light_purple",
            ChatFormatting::Yellow => "yellow",
            ChatFormatting::White => "white",
            ChatFormatting::Obfuscated => "obfuscated",
            ChatFormatting::Bold => "bold",
            ChatFormatting::Strikethrough => "strikethrough",
            ChatFormatting::Underline => "underline",
            ChatFormatting::Italic => "italic",
            ChatFormatting::Reset => "reset",
        }
    }

    /// 24-bit RGB value for colour codes, `None` for decorations.
    pub fn rgb(&self) -> Option<u32> {
        match self {
            ChatFormatting::Black => Some(0x000000),
            ChatFormatting::DarkBlue => Some(0x0000AA),
            ChatFormatting::DarkGreen => Some(0x00AA00),
            ChatFormatting::DarkAqua => Some(0x00AAAA),
            ChatFormatting::DarkRed => Some(0xAA0000),
            ChatFormatting::DarkPurple => Some(0xAA00AA),
            ChatFormatting::Gold => Some(0xFFAA00),
            ChatFormatting::Gray => Some(0xAAAAAA),
            ChatFormatting::DarkGray => Some(0x555555),
            ChatFormatting::Blue => Some(0x5555FF),
            ChatFormatting::Green => Some(0x55FF55),
            ChatFormatting::Aqua => Some(0x55FFFF),
            ChatFormatting::Red => Some(0xFF5555),
            ChatFormatting::LightPurple => Some(0xFF55FF),
            ChatFormatting::Yellow => Some(0xFFFF55),
            ChatFormatting::White => Some(0xFFFFFF),
            ChatFormatting::Obfuscated
            | ChatFormatting::Bold
            | ChatFormatting::Strikethrough
            | ChatFormatting::Underline
            | ChatFormatting::Italic
            | ChatFormatting::Reset => None,
        }
    }

    pub fn is_color(&self) -> bool {
        self.rgb().is_some()
    }

    /// Colour for a heading of the given level.
    pub fn for_heading(level: u8) -> Self {
        match level {
            1 => ChatFormatting::DarkBlue,
            2 => ChatFormatting::Blue,
            3 => ChatFormatting::DarkGreen,
            4 => ChatFormatting::Green,
            5 => ChatFormatting::DarkPurple,
            _ => ChatFormatting::Black,
        }
    }
}

impl fmt::Display for ChatFormatting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", FORMAT_PREFIX, self.code())
    }
}

/// Remove every `§x` formatting code from `text`.
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == FORMAT_PREFIX {
            chars.next();
        } else {
            out.push(ch);
        }
    }
    out
}

/// Renders a document as a single string with embedded formatting codes.
///
/// A reset clears every active format, so after closing a nested span the
/// renderer re-emits the codes of the spans still open around it.
#[derive(Debug, Default)]
pub struct ChatRenderer {
    active: Vec<ChatFormatting>,
}

impl ChatRenderer {
    pub fn new() -> Self {
        ChatRenderer { active: Vec::new() }
    }

    fn inline(&mut self, children: &[Node]) -> String {
        children.iter().map(|child| child.accept(self)).collect()
    }

    fn span(&mut self, format: ChatFormatting, children: &[Node]) -> String {
        self.active.push(format);
        let content = self.inline(children);
        self.active.pop();
        self.styled(&[format], &content)
    }

    /// `content` wrapped in `formats` and a reset, followed by the codes of
    /// the enclosing spans.
    fn styled(&self, formats: &[ChatFormatting], content: &str) -> String {
        let mut out = String::with_capacity(content.len() + 8);
        for format in formats {
            out.push_str(&format.to_string());
        }
        out.push_str(content);
        out.push_str(&ChatFormatting::Reset.to_string());
        for format in &self.active {
            out.push_str(&format.to_string());
        }
        out
    }
}

impl Visitor for ChatRenderer {
    type Output = String;

    fn visit_document(&mut self, document: &Document) -> String {
        let blocks: Vec<String> = document
            .children
            .iter()
            .map(|child| child.accept(self))
            .collect();
        blocks.join("\n")
    }

    fn visit_heading(&mut self, heading: &Heading) -> String {
        let color = ChatFormatting::for_heading(heading.level);
        if heading.level <= 2 {
            self.styled(&[color, ChatFormatting::Bold], &heading.text)
        } else {
            self.styled(&[color], &heading.text)
        }
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) -> String {
        let content = self.inline(&paragraph.children);
        if content.trim().is_empty() {
            String::new()
        } else {
            content
        }
    }

    fn visit_code_block(&mut self, code_block: &CodeBlock) -> String {
        let body = if code_block.language.is_empty() {
            code_block.code.clone()
        } else {
            format!("[{}]\n{}", code_block.language, code_block.code)
        };
        self.styled(&[ChatFormatting::Green], &body)
    }

    fn visit_bullet_list(&mut self, list: &BulletList) -> String {
        let items: Vec<String> = list
            .items
            .iter()
            .map(|item| format!("• {}", item.accept(self)))
            .collect();
        items.join("\n")
    }

    fn visit_ordered_list(&mut self, list: &OrderedList) -> String {
        let items: Vec<String> = list
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item.accept(self)))
            .collect();
        items.join("\n")
    }

    fn visit_list_item(&mut self, item: &ListItem) -> String {
        self.inline(&item.children)
    }

    fn visit_blockquote(&mut self, blockquote: &Blockquote) -> String {
        self.styled(
            &[ChatFormatting::Gray, ChatFormatting::Italic],
            &format!("> {}", blockquote.content),
        )
    }

    fn visit_text(&mut self, text: &Text) -> String {
        text.content.clone()
    }

    fn visit_bold(&mut self, bold: &Bold) -> String {
        self.span(ChatFormatting::Bold, &bold.children)
    }

    fn visit_italic(&mut self, italic: &Italic) -> String {
        self.span(ChatFormatting::Italic, &italic.children)
    }

    fn visit_strikethrough(&mut self, strikethrough: &Strikethrough) -> String {
        self.span(ChatFormatting::Strikethrough, &strikethrough.children)
    }

    fn visit_inline_code(&mut self, code: &InlineCode) -> String {
        self.styled(&[ChatFormatting::Green], &code.code)
    }

    fn visit_link(&mut self, link: &Link) -> String {
        self.styled(&[ChatFormatting::Aqua, ChatFormatting::Underline], &link.text)
    }

    fn visit_image(&mut self, image: &Image) -> String {
        self.styled(
            &[ChatFormatting::Aqua],
            &format!("[Image: {}]", image.alt_text),
        )
    }
}
