use log::{debug, trace};

use crate::ast::*;
use crate::token::{Loc, Tag as TokenTag, Token};
use crate::tokenizer::tokenize;

/// Stand-in returned when reading past a token slice that lacks `Eof`.
static END_OF_INPUT: Token = Token {
    tag: TokenTag::Eof,
    text: String::new(),
    loc: Loc { start: 0, end: 0 },
    line: 0,
};

/// Build a document from a token sequence.
///
/// Total over any input: a missing `Eof` is treated as end of input and
/// unbalanced span delimiters close implicitly.
pub fn parse(tokens: &[Token]) -> Document {
    let mut parser = Parser::new(tokens);
    let document = parser.parse_document();
    debug!(
        "parsed {} tokens into {} blocks",
        tokens.len(),
        document.children.len()
    );
    document
}

/// Tokenize and parse `source` in one step.
pub fn parse_markdown(source: &str) -> Document {
    let tokens = tokenize(source);
    parse(&tokens)
}

pub struct Parser<'t> {
    tokens: &'t [Token],
    token_index: usize,
    /// Span delimiters currently open, innermost last.
    open_spans: Vec<TokenTag>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser {
            tokens,
            token_index: 0,
            open_spans: Vec::new(),
        }
    }

    // === Token consumption methods ===

    fn eat_token(&mut self, tag: TokenTag) -> Option<&'t Token> {
        if self.current_tag() == tag {
            Some(self.next_token())
        } else {
            None
        }
    }

    fn next_token(&mut self) -> &'t Token {
        let tok = self.tokens.get(self.token_index).unwrap_or(&END_OF_INPUT);
        self.token_index += 1;
        tok
    }

    fn peek_token(&self, offset: usize) -> TokenTag {
        self.tokens
            .get(self.token_index + offset)
            .map_or(TokenTag::Eof, |tok| tok.tag)
    }

    fn current_tag(&self) -> TokenTag {
        self.peek_token(0)
    }

    fn skip_whitespace(&mut self) {
        while self.eat_token(TokenTag::Whitespace).is_some() {}
    }

    /// Tag of the first non-whitespace token at or after `offset`.
    fn peek_past_whitespace(&self, offset: usize) -> TokenTag {
        let mut offset = offset;
        while self.peek_token(offset) == TokenTag::Whitespace {
            offset += 1;
        }
        self.peek_token(offset)
    }

    // === Block parsing ===

    fn parse_document(&mut self) -> Document {
        let mut children = Vec::new();

        loop {
            // Skip blank lines and indentation between blocks
            while matches!(
                self.current_tag(),
                TokenTag::Newline | TokenTag::Whitespace
            ) {
                self.token_index += 1;
            }

            if self.current_tag() == TokenTag::Eof {
                break;
            }

            let before = self.token_index;
            if let Some(block) = self.parse_block() {
                children.push(block);
            }
            // Keep forward-progress guard for pathological inputs.
            if self.token_index == before {
                self.token_index += 1;
            }
        }

        Document::new(children)
    }

    fn parse_block(&mut self) -> Option<Node> {
        match self.current_tag() {
            TokenTag::Heading => Some(self.parse_heading()),
            TokenTag::CodeBlock => Some(self.parse_code_block()),
            TokenTag::Blockquote => Some(self.parse_blockquote()),
            TokenTag::ListItemUnordered | TokenTag::ListItemOrdered => Some(self.parse_list()),
            TokenTag::Bold
            | TokenTag::Italic
            | TokenTag::Strikethrough
            | TokenTag::InlineCode
            | TokenTag::Link
            | TokenTag::Image
            | TokenTag::Text
            | TokenTag::Whitespace => Some(self.parse_paragraph()),
            TokenTag::Newline | TokenTag::Eof => None,
        }
    }

    fn parse_heading(&mut self) -> Node {
        let marker = self.next_token();
        let level = marker.text.chars().filter(|c| *c == '#').count();

        let mut text = String::new();
        while !matches!(self.current_tag(), TokenTag::Newline | TokenTag::Eof) {
            let tok = self.next_token();
            if tok.tag == TokenTag::Text {
                text.push_str(&tok.text);
            }
        }

        trace!("heading level {} {:?}", level, text);
        Node::Heading(Heading::new(level, text))
    }

    fn parse_code_block(&mut self) -> Node {
        let raw = &self.next_token().text;

        let (language, code) = match raw.split_once('\n') {
            Some((first, rest)) => (first.trim(), rest),
            None => ("", raw.as_str()),
        };
        let code = code.strip_suffix('\n').unwrap_or(code);

        Node::CodeBlock(CodeBlock {
            language: language.to_string(),
            code: code.to_string(),
        })
    }

    fn parse_blockquote(&mut self) -> Node {
        let raw = &self.next_token().text;
        let content = raw
            .strip_prefix("> ")
            .or_else(|| raw.strip_prefix('>'))
            .unwrap_or(raw);

        Node::Blockquote(Blockquote {
            content: content.to_string(),
        })
    }

    fn parse_list(&mut self) -> Node {
        let item_tag = self.current_tag();
        let mut items = Vec::new();

        while self.current_tag() == item_tag {
            items.push(self.parse_list_item());

            // One line break (plus indentation) separates consecutive items
            if self.current_tag() == TokenTag::Newline && self.peek_past_whitespace(1) == item_tag
            {
                self.next_token();
                self.skip_whitespace();
            } else {
                break;
            }
        }

        if item_tag == TokenTag::ListItemOrdered {
            Node::OrderedList(OrderedList { items })
        } else {
            Node::BulletList(BulletList { items })
        }
    }

    fn parse_list_item(&mut self) -> ListItem {
        self.next_token();
        self.skip_whitespace();
        ListItem {
            children: self.parse_inline_content(),
        }
    }

    fn parse_paragraph(&mut self) -> Node {
        Node::Paragraph(Paragraph {
            children: self.parse_inline_content(),
        })
    }

    // === Inline parsing ===

    /// Collect inline nodes up to a block boundary, or up to a delimiter that
    /// closes one of the currently open spans.
    fn parse_inline_content(&mut self) -> Vec<Node> {
        let mut children: Vec<Node> = Vec::new();

        loop {
            let tag = self.current_tag();
            if tag.is_block_start() || self.open_spans.contains(&tag) {
                break;
            }

            let before = self.token_index;
            if let Some(node) = self.parse_inline() {
                push_inline(&mut children, node);
            }
            if self.token_index == before {
                self.token_index += 1;
            }
        }

        children
    }

    fn parse_inline(&mut self) -> Option<Node> {
        match self.current_tag() {
            TokenTag::Text | TokenTag::Whitespace => {
                Some(Node::text(self.next_token().text.as_str()))
            }
            TokenTag::Bold => Some(Node::Bold(Bold {
                children: self.parse_span(TokenTag::Bold),
            })),
            TokenTag::Italic => Some(Node::Italic(Italic {
                children: self.parse_span(TokenTag::Italic),
            })),
            TokenTag::Strikethrough => Some(Node::Strikethrough(Strikethrough {
                children: self.parse_span(TokenTag::Strikethrough),
            })),
            TokenTag::InlineCode => Some(Node::InlineCode(InlineCode {
                code: self.next_token().text.clone(),
            })),
            TokenTag::Link => {
                let (text, url) = split_payload(&self.next_token().text);
                Some(Node::Link(Link { text, url }))
            }
            TokenTag::Image => {
                let (alt_text, url) = split_payload(&self.next_token().text);
                Some(Node::Image(Image { alt_text, url }))
            }
            TokenTag::Heading
            | TokenTag::CodeBlock
            | TokenTag::ListItemUnordered
            | TokenTag::ListItemOrdered
            | TokenTag::Blockquote
            | TokenTag::Newline
            | TokenTag::Eof => None,
        }
    }

    /// Children of a bold/italic/strikethrough span. The closing delimiter is
    /// consumed only when it matches `tag`; an enclosing span's delimiter, a
    /// block boundary or end of input closes the span implicitly.
    fn parse_span(&mut self, tag: TokenTag) -> Vec<Node> {
        self.next_token();
        self.open_spans.push(tag);

        let children = self.parse_inline_content();
        self.eat_token(tag);

        self.open_spans.pop();
        children
    }
}

/// Adjacent text runs merge into a single text node.
fn push_inline(children: &mut Vec<Node>, node: Node) {
    if let (Some(Node::Text(last)), Node::Text(next)) = (children.last_mut(), &node) {
        last.content.push_str(&next.content);
        return;
    }
    children.push(node);
}

/// Split a `text|url` link payload on the first `|`.
fn split_payload(payload: &str) -> (String, String) {
    match payload.split_once('|') {
        Some((text, url)) => (text.to_string(), url.to_string()),
        None => (payload.to_string(), String::new()),
    }
}
