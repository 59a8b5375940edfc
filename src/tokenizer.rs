use std::collections::HashMap;

use log::{debug, trace};

use crate::token::{Loc, Tag, Token};

const MAX_HEADING_HASHES: usize = 6;

/// Tokenize `source` into a flat token sequence that always ends in `Eof`.
///
/// Never fails: anything that does not form a complete construct is emitted
/// as `Text` carrying the original characters.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(source);
    let mut tokens: Vec<Token> = Vec::new();

    loop {
        let tok = tokenizer.next();
        let done = tok.tag == Tag::Eof;
        tokens.push(tok);
        if done {
            break;
        }
    }

    debug!(
        "tokenized {} bytes into {} tokens",
        source.len(),
        tokens.len()
    );
    tokens
}

/// A bold, italic or strikethrough span opened on the current line.
#[derive(Debug, Clone, Copy)]
struct OpenSpan {
    tag: Tag,
    /// Offset of the delimiter that closes this span.
    close: usize,
}

pub struct Tokenizer<'a> {
    source: &'a str,
    buffer: &'a [u8],
    index: usize,
    line: u32,
    /// Spans opened on the current line, innermost last. Each inner span
    /// closes before the one enclosing it.
    open: Vec<OpenSpan>,
    last_tag: Option<Tag>,
    /// Cached `(from, end)` of the line containing the cursor.
    line_span: Option<(usize, usize)>,
    /// Failed closer searches: needle -> `(from, line_end)`. A search that
    /// failed from `from` also fails from any later offset on that line.
    misses: HashMap<&'static str, (usize, usize)>,
    /// Failed span closer scans: tag -> `(from, limit)`.
    closer_misses: HashMap<Tag, (usize, usize)>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Tokenizer {
            source,
            buffer: source.as_bytes(),
            index: 0,
            line: 1,
            open: Vec::new(),
            last_tag: None,
            line_span: None,
            misses: HashMap::new(),
            closer_misses: HashMap::new(),
        }
    }

    pub fn next(&mut self) -> Token {
        let start = self.index;

        if self.at_end() {
            return Token::eof(start, self.line);
        }

        let c = self.buf(start);
        let tok = match c {
            b'\n' => self.newline(start, 1),
            b'\r' if self.buf(start + 1) == b'\n' => self.newline(start, 2),
            b' ' | b'\t' if self.whitespace_is_token(start) => self.whitespace(start),
            _ => {
                let marker = if self.at_line_start(start) {
                    self.next_line_marker(start)
                } else {
                    None
                };
                match marker {
                    Some(tok) => tok,
                    None => self.next_inline(start),
                }
            }
        };

        trace!("{} {:?} at {}", tok.tag.name(), tok.text, tok.loc.start);
        self.last_tag = Some(tok.tag);
        tok
    }

    // === Block markers ===

    /// Markers only recognized at start of line (after optional indentation).
    fn next_line_marker(&mut self, start: usize) -> Option<Token> {
        let c = self.buf(start);

        match c {
            b'#' => {
                let level = self.run_length(start, b'#');
                let end = start + level;
                if level <= MAX_HEADING_HASHES && self.buf(end) == b' ' {
                    self.index = end;
                    Some(self.make_token(Tag::Heading, start))
                } else {
                    None
                }
            }
            b'-' | b'+' | b'*' => {
                if self.buf(start + 1) == b' ' {
                    self.index = start + 1;
                    Some(self.make_token(Tag::ListItemUnordered, start))
                } else {
                    None
                }
            }
            b'0'..=b'9' => {
                let mut end = start;
                while self.buf(end).is_ascii_digit() {
                    end += 1;
                }
                if self.buf(end) == b'.' && self.buf(end + 1) == b' ' {
                    self.index = end + 1;
                    Some(self.make_token(Tag::ListItemOrdered, start))
                } else {
                    None
                }
            }
            b'>' => {
                if self.buf(start + 1) == b' ' {
                    self.index = self.line_end(start);
                    Some(self.make_token(Tag::Blockquote, start))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    // === Inline tokens ===

    fn next_inline(&mut self, start: usize) -> Token {
        if let Some(span) = self.open.last().copied() {
            if span.close == start {
                self.open.pop();
                self.index = start + delimiter_width(span.tag);
                return self.make_token(span.tag, start);
            }
        }

        let c = self.buf(start);

        match c {
            b'`' => match self.run_length(start, b'`') {
                3 => self.code_fence(start),
                1 => self.code_inline(start),
                run => self.text(start, run),
            },
            b'*' if self.buf(start + 1) == b'*' => self.delimiter(start, Tag::Bold),
            b'*' => self.delimiter(start, Tag::Italic),
            b'~' if self.buf(start + 1) == b'~' => self.delimiter(start, Tag::Strikethrough),
            b'[' => self.link(start, Tag::Link, 1),
            b'!' if self.buf(start + 1) == b'[' => self.link(start, Tag::Image, 2),
            _ => self.text(start, 0),
        }
    }

    /// Open a bold/italic/strikethrough span when its closer is reachable.
    ///
    /// Spans of one kind never nest. When no closer is found the delimiter
    /// run is plain text, up to (not including) any pending closer.
    fn delimiter(&mut self, start: usize, tag: Tag) -> Token {
        let already_open = self.open.iter().any(|span| span.tag == tag);

        if !already_open {
            if let Some(close) = self.find_closer(start, tag) {
                self.open.push(OpenSpan { tag, close });
                self.index = start + delimiter_width(tag);
                return self.make_token(tag, start);
            }
        }

        let mut skip = self.run_length(start, self.buf(start));
        if let Some(span) = self.open.last() {
            if span.close > start {
                skip = skip.min(span.close - start);
            }
        }
        self.text(start, skip)
    }

    /// Offset of the delimiter that will close a `tag` span opened at `start`.
    ///
    /// Walks the line the way the tokenizer will: code spans and links are
    /// skipped whole, and the closer must end before the closer of the
    /// innermost open span. Bold and strikethrough close on the last two
    /// characters of a run of two or more; italic closes on the first
    /// character of an odd-length `*` run.
    fn find_closer(&mut self, start: usize, tag: Tag) -> Option<usize> {
        let delim = if tag == Tag::Strikethrough { b'~' } else { b'*' };
        let limit = match self.open.last() {
            Some(span) => span.close,
            None => self.line_end(start),
        };

        // The rest of the opening run belongs to the span's content
        let mut pos = start + delimiter_width(tag);
        while pos < limit && self.buf(pos) == delim {
            pos += 1;
        }

        if let Some(&(miss_from, miss_limit)) = self.closer_misses.get(&tag) {
            if pos >= miss_from && limit <= miss_limit {
                return None;
            }
        }
        let from = pos;

        while pos < limit {
            let c = self.buf(pos);
            match c {
                b'*' | b'~' => {
                    let mut run = 0;
                    while pos + run < limit && self.buf(pos + run) == c {
                        run += 1;
                    }
                    if c == delim {
                        match tag {
                            Tag::Italic if run % 2 == 1 => return Some(pos),
                            Tag::Bold | Tag::Strikethrough if run >= 2 => {
                                return Some(pos + run - 2);
                            }
                            _ => {}
                        }
                    }
                    pos += run;
                }
                b'`' => pos = self.skip_code(pos),
                b'[' => pos = self.link_end(pos, 1).map_or(pos + 1, |(_, url_end)| url_end + 1),
                b'!' if self.buf(pos + 1) == b'[' => {
                    pos = self.link_end(pos, 2).map_or(pos + 2, |(_, url_end)| url_end + 1);
                }
                _ => pos += 1,
            }
        }

        self.closer_misses.insert(tag, (from, limit));
        None
    }

    /// Offset just past the backtick construct starting at `pos`.
    fn skip_code(&mut self, pos: usize) -> usize {
        match self.run_length(pos, b'`') {
            1 => self
                .find_in_line(pos + 1, "`")
                .map_or(pos + 1, |close| close + 1),
            3 => self.fence_close(pos).map_or(pos + 3, |close| close + 3),
            run => pos + run,
        }
    }

    fn code_inline(&mut self, start: usize) -> Token {
        match self.find_in_line(start + 1, "`") {
            Some(close) => {
                let code = self.slice(start + 1, close).to_string();
                self.index = close + 1;
                self.make_token_with_text(Tag::InlineCode, start, code, self.line)
            }
            None => self.text(start, 1),
        }
    }

    fn code_fence(&mut self, start: usize) -> Token {
        let Some(close) = self.fence_close(start) else {
            return self.text(start, 3);
        };

        let line = self.line;
        let content = self.slice(start + 3, close).to_string();
        self.line += content.matches('\n').count() as u32;
        self.index = close + 3;
        self.make_token_with_text(Tag::CodeBlock, start, content, line)
    }

    /// Offset of the closing fence for a fence opened at `start`; may lie on
    /// a later line.
    fn fence_close(&self, start: usize) -> Option<usize> {
        let content_start = start + 3;
        self.source
            .get(content_start..)
            .and_then(|rest| rest.find("```"))
            .map(|rel| content_start + rel)
    }

    /// `[text](url)` or `![alt](url)`, all on one line.
    fn link(&mut self, start: usize, tag: Tag, open_width: usize) -> Token {
        let Some((label_end, url_end)) = self.link_end(start, open_width) else {
            return self.text(start, open_width);
        };

        let payload = format!(
            "{}|{}",
            self.slice(start + open_width, label_end),
            self.slice(label_end + 2, url_end)
        );
        self.index = url_end + 1;
        self.make_token_with_text(tag, start, payload, self.line)
    }

    /// Offsets of the `]` and `)` of a link starting at `start`.
    fn link_end(&mut self, start: usize, open_width: usize) -> Option<(usize, usize)> {
        let label_end = self.find_in_line(start + open_width, "]")?;
        if self.buf(label_end + 1) != b'(' {
            return None;
        }
        let url_end = self.find_in_line(label_end + 2, ")")?;
        Some((label_end, url_end))
    }

    /// Plain text run. The first `skip` bytes are taken literally (used when
    /// backtracking over an unclosed delimiter), then the run continues up to
    /// the next byte that could start another token.
    fn text(&mut self, start: usize, skip: usize) -> Token {
        self.index = start + skip;

        while !self.at_end() {
            let ch = self.buf(self.index);
            match ch {
                b'\n' | b'*' | b'`' | b'[' => break,
                b'\r' if self.buf(self.index + 1) == b'\n' => break,
                b'~' if self.buf(self.index + 1) == b'~' => break,
                b'!' if self.buf(self.index + 1) == b'[' => break,
                _ => self.index += 1,
            }
        }

        // Forward-progress guard; every stop byte above is ASCII.
        if self.index == start {
            self.index += 1;
        }

        self.make_token(Tag::Text, start)
    }

    // === Whitespace and structure ===

    fn newline(&mut self, start: usize, width: usize) -> Token {
        self.index = start + width;
        let tok = self.make_token(Tag::Newline, start);
        self.line += 1;
        self.open.clear();
        tok
    }

    fn whitespace(&mut self, start: usize) -> Token {
        while matches!(self.buf(self.index), b' ' | b'\t') {
            self.index += 1;
        }
        self.make_token(Tag::Whitespace, start)
    }

    /// Whitespace is its own token for indentation and after block markers;
    /// anywhere else it belongs to the surrounding text run.
    fn whitespace_is_token(&self, start: usize) -> bool {
        matches!(
            self.last_tag,
            Some(Tag::Heading | Tag::ListItemUnordered | Tag::ListItemOrdered)
        ) || self.at_line_start(start)
    }

    /// True when only spaces or tabs precede `pos` on its line.
    fn at_line_start(&self, pos: usize) -> bool {
        let mut i = pos;
        while i > 0 {
            match self.buf(i - 1) {
                b'\n' => return true,
                b' ' | b'\t' => i -= 1,
                _ => return false,
            }
        }
        true
    }

    // === Buffer helpers ===

    /// Offset of the end of the line containing `from` (newline excluded).
    fn line_end(&mut self, from: usize) -> usize {
        if let Some((span_from, span_end)) = self.line_span {
            if span_from <= from && from <= span_end {
                return span_end;
            }
        }

        let mut end = from;
        while !self.is_past(end) && self.buf(end) != b'\n' {
            end += 1;
        }
        if end > from && self.buf(end) == b'\n' && self.buf(end - 1) == b'\r' {
            end -= 1;
        }

        self.line_span = Some((from, end));
        end
    }

    fn find_in_line(&mut self, from: usize, needle: &'static str) -> Option<usize> {
        let line_end = self.line_end(from);

        if let Some(&(miss_from, miss_end)) = self.misses.get(needle) {
            if miss_end == line_end && from >= miss_from {
                return None;
            }
        }

        let found = self
            .source
            .get(from..line_end)
            .and_then(|haystack| haystack.find(needle))
            .map(|rel| from + rel);

        if found.is_none() {
            self.misses.insert(needle, (from, line_end));
        }
        found
    }

    /// Number of consecutive `byte`s starting at `start`.
    fn run_length(&self, start: usize, byte: u8) -> usize {
        let mut end = start;
        while !self.is_past(end) && self.buf(end) == byte {
            end += 1;
        }
        end - start
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        self.source.get(start..end).unwrap_or("")
    }

    fn buf(&self, idx: usize) -> u8 {
        self.buffer.get(idx).copied().unwrap_or(0)
    }

    fn at_end(&self) -> bool {
        self.is_past(self.index)
    }

    fn is_past(&self, idx: usize) -> bool {
        idx >= self.buffer.len()
    }

    fn make_token(&self, tag: Tag, start: usize) -> Token {
        let text = self.slice(start, self.index);
        self.make_token_with_text(tag, start, text.to_string(), self.line)
    }

    fn make_token_with_text(&self, tag: Tag, start: usize, text: String, line: u32) -> Token {
        Token::new(
            tag,
            text,
            Loc {
                start,
                end: self.index,
            },
            line,
        )
    }
}

fn delimiter_width(tag: Tag) -> usize {
    match tag {
        Tag::Bold | Tag::Strikethrough => 2,
        Tag::Italic => 1,
        Tag::Heading
        | Tag::CodeBlock
        | Tag::ListItemUnordered
        | Tag::ListItemOrdered
        | Tag::Blockquote
        | Tag::InlineCode
        | Tag::Link
        | Tag::Image
        | Tag::Text
        | Tag::Newline
        | Tag::Whitespace
        | Tag::Eof => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(source: &str) -> Vec<Tag> {
        tokenize(source).iter().map(|t| t.tag).collect()
    }

    fn texts(source: &str) -> Vec<String> {
        tokenize(source).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn tokenize_simple_text() {
        let tokens = tokenize("Hello World");
        assert_eq!(2, tokens.len());
        assert_eq!(Tag::Text, tokens[0].tag);
        assert_eq!("Hello World", tokens[0].text);
        assert_eq!(Tag::Eof, tokens[1].tag);
    }

    #[test]
    fn interior_whitespace_stays_in_text() {
        let tokens = tokenize("Hello   World");
        assert_eq!(vec![Tag::Text, Tag::Eof], tags("Hello   World"));
        assert_eq!("Hello   World", tokens[0].text);
    }

    #[test]
    fn tokenize_empty_input() {
        let tokens = tokenize("");
        assert_eq!(1, tokens.len());
        assert_eq!(Tag::Eof, tokens[0].tag);
    }

    #[test]
    fn tokenize_newlines() {
        assert_eq!(
            vec![Tag::Text, Tag::Newline, Tag::Text, Tag::Eof],
            tags("Hello\nWorld")
        );
        assert_eq!(vec!["Hello", "\n", "World", ""], texts("Hello\nWorld"));
    }

    #[test]
    fn crlf_is_one_newline() {
        assert_eq!(
            vec![Tag::Text, Tag::Newline, Tag::Text, Tag::Eof],
            tags("a\r\nb")
        );
    }

    #[test]
    fn tokenize_heading_levels() {
        for level in 1..=6 {
            let source = format!("{} Title", "#".repeat(level));
            let tokens = tokenize(&source);
            assert_eq!(Tag::Heading, tokens[0].tag);
            assert_eq!("#".repeat(level), tokens[0].text);
            assert_eq!(Tag::Whitespace, tokens[1].tag);
            assert_eq!(Tag::Text, tokens[2].tag);
            assert_eq!("Title", tokens[2].text);
        }
    }

    #[test]
    fn seven_hashes_are_text() {
        let tokens = tokenize("#######  x");
        assert_eq!(2, tokens.len());
        assert_eq!(Tag::Text, tokens[0].tag);
        assert_eq!("#######  x", tokens[0].text);
    }

    #[test]
    fn heading_requires_space() {
        let tokens = tokenize("#NoSpace");
        assert_eq!(Tag::Text, tokens[0].tag);
        assert_eq!("#NoSpace", tokens[0].text);
    }

    #[test]
    fn heading_only_at_line_start() {
        let tokens = tokenize("text # not heading");
        assert_eq!(2, tokens.len());
        assert_eq!("text # not heading", tokens[0].text);
    }

    #[test]
    fn tokenize_bold_italic_strikethrough() {
        assert_eq!(
            vec![Tag::Bold, Tag::Text, Tag::Bold, Tag::Eof],
            tags("**bold**")
        );
        assert_eq!(
            vec![Tag::Italic, Tag::Text, Tag::Italic, Tag::Eof],
            tags("*italic*")
        );
        assert_eq!(
            vec![Tag::Strikethrough, Tag::Text, Tag::Strikethrough, Tag::Eof],
            tags("~~gone~~")
        );
    }

    #[test]
    fn bold_and_italic_in_one_line() {
        let tokens = tokenize("**bold** and *italic*");
        let got: Vec<(Tag, &str)> = tokens.iter().map(|t| (t.tag, t.text.as_str())).collect();
        assert_eq!(
            vec![
                (Tag::Bold, "**"),
                (Tag::Text, "bold"),
                (Tag::Bold, "**"),
                (Tag::Text, " and "),
                (Tag::Italic, "*"),
                (Tag::Text, "italic"),
                (Tag::Italic, "*"),
                (Tag::Eof, ""),
            ],
            got
        );
    }

    #[test]
    fn unclosed_bold_backtracks_to_text() {
        let tokens = tokenize("**unclosed");
        assert_eq!(2, tokens.len());
        assert_eq!(Tag::Text, tokens[0].tag);
        assert_eq!("**unclosed", tokens[0].text);
    }

    #[test]
    fn delimiters_do_not_close_across_lines() {
        let tokens = tokenize("*a\nb*");
        assert!(tokens.iter().all(|t| t.tag != Tag::Italic));
    }

    #[test]
    fn triple_star_nests_italic_inside_bold() {
        assert_eq!(
            vec![
                Tag::Bold,
                Tag::Italic,
                Tag::Text,
                Tag::Italic,
                Tag::Bold,
                Tag::Eof
            ],
            tags("***both***")
        );
    }

    #[test]
    fn single_tilde_is_text() {
        let tokens = tokenize("a ~ b");
        assert_eq!(2, tokens.len());
        assert_eq!("a ~ b", tokens[0].text);
    }

    #[test]
    fn tokenize_bullet_markers() {
        for marker in ["-", "+", "*"] {
            let tokens = tokenize(&format!("{} Item", marker));
            assert_eq!(Tag::ListItemUnordered, tokens[0].tag);
            assert_eq!(marker, tokens[0].text);
            assert_eq!(Tag::Whitespace, tokens[1].tag);
            assert_eq!("Item", tokens[2].text);
        }
    }

    #[test]
    fn dash_without_space_is_text() {
        let tokens = tokenize("-not a list");
        assert_eq!(Tag::Text, tokens[0].tag);
        assert_eq!("-not a list", tokens[0].text);
    }

    #[test]
    fn indented_marker_is_still_a_marker() {
        assert_eq!(
            vec![
                Tag::Whitespace,
                Tag::ListItemUnordered,
                Tag::Whitespace,
                Tag::Text,
                Tag::Eof
            ],
            tags("  - item")
        );
    }

    #[test]
    fn marker_mid_line_is_text() {
        let tokens = tokenize("a - b > c");
        assert_eq!(2, tokens.len());
        assert_eq!("a - b > c", tokens[0].text);
    }

    #[test]
    fn tokenize_ordered_markers() {
        let tokens = tokenize("10. Tenth item");
        assert_eq!(Tag::ListItemOrdered, tokens[0].tag);
        assert_eq!("10.", tokens[0].text);
        assert_eq!(Tag::Whitespace, tokens[1].tag);
        assert_eq!("Tenth item", tokens[2].text);

        let tokens = tokenize("1.no space");
        assert_eq!(2, tokens.len());
        assert_eq!("1.no space", tokens[0].text);
    }

    #[test]
    fn tokenize_blockquote_line() {
        let tokens = tokenize("> quoted *text*\nafter");
        assert_eq!(Tag::Blockquote, tokens[0].tag);
        assert_eq!("> quoted *text*", tokens[0].text);
        assert_eq!(Tag::Newline, tokens[1].tag);
        assert_eq!("after", tokens[2].text);
    }

    #[test]
    fn blockquote_requires_space() {
        let tokens = tokenize(">nope");
        assert_eq!(Tag::Text, tokens[0].tag);
    }

    #[test]
    fn tokenize_code_fence() {
        let tokens = tokenize("```py\nprint(1)\n```\nafter");
        assert_eq!(Tag::CodeBlock, tokens[0].tag);
        assert_eq!("py\nprint(1)\n", tokens[0].text);
        assert_eq!(Tag::Newline, tokens[1].tag);
        assert_eq!(3, tokens[1].line);
        assert_eq!(4, tokens[2].line);
    }

    #[test]
    fn unclosed_code_fence_is_text() {
        let tokens = tokenize("```py");
        assert_eq!(Tag::Text, tokens[0].tag);
        assert_eq!("```py", tokens[0].text);
    }

    #[test]
    fn tokenize_inline_code() {
        let tokens = tokenize("use `*raw*` here");
        assert_eq!(Tag::Text, tokens[0].tag);
        assert_eq!(Tag::InlineCode, tokens[1].tag);
        assert_eq!("*raw*", tokens[1].text);
        assert_eq!(" here", tokens[2].text);
    }

    #[test]
    fn tokenize_link_and_image() {
        let tokens = tokenize("[Go](https://go.dev)");
        assert_eq!(Tag::Link, tokens[0].tag);
        assert_eq!("Go|https://go.dev", tokens[0].text);

        let tokens = tokenize("![logo](img.png)");
        assert_eq!(Tag::Image, tokens[0].tag);
        assert_eq!("logo|img.png", tokens[0].text);
    }

    #[test]
    fn malformed_link_is_text() {
        let tokens = tokenize("[Go](https://go.dev");
        assert!(tokens.iter().all(|t| t.tag != Tag::Link));
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!("[Go](https://go.dev", joined);

        let tokens = tokenize("[Go] (x)");
        assert!(tokens.iter().all(|t| t.tag != Tag::Link));
    }

    #[test]
    fn bang_without_bracket_is_text() {
        let tokens = tokenize("Hi! there");
        assert_eq!(2, tokens.len());
        assert_eq!("Hi! there", tokens[0].text);
    }

    #[test]
    fn tracks_lines_and_offsets() {
        let tokens = tokenize("Line 1\nLine 2");
        assert_eq!(1, tokens[0].line);
        assert_eq!(1, tokens[1].line);
        assert_eq!(2, tokens[2].line);
        assert_eq!(7, tokens[2].loc.start);
        assert_eq!(13, tokens[2].loc.end);
    }

    #[test]
    fn multibyte_text_survives() {
        let tokens = tokenize("héllo **wörld**");
        assert_eq!("héllo ", tokens[0].text);
        assert_eq!("wörld", tokens[2].text);
    }

    fn pairs(source: &str) -> Vec<(Tag, String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.tag, t.text))
            .collect()
    }

    #[test]
    fn closer_inside_inline_code_does_not_close_bold() {
        assert_eq!(
            vec![
                (Tag::Text, "**a ".to_string()),
                (Tag::InlineCode, "**".to_string()),
                (Tag::Eof, String::new()),
            ],
            pairs("**a `**`")
        );
    }

    #[test]
    fn closer_inside_link_label_does_not_close_strikethrough() {
        assert_eq!(
            vec![
                (Tag::Text, "~~a ".to_string()),
                (Tag::Link, "x~~|u".to_string()),
                (Tag::Eof, String::new()),
            ],
            pairs("~~a [x~~](u)")
        );
    }

    #[test]
    fn single_star_inside_bold_stays_text() {
        assert_eq!(
            vec![
                (Tag::Bold, "**".to_string()),
                (Tag::Text, "a".to_string()),
                (Tag::Text, "*b".to_string()),
                (Tag::Bold, "**".to_string()),
                (Tag::Eof, String::new()),
            ],
            pairs("**a*b**")
        );
    }

    #[test]
    fn bold_closes_after_code_span_holding_its_delimiter() {
        assert_eq!(
            vec![
                (Tag::Bold, "**".to_string()),
                (Tag::Text, "a ".to_string()),
                (Tag::InlineCode, "**".to_string()),
                (Tag::Text, " b".to_string()),
                (Tag::Bold, "**".to_string()),
                (Tag::Eof, String::new()),
            ],
            pairs("**a `**` b**")
        );
    }

    #[test]
    fn italic_closes_before_enclosing_bold() {
        assert_eq!(
            vec![
                Tag::Bold,
                Tag::Text,
                Tag::Italic,
                Tag::Text,
                Tag::Italic,
                Tag::Text,
                Tag::Bold,
                Tag::Eof
            ],
            tags("**a *b* c**")
        );
    }

    #[test]
    fn same_kind_does_not_nest() {
        let tokens = tokenize("****x****");
        let bold = tokens.iter().filter(|t| t.tag == Tag::Bold).count();
        assert_eq!(2, bold);
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!("****x****", joined);
    }

    #[test]
    fn offsets_are_byte_indices() {
        let source = "é **b**";
        let tokens = tokenize(source);
        let eof = &tokens[tokens.len() - 1];
        assert_eq!(source.len(), eof.loc.start);
        assert_eq!(&source[tokens[1].loc.start..tokens[1].loc.end], "**");
    }
}
