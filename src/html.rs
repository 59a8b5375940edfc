use crate::ast::*;
use crate::render::Visitor;

/// Renders a document as an HTML fragment.
#[derive(Debug, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        HtmlRenderer
    }

    fn inline(&mut self, children: &[Node]) -> String {
        children.iter().map(|child| child.accept(self)).collect()
    }

    fn list(&mut self, tag: &str, items: &[ListItem]) -> String {
        if items.is_empty() {
            return format!("<{tag}></{tag}>");
        }
        let rendered: Vec<String> = items.iter().map(|item| item.accept(self)).collect();
        format!("<{tag}>\n{}\n</{tag}>", rendered.join("\n"))
    }
}

impl Visitor for HtmlRenderer {
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
        format!(
            "<h{level}>{}</h{level}>",
            escape_html(&heading.text),
            level = heading.level
        )
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) -> String {
        let content = self.inline(&paragraph.children);
        if content.trim().is_empty() {
            String::new()
        } else {
            format!("<p>{content}</p>")
        }
    }

    fn visit_code_block(&mut self, code_block: &CodeBlock) -> String {
        let code = escape_html(&code_block.code);
        if code_block.language.is_empty() {
            format!("<pre><code>{code}</code></pre>")
        } else {
            format!(
                "<pre><code class=\"language-{}\">{code}</code></pre>",
                escape_html(&code_block.language)
            )
        }
    }

    fn visit_bullet_list(&mut self, list: &BulletList) -> String {
        self.list("ul", &list.items)
    }

    fn visit_ordered_list(&mut self, list: &OrderedList) -> String {
        self.list("ol", &list.items)
    }

    fn visit_list_item(&mut self, item: &ListItem) -> String {
        format!("<li>{}</li>", self.inline(&item.children))
    }

    fn visit_blockquote(&mut self, blockquote: &Blockquote) -> String {
        format!("<blockquote>{}</blockquote>", escape_html(&blockquote.content))
    }

    fn visit_text(&mut self, text: &Text) -> String {
        escape_html(&text.content)
    }

    fn visit_bold(&mut self, bold: &Bold) -> String {
        format!("<strong>{}</strong>", self.inline(&bold.children))
    }

    fn visit_italic(&mut self, italic: &Italic) -> String {
        format!("<em>{}</em>", self.inline(&italic.children))
    }

    fn visit_strikethrough(&mut self, strikethrough: &Strikethrough) -> String {
        format!("<del>{}</del>", self.inline(&strikethrough.children))
    }

    fn visit_inline_code(&mut self, code: &InlineCode) -> String {
        format!("<code>{}</code>", escape_html(&code.code))
    }

    fn visit_link(&mut self, link: &Link) -> String {
        format!(
            "<a href=\"{}\">{}</a>",
            escape_html(&link.url),
            escape_html(&link.text)
        )
    }

    fn visit_image(&mut self, image: &Image) -> String {
        format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(&image.url),
            escape_html(&image.alt_text)
        )
    }
}

/// Escape the five HTML-significant characters in one pass, so an `&`
/// introduced by an entity is never escaped twice.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
