use serde::{Deserialize, Serialize};

use crate::ast::*;
use crate::chat::ChatFormatting;
use crate::error::{MarkupError, Result};
use crate::render::Visitor;

/// Optional style attributes of a component; unset fields inherit from the
/// parent component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ChatFormatting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlined: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
}

impl Style {
    pub const EMPTY: Style = Style {
        color: None,
        bold: None,
        italic: None,
        underlined: None,
        strikethrough: None,
    };

    pub fn with_color(mut self, color: ChatFormatting) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn with_underlined(mut self, underlined: bool) -> Self {
        self.underlined = Some(underlined);
        self
    }

    pub fn with_strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = Some(strikethrough);
        self
    }

    /// This style with every unset field taken from `parent`.
    pub fn inherit(&self, parent: &Style) -> Style {
        Style {
            color: self.color.or(parent.color),
            bold: self.bold.or(parent.bold),
            italic: self.italic.or(parent.italic),
            underlined: self.underlined.or(parent.underlined),
            strikethrough: self.strikethrough.or(parent.strikethrough),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Style::EMPTY
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub action: String,
    pub value: String,
}

impl ClickEvent {
    pub fn open_url(url: impl Into<String>) -> Self {
        ClickEvent {
            action: "open_url".to_string(),
            value: url.into(),
        }
    }
}

/// A styled text component in the chat-component JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub text: String,
    #[serde(flatten)]
    pub style: Style,
    #[serde(
        rename = "clickEvent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub click_event: Option<ClickEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<Component>,
}

impl Component {
    pub fn literal(text: impl Into<String>) -> Self {
        Component {
            text: text.into(),
            ..Component::default()
        }
    }

    pub fn empty() -> Self {
        Component::default()
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_extra(mut self, extra: Vec<Component>) -> Self {
        self.extra = extra;
        self
    }

    pub fn append(&mut self, child: Component) {
        self.extra.push(child);
    }

    /// Text of this component and all of its descendants, unstyled.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.extra {
            child.collect_text(out);
        }
    }

    /// Non-empty text runs in document order with their effective style.
    pub fn runs(&self) -> Vec<(String, Style)> {
        let mut runs = Vec::new();
        self.collect_runs(&Style::EMPTY, &mut runs);
        runs
    }

    fn collect_runs(&self, parent: &Style, runs: &mut Vec<(String, Style)>) {
        let style = self.style.inherit(parent);
        if !self.text.is_empty() {
            runs.push((self.text.clone(), style));
        }
        for child in &self.extra {
            child.collect_runs(&style, runs);
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Colours and layout for [`ComponentRenderer`]; any field missing from a
/// JSON config keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    pub header_color: ChatFormatting,
    pub bold_color: ChatFormatting,
    pub italic_color: ChatFormatting,
    pub strikethrough_color: ChatFormatting,
    pub code_color: ChatFormatting,
    pub link_color: ChatFormatting,
    pub quote_color: ChatFormatting,
    pub list_color: ChatFormatting,
    pub max_line_length: usize,
    pub enable_word_wrap: bool,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        ComponentConfig {
            header_color: ChatFormatting::Blue,
            bold_color: ChatFormatting::White,
            italic_color: ChatFormatting::White,
            strikethrough_color: ChatFormatting::Gray,
            code_color: ChatFormatting::Green,
            link_color: ChatFormatting::Aqua,
            quote_color: ChatFormatting::Gray,
            list_color: ChatFormatting::White,
            max_line_length: 50,
            enable_word_wrap: true,
        }
    }
}

impl ComponentConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(MarkupError::Config)
    }
}

/// Builds a component tree from a document.
#[derive(Debug, Default)]
pub struct ComponentRenderer {
    config: ComponentConfig,
}

impl ComponentRenderer {
    pub fn new(config: ComponentConfig) -> Self {
        ComponentRenderer { config }
    }

    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }

    /// One component per block, word-wrapped when enabled.
    pub fn render_lines(&mut self, document: &Document) -> Vec<Component> {
        let mut lines = Vec::new();
        for block in &document.children {
            let component = block.accept(self);
            if self.config.enable_word_wrap {
                lines.extend(self.wrap(component));
            } else {
                lines.push(component);
            }
        }
        lines
    }

    /// Split a component whose text is longer than the configured width into
    /// one component per line. Wrapped lines keep only the root style.
    fn wrap(&self, component: Component) -> Vec<Component> {
        let max = self.config.max_line_length.max(1);
        let text = component.plain_text();
        if text.chars().count() <= max {
            return vec![component];
        }

        let mut lines = Vec::new();
        for source_line in text.split('\n') {
            for line in wrap_words(source_line, max) {
                lines.push(Component::literal(line).with_style(component.style));
            }
        }
        lines
    }

    fn inline(&mut self, children: &[Node]) -> Vec<Component> {
        children.iter().map(|child| child.accept(self)).collect()
    }

    fn list(&mut self, items: &[ListItem], marker: impl Fn(usize) -> String) -> Component {
        let mut extra = Vec::with_capacity(items.len() * 2);
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                extra.push(Component::literal("\n"));
            }
            extra.push(Component::literal(marker(i)).with_extra(vec![item.accept(self)]));
        }
        Component::empty()
            .with_style(Style::EMPTY.with_color(self.config.list_color))
            .with_extra(extra)
    }
}

/// Greedy word wrap on single spaces.
fn wrap_words(line: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split(' ') {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + word_len + 1 > max {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

impl Visitor for ComponentRenderer {
    type Output = Component;

    fn visit_document(&mut self, document: &Document) -> Component {
        let mut extra = Vec::with_capacity(document.children.len() * 2);
        for (i, child) in document.children.iter().enumerate() {
            if i > 0 {
                extra.push(Component::literal("\n"));
            }
            extra.push(child.accept(self));
        }
        Component::empty().with_extra(extra)
    }

    fn visit_heading(&mut self, heading: &Heading) -> Component {
        let mut style = Style::EMPTY.with_color(self.config.header_color);
        if heading.level <= 2 {
            style = style.with_bold(true);
        }
        Component::literal(heading.text.as_str()).with_style(style)
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) -> Component {
        Component::empty().with_extra(self.inline(&paragraph.children))
    }

    fn visit_code_block(&mut self, code_block: &CodeBlock) -> Component {
        let body = if code_block.language.is_empty() {
            code_block.code.clone()
        } else {
            format!("[{}]\n{}", code_block.language, code_block.code)
        };
        Component::literal(body).with_style(Style::EMPTY.with_color(self.config.code_color))
    }

    fn visit_bullet_list(&mut self, list: &BulletList) -> Component {
        self.list(&list.items, |_| "• ".to_string())
    }

    fn visit_ordered_list(&mut self, list: &OrderedList) -> Component {
        self.list(&list.items, |i| format!("{}. ", i + 1))
    }

    fn visit_list_item(&mut self, item: &ListItem) -> Component {
        Component::empty().with_extra(self.inline(&item.children))
    }

    fn visit_blockquote(&mut self, blockquote: &Blockquote) -> Component {
        Component::literal(format!("> {}", blockquote.content)).with_style(
            Style::EMPTY
                .with_color(self.config.quote_color)
                .with_italic(true),
        )
    }

    fn visit_text(&mut self, text: &Text) -> Component {
        Component::literal(text.content.as_str())
    }

    fn visit_bold(&mut self, bold: &Bold) -> Component {
        Component::empty()
            .with_style(
                Style::EMPTY
                    .with_color(self.config.bold_color)
                    .with_bold(true),
            )
            .with_extra(self.inline(&bold.children))
    }

    fn visit_italic(&mut self, italic: &Italic) -> Component {
        Component::empty()
            .with_style(
                Style::EMPTY
                    .with_color(self.config.italic_color)
                    .with_italic(true),
            )
            .with_extra(self.inline(&italic.children))
    }

    fn visit_strikethrough(&mut self, strikethrough: &Strikethrough) -> Component {
        Component::empty()
            .with_style(
                Style::EMPTY
                    .with_color(self.config.strikethrough_color)
                    .with_strikethrough(true),
            )
            .with_extra(self.inline(&strikethrough.children))
    }

    fn visit_inline_code(&mut self, code: &InlineCode) -> Component {
        Component::literal(code.code.as_str())
            .with_style(Style::EMPTY.with_color(self.config.code_color))
    }

    fn visit_link(&mut self, link: &Link) -> Component {
        let mut component = Component::literal(link.text.as_str()).with_style(
            Style::EMPTY
                .with_color(self.config.link_color)
                .with_underlined(true),
        );
        component.click_event = Some(ClickEvent::open_url(link.url.as_str()));
        component
    }

    fn visit_image(&mut self, image: &Image) -> Component {
        Component::literal(format!("[Image: {}]", image.alt_text))
            .with_style(Style::EMPTY.with_color(self.config.link_color))
    }
}
