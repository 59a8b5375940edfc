use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::processor::Processor;

pub const TITLE_KEY: &str = "title";
pub const CONTENT_KEY: &str = "content";

/// Longest title the host stores, in characters.
pub const MAX_TITLE_CHARS: usize = 100;
/// Longest body the host stores, in characters.
pub const MAX_CONTENT_CHARS: usize = 32767;

const PREVIEW_CHARS: usize = 50;

/// Title and markup body of a book as persisted by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookContent {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

impl BookContent {
    pub fn new(title: &str, content: &str) -> Self {
        BookContent::default().with_title(title).with_content(content)
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = truncate_chars(title, MAX_TITLE_CHARS);
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = truncate_chars(content, MAX_CONTENT_CHARS);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// First characters of the body for tooltips.
    pub fn preview(&self) -> String {
        if self.content.chars().count() > PREVIEW_CHARS {
            format!("{}...", truncate_chars(&self.content, PREVIEW_CHARS))
        } else {
            self.content.clone()
        }
    }

    pub fn to_pairs(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (TITLE_KEY.to_string(), self.title.clone()),
            (CONTENT_KEY.to_string(), self.content.clone()),
        ])
    }

    /// Missing keys read as empty strings; stored values are re-truncated.
    pub fn from_pairs(pairs: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| pairs.get(key).map(String::as_str).unwrap_or("");
        BookContent::new(get(TITLE_KEY), get(CONTENT_KEY))
    }

    pub fn render_html(&self, processor: &Processor) -> String {
        processor.to_html(&self.content)
    }

    pub fn render_chat_text(&self, processor: &Processor) -> String {
        processor.to_chat_text(&self.content)
    }

    pub fn render_components(&self, processor: &Processor) -> Vec<Component> {
        processor.to_components(&self.content)
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
