use std::panic::{self, AssertUnwindSafe};

use log::warn;

use crate::ast::Document;
use crate::chat::ChatRenderer;
use crate::component::{Component, ComponentConfig, ComponentRenderer};
use crate::error::{MarkupError, Result};
use crate::html::HtmlRenderer;
use crate::parser::parse_markdown;
use crate::render::{self, RendererKind, Visitor};

/// Entry point for hosts: parse markup and render it, never failing.
///
/// Any fault while structuring the input is logged and replaced by a
/// document holding the raw text as a single paragraph.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    config: ComponentConfig,
}

impl Processor {
    pub fn new() -> Self {
        Processor::default()
    }

    pub fn with_config(config: ComponentConfig) -> Self {
        Processor { config }
    }

    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }

    // === Parsing ===

    pub fn parse_markdown(&self, source: &str) -> Document {
        self.try_parse(source)
            .unwrap_or_else(|err| fallback(source.to_string(), &err))
    }

    /// Parse `source`, turning an unexpected panic into
    /// [`MarkupError::Internal`].
    ///
    /// The process-wide panic hook is left in place, so the panic message is
    /// still reported on stderr before the fallback's warning.
    pub fn try_parse(&self, source: &str) -> Result<Document> {
        panic::catch_unwind(AssertUnwindSafe(|| parse_markdown(source))).map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            MarkupError::internal(message)
        })
    }

    pub fn parse_bytes(&self, bytes: &[u8]) -> Document {
        self.try_parse_bytes(bytes)
            .unwrap_or_else(|err| fallback(String::from_utf8_lossy(bytes).into_owned(), &err))
    }

    pub fn try_parse_bytes(&self, bytes: &[u8]) -> Result<Document> {
        let source = std::str::from_utf8(bytes)?;
        self.try_parse(source)
    }

    // === Rendering ===

    pub fn render<V: Visitor>(&self, source: &str, visitor: &mut V) -> V::Output {
        render::render(&self.parse_markdown(source), visitor)
    }

    pub fn render_as(&self, source: &str, kind: RendererKind) -> String {
        render::render_as(&self.parse_markdown(source), kind)
    }

    pub fn to_html(&self, source: &str) -> String {
        self.render(source, &mut HtmlRenderer::new())
    }

    pub fn to_chat_text(&self, source: &str) -> String {
        self.render(source, &mut ChatRenderer::new())
    }

    /// One component per rendered line, word-wrapped per the configuration.
    pub fn to_components(&self, source: &str) -> Vec<Component> {
        let document = self.parse_markdown(source);
        ComponentRenderer::new(self.config.clone()).render_lines(&document)
    }
}

fn fallback(raw: String, err: &MarkupError) -> Document {
    warn!("falling back to plain text: {}", err);
    Document::plain_text(raw)
}
