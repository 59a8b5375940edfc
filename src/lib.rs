pub mod token;
pub mod tokenizer;
pub mod ast;
pub mod parser;
pub mod render;
pub mod html;
pub mod chat;
pub mod component;
pub mod tree_builder;
pub mod error;
pub mod processor;
pub mod book;

pub use ast::Document;
pub use error::{MarkupError, Result};
pub use parser::{parse, parse_markdown};
pub use processor::Processor;
pub use render::{RendererKind, Visitor, render, render_as};
pub use tokenizer::tokenize;
pub use tree_builder::serialize_tree;
