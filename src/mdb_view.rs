use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::debug;

use markdown_book::component::{Component, ComponentConfig, Style};
use markdown_book::{Processor, Result};

// ANSI escape codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const UNDERLINE: &str = "\x1b[4m";
const STRIKE: &str = "\x1b[9m";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Styled terminal preview
    Ansi,
    /// HTML fragment
    Html,
    /// String with chat formatting codes
    Chat,
    /// Chat components as JSON, one per line
    Json,
}

#[derive(Parser)]
#[command(name = "mdb-view")]
#[command(about = "Render a markup file as HTML, chat text or a terminal preview")]
struct Args {
    /// Markup file to render
    file: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Ansi)]
    format: Format,

    /// JSON file with component colours and wrapping settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured line width
    #[arg(long)]
    width: Option<NonZeroUsize>,

    /// Disable word wrapping
    #[arg(long)]
    no_wrap: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let source = fs::read(&args.file)?;
    let config = load_config(args)?;
    debug!("rendering {} as {:?}", args.file.display(), args.format);

    let processor = Processor::with_config(config);
    // Invalid UTF-8 still renders through the plain-text fallback
    let text = String::from_utf8_lossy(&source);

    let output = match args.format {
        Format::Html => with_newline(processor.to_html(&text)),
        Format::Chat => with_newline(processor.to_chat_text(&text)),
        Format::Ansi => render_ansi(&processor.to_components(&text)),
        Format::Json => {
            let mut out = String::new();
            for line in processor.to_components(&text) {
                out.push_str(&line.to_json()?);
                out.push('\n');
            }
            out
        }
    };
    Ok(output)
}

fn load_config(args: &Args) -> Result<ComponentConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            ComponentConfig::from_json(&json)?
        }
        None => ComponentConfig::default(),
    };

    if let Some(width) = args.width {
        config.max_line_length = width.get();
    }
    if args.no_wrap {
        config.enable_word_wrap = false;
    }
    Ok(config)
}

fn with_newline(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn render_ansi(lines: &[Component]) -> String {
    let mut output = String::new();
    for line in lines {
        for (text, style) in line.runs() {
            output.push_str(&ansi_prefix(&style));
            output.push_str(&text);
            output.push_str(RESET);
        }
        output.push('\n');
    }
    output
}

fn ansi_prefix(style: &Style) -> String {
    let mut prefix = String::new();
    if let Some(rgb) = style.color.and_then(|color| color.rgb()) {
        prefix.push_str(&format!(
            "\x1b[38;2;{};{};{}m",
            (rgb >> 16) & 0xff,
            (rgb >> 8) & 0xff,
            rgb & 0xff
        ));
    }
    if style.bold == Some(true) {
        prefix.push_str(BOLD);
    }
    if style.italic == Some(true) {
        prefix.push_str(ITALIC);
    }
    if style.underlined == Some(true) {
        prefix.push_str(UNDERLINE);
    }
    if style.strikethrough == Some(true) {
        prefix.push_str(STRIKE);
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_is_rejected_by_the_parser() {
        assert!(Args::try_parse_from(["mdb-view", "book.md", "--width", "0"]).is_err());

        let args = Args::try_parse_from(["mdb-view", "book.md", "--width", "12", "--no-wrap"])
            .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(12, config.max_line_length);
        assert!(!config.enable_word_wrap);
    }

    #[test]
    fn ansi_prefix_encodes_colour_and_decorations() {
        let style = Style::EMPTY
            .with_color(markdown_book::chat::ChatFormatting::Red)
            .with_bold(true);
        assert_eq!("\x1b[38;2;255;85;85m\x1b[1m", ansi_prefix(&style));
    }
}
