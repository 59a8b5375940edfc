use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use markdown_book::ast::Document;
use markdown_book::{Processor, RendererKind, render_as};

/// Parse and render input on a background thread with a hard timeout.
/// Panics if the pipeline takes longer than the deadline.
fn parse_with_timeout(label: &str, source: &str, timeout: Duration) -> Document {
    let src = source.to_string();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let doc = Processor::new().parse_markdown(&src);
        // Rendering must terminate as well
        let _ = render_as(&doc, RendererKind::Html);
        let _ = render_as(&doc, RendererKind::ChatText);
        let _ = tx.send(doc);
    });

    match rx.recv_timeout(timeout) {
        Ok(doc) => doc,
        Err(_) => panic!("{label}: pipeline did not terminate within {timeout:?}"),
    }
}

/// Concatenated plain text of every block.
fn plain_text(doc: &Document) -> String {
    doc.children.iter().map(|node| node.plain_text()).collect()
}

const TIMEOUT: Duration = Duration::from_secs(2);

#[test]
fn deeply_nested_unclosed_brackets() {
    // 500 opening [ with no close: every one degrades to text
    let source = "[".repeat(500);
    let doc = parse_with_timeout("deeply_nested_unclosed_brackets", &source, TIMEOUT);
    assert_eq!(source, plain_text(&doc));
}

#[test]
fn unclosed_link_flood() {
    let source = "[a](".repeat(2000);
    let doc = parse_with_timeout("unclosed_link_flood", &source, TIMEOUT);
    assert_eq!(source, plain_text(&doc));
}

#[test]
fn unclosed_emphasis_flood() {
    let source = format!("x {}", "* ".repeat(300));
    let doc = parse_with_timeout("unclosed_emphasis_flood", &source, TIMEOUT);
    // Adjacent stars pair up into italic spans around single spaces
    assert_eq!(1, doc.children.len());
    assert_eq!(source.replace('*', ""), plain_text(&doc));
}

#[test]
fn unclosed_strong_flood() {
    let source = "** ".repeat(300);
    let doc = parse_with_timeout("unclosed_strong_flood", &source, TIMEOUT);
    assert_eq!(1, doc.children.len());
    assert_eq!(" ".repeat(300), plain_text(&doc));
}

#[test]
fn lone_delimiters_survive_as_text() {
    let cases = ["*", "**", "~~", "`", "```", "[", "![", "[x]", "![x](", "#", "-", "1.", ">"];
    for (i, src) in cases.iter().enumerate() {
        let doc = parse_with_timeout(&format!("lone_delimiter_{i}"), src, TIMEOUT);
        assert_eq!(*src, plain_text(&doc), "case {src:?}");
    }
}

#[test]
fn mixed_unclosed_formatting() {
    let source = "**bold *italic `code [link\n".repeat(50);
    let doc = parse_with_timeout("mixed_unclosed_formatting", &source, TIMEOUT);
    assert_eq!(50, doc.children.len());
    assert_eq!("**bold *italic `code [link", doc.children[0].plain_text());
}

#[test]
fn unclosed_code_fence_at_end() {
    let source = "intro\n```rust\nfn main() {}\n";
    let doc = parse_with_timeout("unclosed_code_fence_at_end", source, TIMEOUT);
    assert_eq!(3, doc.children.len());
}

#[test]
fn backtick_runs() {
    let source = "`".repeat(1000);
    let doc = parse_with_timeout("backtick_runs", &source, TIMEOUT);
    assert_eq!(source, plain_text(&doc));
}

#[test]
fn huge_single_line() {
    // 100KB of text on one line
    let source = "a".repeat(100_000);
    let doc = parse_with_timeout("huge_single_line", &source, TIMEOUT);
    assert_eq!(1, doc.children.len());
}

#[test]
fn huge_line_of_spaces() {
    let source = format!("{}x", " ".repeat(100_000));
    let doc = parse_with_timeout("huge_line_of_spaces", &source, TIMEOUT);
    assert_eq!("x", plain_text(&doc));
}

#[test]
fn many_blank_lines() {
    let source = "\n".repeat(10_000);
    let doc = parse_with_timeout("many_blank_lines", &source, TIMEOUT);
    assert!(doc.is_empty());
}

#[test]
fn many_list_items() {
    let source = "- item\n".repeat(5_000);
    let doc = parse_with_timeout("many_list_items", &source, TIMEOUT);
    assert_eq!(1, doc.children.len());
}

#[test]
fn control_and_nul_bytes() {
    let source = "a\0b\u{1}*c\0*\r\n\0";
    let doc = parse_with_timeout("control_and_nul_bytes", source, TIMEOUT);
    assert_eq!(2, doc.children.len());
    assert_eq!("a\0b\u{1}c\0\0", plain_text(&doc));
}
