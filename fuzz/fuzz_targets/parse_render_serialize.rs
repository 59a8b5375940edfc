#![no_main]

use libfuzzer_sys::fuzz_target;
use markdown_book::token::Tag;
use markdown_book::{Processor, RendererKind, render_as, tokenize, tree_builder};

fuzz_target!(|data: &[u8]| {
    let processor = Processor::new();
    let doc = processor.parse_bytes(data);

    let _ = render_as(&doc, RendererKind::Html);
    let _ = render_as(&doc, RendererKind::ChatText);
    for line in processor.to_components(&String::from_utf8_lossy(data)) {
        let json = line.to_json().unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
    }

    let json = tree_builder::serialize_tree(&doc);
    assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());

    if let Ok(source) = std::str::from_utf8(data) {
        let tokens = tokenize(source);
        assert_eq!(Some(Tag::Eof), tokens.last().map(|t| t.tag));
        assert!(processor.try_parse(source).is_ok());
    }
});
