use markdown_book::{parse_markdown, tree_builder};
use serde_json::Value;

fn tree(source: &str) -> Value {
    let json_str = tree_builder::serialize_tree(&parse_markdown(source));
    serde_json::from_str(&json_str).unwrap()
}

#[test]
fn serializes_simple_text() {
    let json_str = tree_builder::serialize_tree(&parse_markdown("Hello world"));

    assert!(json_str.contains("\"type\":\"root\""));
    assert!(json_str.contains("Hello world"));
}

#[test]
fn serializes_heading_with_level() {
    let parsed = tree("# Hello");
    let heading = &parsed["children"][0];

    assert_eq!("heading", heading["type"]);
    assert_eq!(1, heading["level"]);
    assert_eq!("Hello", heading["value"]);
}

#[test]
fn serializes_code_block_with_language() {
    let parsed = tree("```javascript\nconsole.log(\"hi\");\n```");
    let block = &parsed["children"][0];

    assert_eq!("code_block", block["type"]);
    assert_eq!("javascript", block["lang"]);
    assert_eq!("console.log(\"hi\");", block["value"]);
}

#[test]
fn serializes_links_and_images() {
    let parsed = tree("[Go](https://go.dev) ![logo](a.png)");
    let children = &parsed["children"][0]["children"];

    assert_eq!("link", children[0]["type"]);
    assert_eq!("https://go.dev", children[0]["url"]);
    assert_eq!("Go", children[0]["value"]);
    assert_eq!(" ", children[1]["value"]);
    assert_eq!("image", children[2]["type"]);
    assert_eq!("logo", children[2]["alt"]);
}

#[test]
fn serializes_lists_with_items() {
    let parsed = tree("1. first\n2. **second**");
    let list = &parsed["children"][0];

    assert_eq!("ordered_list", list["type"]);
    let items = list["items"].as_array().unwrap();
    assert_eq!(2, items.len());
    assert_eq!("list_item", items[1]["type"]);
    assert_eq!("bold", items[1]["children"][0]["type"]);
    assert_eq!("second", items[1]["children"][0]["children"][0]["value"]);
}

#[test]
fn escapes_json_strings() {
    let json_str =
        tree_builder::serialize_tree(&parse_markdown("Text with \"quotes\" and \\backslash"));

    assert!(json_str.contains("\\\"quotes\\\""));
    assert!(json_str.contains("\\\\backslash"));
}

#[test]
fn produces_valid_json() {
    let parsed = tree("# Title\n\nA paragraph with **bold** text.\n\n- Item 1\n- Item 2");
    let root = parsed.as_object().unwrap();

    assert!(root.contains_key("type"));
    assert!(root.contains_key("children"));
    assert_eq!(3, root["children"].as_array().unwrap().len());
}
