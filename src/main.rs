use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use markdown_book::ast::*;
use markdown_book::token::Token;
use markdown_book::{parse, tokenize, tree_builder};

#[derive(Parser)]
#[command(name = "mdb-parse")]
#[command(about = "Dump the tokens and syntax tree of a markup file")]
struct Args {
    /// Markup file to parse
    file: PathBuf,

    /// Also print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the tree as JSON instead of the indented listing
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let tokens = tokenize(&source);
    let document = parse(&tokens);

    if args.json {
        println!("{}", tree_builder::serialize_tree_pretty(&document));
        return ExitCode::SUCCESS;
    }

    println!("Parsing: {}\n", args.file.display());

    if args.tokens {
        print_tokens(&tokens);
    }

    println!("=== TREE ===");
    println!("document (blocks={})", document.children.len());
    for node in &document.children {
        print_node(node, 1);
    }

    ExitCode::SUCCESS
}

fn print_tokens(tokens: &[Token]) {
    println!("=== TOKENS ({}) ===", tokens.len());
    for (i, tok) in tokens.iter().enumerate() {
        println!(
            "[{}] {} {:?} (line {}, bytes {}..{})",
            i,
            tok.tag.name(),
            tok.text,
            tok.line,
            tok.loc.start,
            tok.loc.end
        );
    }
    println!();
}

fn print_node(node: &Node, indent: usize) {
    print!("{}{}", "  ".repeat(indent), node.name());

    match node {
        Node::Heading(heading) => print!(" (level={}) {:?}", heading.level, heading.text),
        Node::Text(text) => print!(" {:?}", text.content),
        Node::InlineCode(code) => print!(" {:?}", code.code),
        Node::CodeBlock(block) => print!(" (lang={:?}) {:?}", block.language, block.code),
        Node::Link(link) => print!(" {:?} (url={})", link.text, link.url),
        Node::Image(image) => print!(" {:?} (url={})", image.alt_text, image.url),
        Node::Blockquote(quote) => print!(" {:?}", quote.content),
        Node::Paragraph(_)
        | Node::Bold(_)
        | Node::Italic(_)
        | Node::Strikethrough(_)
        | Node::BulletList(_)
        | Node::OrderedList(_) => {}
    }
    println!();

    match node {
        Node::Paragraph(Paragraph { children })
        | Node::Bold(Bold { children })
        | Node::Italic(Italic { children })
        | Node::Strikethrough(Strikethrough { children }) => {
            for child in children {
                print_node(child, indent + 1);
            }
        }
        Node::BulletList(BulletList { items }) | Node::OrderedList(OrderedList { items }) => {
            for item in items {
                println!("{}list_item", "  ".repeat(indent + 1));
                for child in &item.children {
                    print_node(child, indent + 2);
                }
            }
        }
        Node::Heading(_)
        | Node::CodeBlock(_)
        | Node::Blockquote(_)
        | Node::Text(_)
        | Node::InlineCode(_)
        | Node::Link(_)
        | Node::Image(_) => {}
    }
}
