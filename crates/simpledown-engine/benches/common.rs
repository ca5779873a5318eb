// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_document(sections: usize) -> String {
    let base = "# Title\n\nParagraph with **bold**, *italic* and ~~struck~~ text, `code` and a [link](https://example.com).\n\n## Section\n\n[warn]\nCareful with [*nested* links](/docs) here.\n[/warn]\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n<!-- comment -->\n";
    base.repeat(sections)
}

#[allow(dead_code)]
pub fn generate_nested(depth: usize) -> String {
    format!("{}core{}", "[quote]".repeat(depth), "[/quote]".repeat(depth))
}

/// Text with many specials that never form a construct.
#[allow(dead_code)]
pub fn generate_noise(size: usize) -> String {
    "[ * ~ < # ` ] ( ) *a **b ~~c ".repeat(size)
}
