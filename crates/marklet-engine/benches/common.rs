// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_document(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* **content** and `code`.\n\n- Bullet point\n  - Nested item\n- Another item\n\n> Quoted text\n>> deeper\n\n| a | b |\n| - | - |\n| 1 | 2 |\n\n    fn example() {\n        println!(\"Hello\");\n    }\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_nested_lists(items: usize, depth: usize) -> String {
    let mut content = String::new();

    for item in 0..items {
        for level in 0..depth {
            let indent = "  ".repeat(level);
            content.push_str(&format!("{indent}- item {item} at level {level}\n"));
        }
    }

    content
}

#[allow(dead_code)]
pub fn generate_unclosed_styles(lines: usize) -> String {
    "text with *half **open ~~markers and `ticks\n".repeat(lines)
}
