//! HTML rendering of a parsed [`Node`] tree.
//!
//! Rendering is child-first: every container renders its children and wraps
//! the concatenation in its own markup. Text is written verbatim; nothing is
//! HTML-escaped, so markup in the source passes straight through.

use marklet_syntax::{Node, Style};

use crate::options::RenderOptions;

/// Highest heading level HTML supports; deeper headers are clamped to it.
const MAX_HEADING_LEVEL: usize = 6;

pub struct HtmlRenderer<'o> {
    options: &'o RenderOptions,
}

impl<'o> HtmlRenderer<'o> {
    pub fn new(options: &'o RenderOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        self.write(node, &mut out);
        out
    }

    fn write(&self, node: &Node, out: &mut String) {
        match node {
            Node::Document { children } => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    self.write(child, out);
                }
            }
            Node::Header { level, children } => {
                let tag = format!("h{}", (*level).clamp(1, MAX_HEADING_LEVEL));
                self.wrap(&tag, children, out);
            }
            Node::Table { header, rows } => {
                out.push_str("<table><thead><tr>");
                for cell in header {
                    self.wrap("th", std::slice::from_ref(cell), out);
                }
                out.push_str("</tr></thead><tbody>");
                for row in rows {
                    out.push_str("<tr>");
                    for cell in row {
                        self.wrap("td", std::slice::from_ref(cell), out);
                    }
                    out.push_str("</tr>");
                }
                out.push_str("</tbody></table>");
            }
            Node::BlockQuote { children } => self.wrap("blockquote", children, out),
            Node::CodeBlock { text } => {
                out.push_str("<pre><code>");
                out.push_str(text);
                out.push_str("</code></pre>");
            }
            Node::List { children } => self.wrap("ul", children, out),
            Node::ListItem { children } => self.wrap("li", children, out),
            Node::Paragraph { children } => self.wrap("p", children, out),
            Node::Line { children } => self.write_all(children, out),
            Node::Style { style, children } => self.wrap(style_tag(*style), children, out),
            Node::Text { text } => out.push_str(text),
            Node::Error { text } => {
                out.push_str(&format!(
                    "<span style=\"color: {}\">",
                    self.options.error_color
                ));
                out.push_str(text);
                out.push_str("</span>");
            }
        }
    }

    fn write_all(&self, children: &[Node], out: &mut String) {
        for child in children {
            self.write(child, out);
        }
    }

    fn wrap(&self, tag: &str, children: &[Node], out: &mut String) {
        out.push('<');
        out.push_str(tag);
        out.push('>');
        self.write_all(children, out);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

fn style_tag(style: Style) -> &'static str {
    match style {
        Style::Emphasis => "em",
        Style::Strong => "strong",
        Style::Underline => "u",
        Style::Strikethrough => "s",
        Style::Subscript => "sub",
        Style::Superscript => "sup",
        Style::Small => "small",
        Style::Big => "big",
        Style::Code => "code",
    }
}
