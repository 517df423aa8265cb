//! The owned document tree produced by the parser.
//!
//! Every container owns its children outright; there is no sharing and no
//! parent pointer. Nodes are built bottom-up and never mutated afterwards.

use serde::Serialize;

/// Inline style applied by a [`Node::Style`] span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Emphasis,
    Strong,
    Underline,
    Strikethrough,
    Subscript,
    Superscript,
    Small,
    Big,
    Code,
}

impl Style {
    /// Look up the style named by a one or two character delimiter.
    pub fn from_marker(marker: &str) -> Option<Self> {
        let style = match marker {
            "*" | "_" => Self::Emphasis,
            "**" => Self::Strong,
            "__" => Self::Underline,
            "~~" => Self::Strikethrough,
            "~" => Self::Subscript,
            "^" => Self::Superscript,
            "--" => Self::Small,
            "++" => Self::Big,
            "`" => Self::Code,
            _ => return None,
        };
        Some(style)
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// The root; children are blocks.
    Document { children: Vec<Node> },
    Header { level: usize, children: Vec<Node> },
    /// Cells are [`Node::Line`] containers.
    Table {
        header: Vec<Node>,
        rows: Vec<Vec<Node>>,
    },
    BlockQuote { children: Vec<Node> },
    CodeBlock { text: String },
    /// Children are [`Node::ListItem`]s.
    List { children: Vec<Node> },
    /// Children are blocks, possibly nested lists.
    ListItem { children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    /// Un-styled inline container: a table cell or an unterminated span.
    Line { children: Vec<Node> },
    Style { style: Style, children: Vec<Node> },
    Text { text: String },
    /// Raw text of a block that failed to parse.
    Error { text: String },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    /// Child nodes in document order; table cells are flattened row by row.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Document { children }
            | Node::Header { children, .. }
            | Node::BlockQuote { children }
            | Node::List { children }
            | Node::ListItem { children }
            | Node::Paragraph { children }
            | Node::Line { children }
            | Node::Style { children, .. } => children.iter().collect(),
            Node::Table { header, rows } => header.iter().chain(rows.iter().flatten()).collect(),
            Node::CodeBlock { .. } | Node::Text { .. } | Node::Error { .. } => Vec::new(),
        }
    }

    /// Short variant name, used in tree dumps and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Node::Document { .. } => "Document",
            Node::Header { .. } => "Header",
            Node::Table { .. } => "Table",
            Node::BlockQuote { .. } => "BlockQuote",
            Node::CodeBlock { .. } => "CodeBlock",
            Node::List { .. } => "List",
            Node::ListItem { .. } => "ListItem",
            Node::Paragraph { .. } => "Paragraph",
            Node::Line { .. } => "Line",
            Node::Style { .. } => "Style",
            Node::Text { .. } => "Text",
            Node::Error { .. } => "Error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Node::Error { .. })
    }

    /// Concatenated literal text of the subtree, ignoring markup.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text { text } | Node::CodeBlock { text } | Node::Error { text } => text.clone(),
            _ => self
                .children()
                .into_iter()
                .map(Node::plain_text)
                .collect(),
        }
    }

    /// Number of error nodes anywhere in the subtree.
    pub fn error_count(&self) -> usize {
        usize::from(self.is_error())
            + self
                .children()
                .into_iter()
                .map(Node::error_count)
                .sum::<usize>()
    }
}
