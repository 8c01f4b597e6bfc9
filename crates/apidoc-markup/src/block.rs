//! Markup-neutral document blocks.
//!
//! Section builders and extensions produce [`Block`]s; the renderer turns them
//! into AsciiDoc or Markdown text. Keeping the two apart means a builder never
//! needs to know which markup it is writing.

use crate::i18n::Label;

/// A block-level element of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A section title. `level` 1 is the document title.
    Heading {
        level: u8,
        title: Line,
        anchor: Option<String>,
    },
    Paragraph(Line),
    /// An unordered list, one line per item.
    List(Vec<Line>),
    /// A table with a header row. Rows are expected to match the column count.
    Table {
        columns: Vec<Label>,
        rows: Vec<Vec<Line>>,
    },
    Code {
        language: Option<String>,
        content: String,
    },
    /// Pre-rendered markup, emitted verbatim.
    Raw(String),
    /// A reference to a document written to another file.
    Include { target: String, title: String },
}

impl Block {
    pub fn heading(level: u8, title: impl Into<Line>) -> Self {
        Block::Heading {
            level,
            title: title.into(),
            anchor: None,
        }
    }

    pub fn anchored_heading(level: u8, title: impl Into<Line>, anchor: impl Into<String>) -> Self {
        Block::Heading {
            level,
            title: title.into(),
            anchor: Some(anchor.into()),
        }
    }

    pub fn label_heading(level: u8, label: Label) -> Self {
        Block::heading(level, Line::label(label))
    }

    pub fn paragraph(line: impl Into<Line>) -> Self {
        Block::Paragraph(line.into())
    }

    pub fn code(language: Option<&str>, content: impl Into<String>) -> Self {
        Block::Code {
            language: language.map(str::to_string),
            content: content.into(),
        }
    }
}

/// A sequence of inline elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line(pub Vec<Inline>);

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// A plain text line. Empty text yields an empty line.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Line::new();
        }
        Line(vec![Inline::Text(text)])
    }

    pub fn label(label: Label) -> Self {
        Line(vec![Inline::Label(label)])
    }

    pub fn code(text: impl Into<String>) -> Self {
        Line(vec![Inline::Code(text.into())])
    }

    pub fn push(mut self, inline: Inline) -> Self {
        self.0.push(inline);
        self
    }

    pub fn push_text(self, text: impl Into<String>) -> Self {
        self.push(Inline::Text(text.into()))
    }

    /// Append another line's elements.
    pub fn extend(mut self, other: Line) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Join lines with `separator` text between them.
    pub fn join(lines: Vec<Line>, separator: &str) -> Line {
        let mut out = Line::new();
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                out = out.push_text(separator);
            }
            out = out.extend(line);
        }
        out
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Line::text(text)
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Line::text(text)
    }
}

impl From<Label> for Line {
    fn from(label: Label) -> Self {
        Line::label(label)
    }
}

/// An inline element.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Label(Label),
    Strong(Vec<Inline>),
    Code(String),
    Link { target: LinkTarget, text: String },
    LineBreak,
}

/// What a cross reference points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Definition(String),
    SecurityScheme(String),
}

impl LinkTarget {
    /// The heading anchor this target resolves to.
    pub fn anchor_key(&self) -> String {
        match self {
            LinkTarget::Definition(name) => name.clone(),
            LinkTarget::SecurityScheme(name) => format!("security-{name}"),
        }
    }
}
