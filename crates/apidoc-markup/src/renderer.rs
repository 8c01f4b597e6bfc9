use std::collections::{HashMap, HashSet};

use apidoc_core::config::{Language, MarkupLanguage};
use indexmap::IndexMap;
use minijinja::{Environment, Value, context};

use crate::assembler::OutputLayout;
use crate::block::{Block, Inline, Line, LinkTarget};
use crate::error::GenerateError;
use crate::i18n::translate;

const ASCIIDOC_TEMPLATES: [(&str, &str); 6] = [
    ("heading", include_str!("../templates/asciidoc/heading.adoc.j2")),
    ("paragraph", include_str!("../templates/asciidoc/paragraph.adoc.j2")),
    ("list", include_str!("../templates/asciidoc/list.adoc.j2")),
    ("table", include_str!("../templates/asciidoc/table.adoc.j2")),
    ("code", include_str!("../templates/asciidoc/code.adoc.j2")),
    ("include", include_str!("../templates/asciidoc/include.adoc.j2")),
];

const MARKDOWN_TEMPLATES: [(&str, &str); 6] = [
    ("heading", include_str!("../templates/markdown/heading.md.j2")),
    ("paragraph", include_str!("../templates/markdown/paragraph.md.j2")),
    ("list", include_str!("../templates/markdown/list.md.j2")),
    ("table", include_str!("../templates/markdown/table.md.j2")),
    ("code", include_str!("../templates/markdown/code.md.j2")),
    ("include", include_str!("../templates/markdown/include.md.j2")),
];

/// Renders blocks as AsciiDoc or Markdown text.
///
/// Inline elements are rendered in Rust; each block kind has a template.
/// Cross references are resolved against the output layout, relative to the
/// file being rendered.
pub struct Renderer {
    env: Environment<'static>,
    layout: OutputLayout,
    language: Language,
    /// Anchor ids for keys that would collide once case is folded.
    anchor_overrides: HashMap<String, String>,
}

impl Renderer {
    pub fn new(layout: OutputLayout, language: Language) -> Result<Self, GenerateError> {
        let templates = match layout.markup {
            MarkupLanguage::Asciidoc => &ASCIIDOC_TEMPLATES,
            MarkupLanguage::Markdown => &MARKDOWN_TEMPLATES,
        };
        let mut env = Environment::new();
        for &(name, source) in templates {
            env.add_template(name, source)
                .map_err(|source| GenerateError::Template {
                    file: name.to_string(),
                    source,
                })?;
        }
        Ok(Self {
            env,
            layout,
            language,
            anchor_overrides: HashMap::new(),
        })
    }

    /// Register every anchor key of the document. Keys whose lowercased ids
    /// collide (`Pet` and `pet`) keep their case, and a numeric suffix is
    /// added if they still collide.
    pub fn with_anchor_keys<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut by_id: IndexMap<String, Vec<String>> = IndexMap::new();
        for key in keys {
            let id = self.base_anchor_id(&key, true);
            let group = by_id.entry(id).or_default();
            if !group.contains(&key) {
                group.push(key);
            }
        }

        let mut taken: HashSet<String> = by_id.keys().cloned().collect();
        let separator = match self.layout.markup {
            MarkupLanguage::Asciidoc => '_',
            MarkupLanguage::Markdown => '-',
        };
        let mut overrides = HashMap::new();
        for (folded, group) in &by_id {
            if group.len() < 2 {
                continue;
            }
            taken.remove(folded);
            for key in group {
                let base = self.base_anchor_id(key, false);
                let mut id = base.clone();
                let mut n = 2;
                while taken.contains(&id) {
                    id = format!("{base}{separator}{n}");
                    n += 1;
                }
                taken.insert(id.clone());
                overrides.insert(key.clone(), id);
            }
        }
        if !overrides.is_empty() {
            log::debug!("{} anchors keep their case to stay unique", overrides.len());
        }
        self.anchor_overrides = overrides;
        self
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Render blocks for `current_file`, one blank line between blocks.
    pub fn render(&self, blocks: &[Block], current_file: &str) -> Result<String, GenerateError> {
        let mut parts: Vec<String> = Vec::with_capacity(blocks.len());
        for block in blocks {
            let rendered = self.render_block(block, current_file)?;
            let rendered = rendered.trim_end();
            if !rendered.is_empty() {
                parts.push(rendered.to_string());
            }
        }
        let mut out = parts.join("\n\n");
        out.push('\n');
        Ok(out)
    }

    fn render_block(&self, block: &Block, current_file: &str) -> Result<String, GenerateError> {
        match block {
            Block::Heading {
                level,
                title,
                anchor,
            } => self.template(
                "heading",
                current_file,
                context! {
                    marker => self.heading_marker(*level),
                    title => self.line(title, current_file),
                    anchor => anchor.as_deref().map(|a| self.anchor_id(a)),
                },
            ),
            Block::Paragraph(line) => self.template(
                "paragraph",
                current_file,
                context! { text => self.line(line, current_file) },
            ),
            Block::List(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|item| self.line(item, current_file))
                    .collect();
                self.template("list", current_file, context! { items })
            }
            Block::Table { columns, rows } => {
                let header: Vec<&str> = columns
                    .iter()
                    .map(|label| translate(*label, self.language))
                    .collect();
                let rows: Vec<Vec<String>> = rows
                    .iter()
                    .map(|row| row.iter().map(|cell| self.cell(cell, current_file)).collect())
                    .collect();
                self.template("table", current_file, context! { header, rows })
            }
            Block::Code { language, content } => self.template(
                "code",
                current_file,
                context! { language, content },
            ),
            Block::Raw(content) => Ok(content.clone()),
            Block::Include { target, title } => self.template(
                "include",
                current_file,
                context! { target, title },
            ),
        }
    }

    fn template(&self, name: &str, current_file: &str, ctx: Value) -> Result<String, GenerateError> {
        let to_error = |source| GenerateError::Template {
            file: current_file.to_string(),
            source,
        };
        let tmpl = self.env.get_template(name).map_err(to_error)?;
        tmpl.render(ctx).map_err(to_error)
    }

    fn heading_marker(&self, level: u8) -> String {
        let level = usize::from(level.clamp(1, 6));
        match self.layout.markup {
            MarkupLanguage::Asciidoc => "=".repeat(level),
            MarkupLanguage::Markdown => "#".repeat(level),
        }
    }

    /// The markup-specific anchor id for an anchor key.
    pub fn anchor_id(&self, key: &str) -> String {
        match self.anchor_overrides.get(key) {
            Some(id) => id.clone(),
            None => self.base_anchor_id(key, true),
        }
    }

    fn base_anchor_id(&self, key: &str, fold_case: bool) -> String {
        let (prefix, replacement) = match self.layout.markup {
            MarkupLanguage::Asciidoc => ("_", '_'),
            MarkupLanguage::Markdown => ("", '-'),
        };
        let id: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { replacement })
            .collect();
        if fold_case {
            format!("{prefix}{}", id.to_lowercase())
        } else {
            format!("{prefix}{id}")
        }
    }

    fn cell(&self, line: &Line, current_file: &str) -> String {
        let text = self.line(line, current_file).replace('|', "\\|");
        match self.layout.markup {
            MarkupLanguage::Asciidoc => text,
            MarkupLanguage::Markdown => text.replace('\n', " "),
        }
    }

    fn line(&self, line: &Line, current_file: &str) -> String {
        let mut out = String::new();
        for inline in &line.0 {
            self.inline(inline, current_file, &mut out);
        }
        out
    }

    fn inline(&self, inline: &Inline, current_file: &str, out: &mut String) {
        let asciidoc = self.layout.markup == MarkupLanguage::Asciidoc;
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Label(label) => out.push_str(translate(*label, self.language)),
            Inline::Strong(inner) => {
                let marker = if asciidoc { "*" } else { "**" };
                out.push_str(marker);
                for i in inner {
                    self.inline(i, current_file, out);
                }
                out.push_str(marker);
            }
            Inline::Code(code) => {
                out.push('`');
                out.push_str(code);
                out.push('`');
            }
            Inline::Link { target, text } => out.push_str(&self.link(target, text, current_file)),
            Inline::LineBreak => out.push_str(if asciidoc { " +\n" } else { "<br>" }),
        }
    }

    fn link(&self, target: &LinkTarget, text: &str, current_file: &str) -> String {
        let id = self.anchor_id(&target.anchor_key());
        let target_file = self.layout.link_file(target);
        let href = if target_file == current_file {
            String::new()
        } else {
            relative_link(current_file, &target_file)
        };
        match (self.layout.markup, href.is_empty()) {
            (MarkupLanguage::Asciidoc, true) => format!("<<{id},{text}>>"),
            (MarkupLanguage::Asciidoc, false) => format!("<<{href}#{id},{text}>>"),
            (MarkupLanguage::Markdown, _) => format!("[{text}]({href}#{id})"),
        }
    }
}

/// Path of `to_file` as seen from the directory of `from_file`. Both are
/// relative to the output root.
pub(crate) fn relative_link(from_file: &str, to_file: &str) -> String {
    let depth = from_file.matches('/').count();
    format!("{}{}", "../".repeat(depth), to_file)
}
