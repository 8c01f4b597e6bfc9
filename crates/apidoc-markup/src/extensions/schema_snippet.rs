use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::block::Block;
use crate::extension::{
    ContentExtension, ExtensionContext, ExtensionError, InsertionPoint, PositionFilter, Section,
};
use crate::i18n::Label;

/// Appends XML and JSON schema files to the end of each definition.
///
/// Reads `<root>/<Definition>/schema.xsd` and `<root>/<Definition>/schema.json`.
/// A definition with neither file is an error; register the extension as
/// optional to tolerate gaps.
#[derive(Debug, Clone)]
pub struct SchemaSnippetExtension {
    root: PathBuf,
}

impl SchemaSnippetExtension {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

const SNIPPETS: [(&str, Label, &str); 2] = [
    ("schema.xsd", Label::XmlSchema, "xml"),
    ("schema.json", Label::JsonSchema, "json"),
];

fn read_optional(path: &Path) -> Result<Option<String>, ExtensionError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ExtensionError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl ContentExtension for SchemaSnippetExtension {
    fn name(&self) -> &str {
        "schema-snippets"
    }

    fn positions(&self) -> Vec<PositionFilter> {
        vec![PositionFilter::at(Section::Definitions, InsertionPoint::End)]
    }

    fn content(&self, ctx: &ExtensionContext<'_>) -> Result<Vec<Block>, ExtensionError> {
        let Some(definition) = ctx.definition else {
            return Ok(Vec::new());
        };
        let dir = self.root.join(&definition.name.original);

        let mut blocks = Vec::new();
        for (file, label, language) in SNIPPETS {
            if let Some(content) = read_optional(&dir.join(file))? {
                blocks.push(Block::label_heading(4, label));
                blocks.push(Block::code(Some(language), content.trim_end()));
            }
        }

        if blocks.is_empty() {
            return Err(ExtensionError::MissingContent {
                entity: definition.name.original.clone(),
                root: self.root.clone(),
            });
        }
        Ok(blocks)
    }
}
