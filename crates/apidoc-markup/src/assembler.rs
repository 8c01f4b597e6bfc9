use apidoc_core::DocumentTree;
use apidoc_core::config::{DocumentConfig, LineSeparator, MarkupLanguage};

use crate::block::{Block, LinkTarget};
use crate::builders::{EntityKind, SectionDocument, SectionItem};
use crate::error::GenerateError;
use crate::extension::Section;
use crate::renderer::{Renderer, relative_link};

/// Where each document and entity ends up in the output tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLayout {
    pub markup: MarkupLanguage,
    pub separate_definitions: bool,
    pub separate_operations: bool,
    pub line_separator: LineSeparator,
}

impl OutputLayout {
    pub fn from_config(config: &DocumentConfig) -> Self {
        Self {
            markup: config.markup,
            separate_definitions: config.separate_definitions,
            separate_operations: config.separate_operations,
            line_separator: config.line_separator,
        }
    }

    /// e.g. `overview.adoc`
    pub fn section_file(&self, section: Section) -> String {
        format!("{}.{}", section.as_str(), self.markup.file_extension())
    }

    /// e.g. `definitions/Pet.adoc`
    pub fn entity_file(&self, kind: EntityKind, name: &str) -> String {
        let dir = match kind {
            EntityKind::Operation => "operations",
            EntityKind::Definition => "definitions",
        };
        let name: String = name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!("{dir}/{name}.{}", self.markup.file_extension())
    }

    pub fn is_separated(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Operation => self.separate_operations,
            EntityKind::Definition => self.separate_definitions,
        }
    }

    /// The file holding the anchor a link points at.
    pub fn link_file(&self, target: &LinkTarget) -> String {
        match target {
            LinkTarget::Definition(name) if self.separate_definitions => {
                self.entity_file(EntityKind::Definition, name)
            }
            LinkTarget::Definition(_) => self.section_file(Section::Definitions),
            LinkTarget::SecurityScheme(_) => self.section_file(Section::Security),
        }
    }
}

/// Render built sections into a document tree.
///
/// Sections are written in fixed order, each followed by the entity files it
/// separated out. A separated entity leaves an include in its section.
pub fn assemble(
    mut sections: Vec<SectionDocument>,
    layout: &OutputLayout,
    renderer: &Renderer,
) -> Result<DocumentTree, GenerateError> {
    sections.sort_by_key(|s| s.section);
    let mut tree = DocumentTree::new(layout.line_separator);

    for section in sections {
        let section_file = layout.section_file(section.section);
        let mut blocks: Vec<Block> = Vec::new();
        let mut entity_files: Vec<(String, String)> = Vec::new();

        for item in section.items {
            match item {
                SectionItem::Blocks(b) => blocks.extend(b),
                SectionItem::Entity(entity) if layout.is_separated(entity.kind) => {
                    let path = layout.entity_file(entity.kind, &entity.name);
                    let content = renderer.render(&entity.blocks, &path)?;
                    blocks.push(Block::Include {
                        target: relative_link(&section_file, &path),
                        title: entity.title,
                    });
                    entity_files.push((path, content));
                }
                SectionItem::Entity(entity) => blocks.extend(entity.blocks),
            }
        }

        let content = renderer.render(&blocks, &section_file)?;
        tree.push(section_file, content);
        for (path, content) in entity_files {
            tree.push(path, content);
        }
    }

    log::debug!("assembled {} documents", tree.len());
    Ok(tree)
}
