use std::fs;
use std::path::{Path, PathBuf};

use apidoc_core::config::MarkupLanguage;

use crate::block::Block;
use crate::extension::{
    ContentExtension, ExtensionContext, ExtensionError, InsertionPoint, PositionFilter,
};

/// Splices hand-written snippet files into the generated documents.
///
/// Snippets live at `<root>/<section>/<entity>/<point>*.<ext>`, with
/// `document` in place of the entity for section-level points. A file belongs
/// to the longest point name its stem starts with, so `before-parameters.adoc`
/// is never picked up at `before`. Several files at one point are spliced in
/// file name order.
#[derive(Debug, Clone)]
pub struct DynamicContentExtension {
    root: PathBuf,
    markup: MarkupLanguage,
}

impl DynamicContentExtension {
    pub fn new(root: impl Into<PathBuf>, markup: MarkupLanguage) -> Self {
        Self {
            root: root.into(),
            markup,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn snippet_files(&self, dir: &Path, point: InsertionPoint) -> Result<Vec<PathBuf>, ExtensionError> {
        let entries = fs::read_dir(dir).map_err(|source| ExtensionError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| ExtensionError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(self.markup.file_extension())
            {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if InsertionPoint::longest_prefix_of(stem) == Some(point) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl ContentExtension for DynamicContentExtension {
    fn name(&self) -> &str {
        "dynamic-content"
    }

    fn positions(&self) -> Vec<PositionFilter> {
        vec![PositionFilter::any()]
    }

    fn content(&self, ctx: &ExtensionContext<'_>) -> Result<Vec<Block>, ExtensionError> {
        if !self.root.is_dir() {
            return Err(ExtensionError::MissingContent {
                entity: ctx.position.to_string(),
                root: self.root.clone(),
            });
        }

        let position = ctx.position;
        let dir = self
            .root
            .join(position.section.as_str())
            .join(position.entity.as_deref().unwrap_or("document"));
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut blocks = Vec::new();
        for path in self.snippet_files(&dir, position.point)? {
            let content = fs::read_to_string(&path).map_err(|source| ExtensionError::Io {
                path: path.clone(),
                source,
            })?;
            log::debug!("splicing {} at {}", path.display(), position);
            blocks.push(Block::Raw(content.trim_end().to_string()));
        }
        Ok(blocks)
    }
}
