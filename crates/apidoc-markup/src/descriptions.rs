use std::fs;
use std::path::Path;

use apidoc_core::config::MarkupLanguage;
use apidoc_core::ir::IrSpec;
use indexmap::IndexMap;

use crate::error::GenerateError;

/// Hand-written definition descriptions that replace the ones in the Swagger document.
///
/// Loaded once before the build from `<dir>/<Definition>/description.<ext>`.
#[derive(Debug, Clone, Default)]
pub struct DefinitionDescriptions {
    entries: IndexMap<String, String>,
}

impl DefinitionDescriptions {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(dir: &Path, spec: &IrSpec, markup: MarkupLanguage) -> Result<Self, GenerateError> {
        if !dir.is_dir() {
            log::warn!(
                "definition descriptions directory {} not found, using spec descriptions",
                dir.display()
            );
            return Ok(Self::empty());
        }

        let file_name = format!("description.{}", markup.file_extension());
        let mut entries = IndexMap::new();
        for definition in &spec.definitions {
            let path = dir.join(&definition.name.original).join(&file_name);
            if !path.is_file() {
                continue;
            }
            let content = fs::read_to_string(&path).map_err(|source| GenerateError::Io {
                path: path.clone(),
                source,
            })?;
            entries.insert(
                definition.name.original.clone(),
                content.trim_end().to_string(),
            );
        }
        log::debug!(
            "loaded {} definition descriptions from {}",
            entries.len(),
            dir.display()
        );
        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
