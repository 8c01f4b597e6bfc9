use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::GeneratedFile;
use crate::config::LineSeparator;

/// An ordered set of rendered documents keyed by relative path.
///
/// Content is stored with `\n` line endings; the configured separator is
/// applied only when the tree is materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTree {
    files: Vec<GeneratedFile>,
    line_separator: LineSeparator,
}

impl DocumentTree {
    pub fn new(line_separator: LineSeparator) -> Self {
        Self {
            files: Vec::new(),
            line_separator,
        }
    }

    /// Append a document. Paths are expected to be unique.
    pub fn push(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.push(GeneratedFile {
            path: path.into(),
            content: content.into(),
        });
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.as_str())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn line_separator(&self) -> LineSeparator {
        self.line_separator
    }

    /// Every document concatenated in tree order, one blank line apart.
    pub fn as_string(&self) -> String {
        let mut out = String::new();
        for file in &self.files {
            let content = file.content.trim_end_matches('\n');
            if content.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(content);
        }
        out.push('\n');
        self.line_separator.apply(&out)
    }

    /// Write every document below `dir`, creating sub-directories as needed.
    ///
    /// On failure everything this call created is removed again: the whole
    /// directory when it did not exist before, otherwise the written files and
    /// new sub-directories.
    pub fn write_to(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let created_root = !dir.exists();
        let mut written: Vec<PathBuf> = Vec::new();
        let mut created_dirs: Vec<PathBuf> = Vec::new();

        let result = self.write_all(dir, &mut written, &mut created_dirs);
        if let Err(e) = result {
            log::warn!(
                "writing documents to {} failed, rolling back: {}",
                dir.display(),
                e
            );
            if created_root {
                let _ = fs::remove_dir_all(dir);
            } else {
                for path in written.iter().rev() {
                    let _ = fs::remove_file(path);
                }
                for path in created_dirs.iter().rev() {
                    let _ = fs::remove_dir_all(path);
                }
            }
            return Err(e);
        }

        log::debug!("wrote {} documents to {}", written.len(), dir.display());
        Ok(written)
    }

    fn write_all(
        &self,
        dir: &Path,
        written: &mut Vec<PathBuf>,
        created_dirs: &mut Vec<PathBuf>,
    ) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        for file in &self.files {
            let path = dir.join(&file.path);
            if let Some(parent) = path.parent() {
                // Rollback removes the outermost directory this call created.
                if let Some(first_missing) = parent.ancestors().take_while(|a| !a.exists()).last()
                {
                    let first_missing = first_missing.to_path_buf();
                    fs::create_dir_all(parent)?;
                    created_dirs.push(first_missing);
                }
            }
            fs::write(&path, self.line_separator.apply(&file.content))?;
            written.push(path);
        }
        Ok(())
    }
}
