use std::path::PathBuf;

use apidoc_core::error::{GroupingError, ParseError, TransformError};
use thiserror::Error;

use crate::extension::{ExtensionError, Section};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Grouping(#[from] GroupingError),

    #[error("{section} section: {source}")]
    Extension {
        section: Section,
        #[source]
        source: ExtensionError,
    },

    #[error("failed to render {file}: {source}")]
    Template {
        file: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
