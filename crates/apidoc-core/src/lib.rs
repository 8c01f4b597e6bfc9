pub mod config;
pub mod document;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

pub use document::DocumentTree;

/// A rendered document with its path relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for generators that turn a resolved IR spec into a document tree.
pub trait DocumentGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(&self, ir: &ir::IrSpec, config: &Self::Config)
    -> Result<DocumentTree, Self::Error>;
}
