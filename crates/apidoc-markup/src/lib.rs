pub mod assembler;
pub mod block;
pub mod builders;
pub mod descriptions;
pub mod error;
pub mod examples;
pub mod extension;
pub mod extensions;
pub mod generator;
pub mod i18n;
pub mod renderer;

pub use assembler::{OutputLayout, assemble};
pub use error::GenerateError;
pub use extension::{
    ContentExtension, ExtensionContext, ExtensionError, ExtensionPosition, ExtensionRegistry,
    InsertionPoint, PositionFilter, Requirement, Section,
};
pub use generator::{Converter, MarkupGenerator};
