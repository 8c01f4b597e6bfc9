pub mod dynamic_content;
pub mod schema_snippet;

pub use dynamic_content::DynamicContentExtension;
pub use schema_snippet::SchemaSnippetExtension;
