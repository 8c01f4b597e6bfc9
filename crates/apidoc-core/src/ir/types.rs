use std::fmt;

use indexmap::IndexMap;

/// A fully resolved, generator-ready intermediate representation of a Swagger spec.
///
/// Definitions live in a flat arena addressed by name through
/// `definition_index`; every cross reference (`IrType::Ref`) is a name key into
/// that table, so cyclic schemas need no special ownership handling.
#[derive(Debug, Clone, Default)]
pub struct IrSpec {
    pub info: IrInfo,
    pub uri_scheme: IrUriScheme,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub tags: Vec<IrTag>,
    pub definitions: Vec<IrDefinition>,
    pub definition_index: IndexMap<String, usize>,
    pub operations: Vec<IrOperation>,
    pub security_schemes: Vec<IrSecurityScheme>,
}

impl IrSpec {
    /// Look up a definition by its canonical name.
    pub fn definition(&self, name: &str) -> Option<&IrDefinition> {
        self.definition_index
            .get(name)
            .map(|&i| &self.definitions[i])
    }

    /// Look up a security scheme by name.
    pub fn security_scheme(&self, name: &str) -> Option<&IrSecurityScheme> {
        self.security_schemes.iter().find(|s| s.name == name)
    }

    /// Look up a declared tag by name.
    pub fn tag(&self, name: &str) -> Option<&IrTag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Rebuild `definition_index` after the arena was modified.
    pub fn reindex_definitions(&mut self) {
        self.definition_index = self
            .definitions
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.original.clone(), i))
            .collect();
    }
}

/// API metadata.
#[derive(Debug, Clone, Default)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    pub terms_of_service: Option<String>,
    pub contact: Option<IrContact>,
    pub license: Option<IrLicense>,
}

#[derive(Debug, Clone, Default)]
pub struct IrContact {
    pub name: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IrLicense {
    pub name: String,
    pub url: Option<String>,
}

/// Where the API is served from.
#[derive(Debug, Clone, Default)]
pub struct IrUriScheme {
    pub host: Option<String>,
    pub base_path: Option<String>,
    pub schemes: Vec<String>,
}

/// A tag declared at the top level of the Swagger document.
#[derive(Debug, Clone)]
pub struct IrTag {
    pub name: String,
    pub description: Option<String>,
}

/// A name with multiple casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
    pub snake_case: String,
    pub screaming_snake: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

// Re-export schema and operation types for convenience
pub use super::operations::*;
pub use super::schemas::*;
pub use super::security::*;
