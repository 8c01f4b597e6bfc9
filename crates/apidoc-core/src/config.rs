use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level project configuration loaded from `.apidoc.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApidocConfig {
    pub input: String,
    pub output: String,
    pub naming: NamingConfig,
    pub extensions: ExtensionsConfig,
    pub document: DocumentConfig,
}

impl Default for ApidocConfig {
    fn default() -> Self {
        Self {
            input: "swagger.yaml".to_string(),
            output: "docs/generated".to_string(),
            naming: NamingConfig::default(),
            extensions: ExtensionsConfig::default(),
            document: DocumentConfig::default(),
        }
    }
}

/// Options that shape the generated documents.
///
/// Passed by reference to every stage; nothing mutates it after load.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub markup: MarkupLanguage,
    pub group_by: GroupBy,
    pub operation_ordering: OrderBy,
    pub definition_ordering: OrderBy,
    /// How many levels of anonymous object schemas are promoted to named
    /// definitions. `0` keeps every inline schema in place.
    pub inline_schema_depth: u32,
    pub separate_definitions: bool,
    pub separate_operations: bool,
    pub language: Language,
    pub generated_examples: bool,
    /// Directory holding `<Definition>/description.<ext>` overrides.
    pub definition_descriptions: Option<PathBuf>,
    pub line_separator: LineSeparator,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            markup: MarkupLanguage::Asciidoc,
            group_by: GroupBy::AsIs,
            operation_ordering: OrderBy::Declared,
            definition_ordering: OrderBy::Declared,
            inline_schema_depth: 10,
            separate_definitions: false,
            separate_operations: false,
            language: Language::En,
            generated_examples: false,
            definition_descriptions: None,
            line_separator: LineSeparator::Unix,
        }
    }
}

/// Target markup language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupLanguage {
    #[default]
    Asciidoc,
    Markdown,
}

impl MarkupLanguage {
    pub fn file_extension(&self) -> &'static str {
        match self {
            MarkupLanguage::Asciidoc => "adoc",
            MarkupLanguage::Markdown => "md",
        }
    }
}

/// How operations are grouped in the paths section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Mirror the URL path hierarchy.
    #[default]
    AsIs,
    /// One group per first tag.
    Tags,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    #[default]
    Declared,
    Alphabetical,
}

/// Output language for headings and labels.
///
/// Deserialized from a language tag; unknown tags fall back to English.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Language {
    #[default]
    En,
    Ru,
    Fr,
    De,
}

impl Language {
    /// Resolve a tag such as `ru`, `fr-CA` or `DE`. Unknown tags yield English.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Language::En,
            "ru" => Language::Ru,
            "fr" => Language::Fr,
            "de" => Language::De,
            _ => {
                log::warn!("unknown language tag '{tag}', falling back to English");
                Language::En
            }
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Fr => "fr",
            Language::De => "de",
        }
    }
}

impl From<String> for Language {
    fn from(tag: String) -> Self {
        Language::from_tag(&tag)
    }
}

/// Line separator used when documents are materialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSeparator {
    #[default]
    Unix,
    Windows,
    Mac,
    /// Whatever the host platform uses.
    System,
}

impl LineSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineSeparator::Unix => "\n",
            LineSeparator::Windows => "\r\n",
            LineSeparator::Mac => "\r",
            LineSeparator::System => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }

    /// Convert every line ending in `content` (`\r\n`, `\r` or `\n`) to this
    /// separator.
    pub fn apply(&self, content: &str) -> String {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        match self.as_str() {
            "\n" => normalized,
            sep => normalized.replace('\n', sep),
        }
    }
}

/// Naming strategy and aliases.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub strategy: NamingStrategy,
    /// Map from resolved operation name (operationId or route-derived) to custom alias.
    #[serde(default)]
    pub aliases: IndexMap<String, String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            strategy: NamingStrategy::UseOperationId,
            aliases: IndexMap::new(),
        }
    }
}

/// How operation names are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    #[default]
    UseOperationId,
    UseRouteBased,
}

/// Bundled extensions enabled from the project file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtensionsConfig {
    /// Root of `<section>/<entity>/<point>*.<ext>` snippet files.
    pub dynamic_content: Option<PathBuf>,
    /// Root of `<Definition>/schema.xsd|schema.json` snippet files.
    pub schemas: Option<PathBuf>,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apidoc.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApidocConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: ApidocConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apidoc configuration
input: swagger.yaml
output: docs/generated

naming:
  strategy: use_operation_id  # use_operation_id | use_route_based
  aliases: {}
    # findPetsByStatus: listPets     # operationId -> custom name

document:
  markup: asciidoc              # asciidoc | markdown
  group_by: as_is               # as_is | tags
  operation_ordering: declared  # declared | alphabetical
  definition_ordering: declared # declared | alphabetical
  inline_schema_depth: 10       # 0 keeps inline schemas in place
  separate_definitions: false   # one file per definition under definitions/
  separate_operations: false    # one file per operation under operations/
  language: en                  # en | ru | fr | de
  generated_examples: false
  # definition_descriptions: docs/definitions
  line_separator: unix          # unix | windows | mac | system

extensions: {}
  # dynamic_content: docs/extensions
  # schemas: docs/schemas
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApidocConfig::default();
        assert_eq!(config.input, "swagger.yaml");
        assert_eq!(config.output, "docs/generated");
        assert_eq!(config.naming.strategy, NamingStrategy::UseOperationId);
        assert!(config.naming.aliases.is_empty());
        assert_eq!(config.document.markup, MarkupLanguage::Asciidoc);
        assert_eq!(config.document.group_by, GroupBy::AsIs);
        assert_eq!(config.document.language, Language::En);
        assert!(!config.document.separate_definitions);
        assert!(config.extensions.dynamic_content.is_none());
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: petstore.json
output: out
naming:
  strategy: use_route_based
  aliases:
    findPetsByStatus: listPets
document:
  markup: markdown
  group_by: tags
  operation_ordering: alphabetical
  inline_schema_depth: 1
  separate_definitions: true
  language: ru
  line_separator: windows
extensions:
  dynamic_content: docs/extensions
"#;
        let config: ApidocConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "petstore.json");
        assert_eq!(config.naming.strategy, NamingStrategy::UseRouteBased);
        assert_eq!(config.naming.aliases["findPetsByStatus"], "listPets");
        assert_eq!(config.document.markup, MarkupLanguage::Markdown);
        assert_eq!(config.document.group_by, GroupBy::Tags);
        assert_eq!(config.document.operation_ordering, OrderBy::Alphabetical);
        assert_eq!(config.document.definition_ordering, OrderBy::Declared);
        assert_eq!(config.document.inline_schema_depth, 1);
        assert!(config.document.separate_definitions);
        assert_eq!(config.document.language, Language::Ru);
        assert_eq!(config.document.line_separator, LineSeparator::Windows);
        assert_eq!(
            config.extensions.dynamic_content,
            Some(PathBuf::from("docs/extensions"))
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "input: api.yaml\n";
        let config: ApidocConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "api.yaml");
        assert_eq!(config.output, "docs/generated");
        assert_eq!(config.document.inline_schema_depth, 10);
    }

    #[test]
    fn test_default_config_content_parses() {
        let config: ApidocConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.document.group_by, GroupBy::AsIs);
        assert_eq!(config.document.line_separator, LineSeparator::Unix);
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert_eq!(Language::from_tag("ru"), Language::Ru);
        assert_eq!(Language::from_tag("fr-CA"), Language::Fr);
        assert_eq!(Language::from_tag("DE"), Language::De);
        assert_eq!(Language::from_tag("xx"), Language::En);
        assert_eq!(Language::from_tag(""), Language::En);
    }

    #[test]
    fn test_line_separator_apply() {
        assert_eq!(LineSeparator::Unix.apply("a\nb"), "a\nb");
        assert_eq!(LineSeparator::Windows.apply("a\nb"), "a\r\nb");
        assert_eq!(LineSeparator::Mac.apply("a\nb"), "a\rb");
    }

    #[test]
    fn test_line_separator_normalizes_mixed_endings() {
        assert_eq!(LineSeparator::Windows.apply("a\r\nb\nc\rd"), "a\r\nb\r\nc\r\nd");
        assert_eq!(LineSeparator::Unix.apply("a\r\nb\rc"), "a\nb\nc");
        assert_eq!(LineSeparator::Mac.apply("a\r\nb"), "a\rb");
    }
}
