//! Extension points and the registry that dispatches to them.
//!
//! Every section offers `document-*` points around its body; operations and
//! definitions offer `before`/`begin`/`end`/`after` around their own blocks,
//! plus `before-parameters` and `before-properties` respectively.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use apidoc_core::config::DocumentConfig;
use apidoc_core::ir::{IrDefinition, IrOperation, IrSpec};
use thiserror::Error;

use crate::block::Block;

/// The four top-level documents, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Overview,
    Paths,
    Definitions,
    Security,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Overview,
        Section::Paths,
        Section::Definitions,
        Section::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Paths => "paths",
            Section::Definitions => "definitions",
            Section::Security => "security",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| ExtensionError::InvalidPosition(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertionPoint {
    DocumentBefore,
    DocumentBegin,
    DocumentEnd,
    DocumentAfter,
    Before,
    Begin,
    End,
    After,
    BeforeParameters,
    BeforeProperties,
}

impl InsertionPoint {
    pub const ALL: [InsertionPoint; 10] = [
        InsertionPoint::DocumentBefore,
        InsertionPoint::DocumentBegin,
        InsertionPoint::DocumentEnd,
        InsertionPoint::DocumentAfter,
        InsertionPoint::Before,
        InsertionPoint::Begin,
        InsertionPoint::End,
        InsertionPoint::After,
        InsertionPoint::BeforeParameters,
        InsertionPoint::BeforeProperties,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsertionPoint::DocumentBefore => "document-before",
            InsertionPoint::DocumentBegin => "document-begin",
            InsertionPoint::DocumentEnd => "document-end",
            InsertionPoint::DocumentAfter => "document-after",
            InsertionPoint::Before => "before",
            InsertionPoint::Begin => "begin",
            InsertionPoint::End => "end",
            InsertionPoint::After => "after",
            InsertionPoint::BeforeParameters => "before-parameters",
            InsertionPoint::BeforeProperties => "before-properties",
        }
    }

    pub fn is_document_level(&self) -> bool {
        matches!(
            self,
            InsertionPoint::DocumentBefore
                | InsertionPoint::DocumentBegin
                | InsertionPoint::DocumentEnd
                | InsertionPoint::DocumentAfter
        )
    }

    /// The longest point name that `stem` starts with, if any.
    ///
    /// `before-parameters-notes` resolves to `before-parameters`, not `before`.
    pub fn longest_prefix_of(stem: &str) -> Option<InsertionPoint> {
        InsertionPoint::ALL
            .into_iter()
            .filter(|point| stem.starts_with(point.as_str()))
            .max_by_key(|point| point.as_str().len())
    }
}

impl fmt::Display for InsertionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsertionPoint {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsertionPoint::ALL
            .into_iter()
            .find(|point| point.as_str() == s)
            .ok_or_else(|| ExtensionError::InvalidPosition(s.to_string()))
    }
}

/// A concrete place in the output where extension content is spliced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionPosition {
    pub section: Section,
    pub point: InsertionPoint,
    /// Operation or definition name; `None` for document-level points.
    pub entity: Option<String>,
}

impl ExtensionPosition {
    pub fn document(section: Section, point: InsertionPoint) -> Self {
        Self {
            section,
            point,
            entity: None,
        }
    }

    pub fn entity(section: Section, point: InsertionPoint, name: impl Into<String>) -> Self {
        Self {
            section,
            point,
            entity: Some(name.into()),
        }
    }
}

impl fmt::Display for ExtensionPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.point)?;
        if let Some(ref entity) = self.entity {
            write!(f, ":{entity}")?;
        }
        Ok(())
    }
}

/// The positions an extension subscribes to. `None` fields match anything.
///
/// Parsed from `section:point[:entity]`, where each part may be `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionFilter {
    pub section: Option<Section>,
    pub point: Option<InsertionPoint>,
    pub entity: Option<String>,
}

impl PositionFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn at(section: Section, point: InsertionPoint) -> Self {
        Self {
            section: Some(section),
            point: Some(point),
            entity: None,
        }
    }

    pub fn for_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn matches(&self, position: &ExtensionPosition) -> bool {
        self.section.is_none_or(|s| s == position.section)
            && self.point.is_none_or(|p| p == position.point)
            && self
                .entity
                .as_deref()
                .is_none_or(|e| position.entity.as_deref() == Some(e))
    }
}

impl FromStr for PositionFilter {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let section = match parts.next() {
            None | Some("*") | Some("") => None,
            Some(section) => Some(section.parse()?),
        };
        let point = match parts.next() {
            None | Some("*") => None,
            Some(point) => Some(point.parse()?),
        };
        let entity = match parts.next() {
            None | Some("*") => None,
            Some(entity) => Some(entity.to_string()),
        };
        Ok(Self {
            section,
            point,
            entity,
        })
    }
}

/// Read-only view handed to an extension at one position.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionContext<'a> {
    pub position: &'a ExtensionPosition,
    pub spec: &'a IrSpec,
    pub definition: Option<&'a IrDefinition>,
    pub operation: Option<&'a IrOperation>,
    pub config: &'a DocumentConfig,
}

/// Supplies extra blocks at the positions it subscribes to.
pub trait ContentExtension: Send + Sync {
    fn name(&self) -> &str;
    fn positions(&self) -> Vec<PositionFilter>;
    fn content(&self, ctx: &ExtensionContext<'_>) -> Result<Vec<Block>, ExtensionError>;
}

/// Whether a failing extension aborts the build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Requirement {
    Required,
    #[default]
    Optional,
}

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("no content for {entity} under {}", root.display())]
    MissingContent { entity: String, root: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid extension position: {0:?}")]
    InvalidPosition(String),

    #[error("extension '{extension}' failed at {position}: {source}")]
    Failed {
        extension: String,
        position: String,
        #[source]
        source: Box<ExtensionError>,
    },

    #[error("{0}")]
    Custom(String),
}

type ContentFn = dyn Fn(&ExtensionContext<'_>) -> Result<Vec<Block>, ExtensionError> + Send + Sync;

struct FnExtension {
    name: String,
    positions: Vec<PositionFilter>,
    f: Box<ContentFn>,
}

impl ContentExtension for FnExtension {
    fn name(&self) -> &str {
        &self.name
    }

    fn positions(&self) -> Vec<PositionFilter> {
        self.positions.clone()
    }

    fn content(&self, ctx: &ExtensionContext<'_>) -> Result<Vec<Block>, ExtensionError> {
        (self.f)(ctx)
    }
}

struct Registration {
    extension: Box<dyn ContentExtension>,
    requirement: Requirement,
}

/// Ordered set of extensions. Registration order is dispatch order.
#[derive(Default)]
pub struct ExtensionRegistry {
    entries: Vec<Registration>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<E>(&mut self, extension: E, requirement: Requirement) -> &mut Self
    where
        E: ContentExtension + 'static,
    {
        log::debug!(
            "registered {:?} extension '{}'",
            requirement,
            extension.name()
        );
        self.entries.push(Registration {
            extension: Box::new(extension),
            requirement,
        });
        self
    }

    /// Register a closure as a required extension.
    pub fn with_fn<F>(
        &mut self,
        name: impl Into<String>,
        positions: Vec<PositionFilter>,
        f: F,
    ) -> &mut Self
    where
        F: Fn(&ExtensionContext<'_>) -> Result<Vec<Block>, ExtensionError> + Send + Sync + 'static,
    {
        self.register(
            FnExtension {
                name: name.into(),
                positions,
                f: Box::new(f),
            },
            Requirement::Required,
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.extension.name())
    }

    /// Collect the blocks of every extension subscribed to `ctx.position`.
    pub fn dispatch(&self, ctx: &ExtensionContext<'_>) -> Result<Vec<Block>, ExtensionError> {
        let mut blocks = Vec::new();
        for entry in &self.entries {
            let extension = &entry.extension;
            if !extension
                .positions()
                .iter()
                .any(|filter| filter.matches(ctx.position))
            {
                continue;
            }
            match extension.content(ctx) {
                Ok(content) => blocks.extend(content),
                Err(e) if entry.requirement == Requirement::Optional => {
                    log::warn!(
                        "optional extension '{}' skipped at {}: {}",
                        extension.name(),
                        ctx.position,
                        e
                    );
                }
                Err(e) => {
                    return Err(ExtensionError::Failed {
                        extension: extension.name().to_string(),
                        position: ctx.position.to_string(),
                        source: Box::new(e),
                    });
                }
            }
        }
        Ok(blocks)
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use apidoc_core::ir::{IrInfo, IrUriScheme};
    use indexmap::IndexMap;

    use super::*;

    fn empty_spec() -> IrSpec {
        IrSpec {
            info: IrInfo::default(),
            uri_scheme: IrUriScheme::default(),
            consumes: Vec::new(),
            produces: Vec::new(),
            tags: Vec::new(),
            definitions: Vec::new(),
            definition_index: IndexMap::new(),
            operations: Vec::new(),
            security_schemes: Vec::new(),
        }
    }

    fn dispatch_at(
        registry: &ExtensionRegistry,
        position: &ExtensionPosition,
    ) -> Result<Vec<Block>, ExtensionError> {
        let spec = empty_spec();
        let config = DocumentConfig::default();
        registry.dispatch(&ExtensionContext {
            position,
            spec: &spec,
            definition: None,
            operation: None,
            config: &config,
        })
    }

    #[test]
    fn test_position_filter_parse() {
        let filter: PositionFilter = "definitions:end:*".parse().expect("should parse");
        assert_eq!(filter.section, Some(Section::Definitions));
        assert_eq!(filter.point, Some(InsertionPoint::End));
        assert_eq!(filter.entity, None);

        assert!("nowhere:end".parse::<PositionFilter>().is_err());
        assert_eq!("*".parse::<PositionFilter>().expect("should parse"), PositionFilter::any());
    }

    #[test]
    fn test_position_filter_matches_entity() {
        let filter = PositionFilter::at(Section::Definitions, InsertionPoint::End).for_entity("Pet");
        assert!(filter.matches(&ExtensionPosition::entity(
            Section::Definitions,
            InsertionPoint::End,
            "Pet"
        )));
        assert!(!filter.matches(&ExtensionPosition::entity(
            Section::Definitions,
            InsertionPoint::End,
            "Tag"
        )));
        assert!(!filter.matches(&ExtensionPosition::document(
            Section::Definitions,
            InsertionPoint::End
        )));
    }

    #[test]
    fn test_longest_prefix() {
        assert_eq!(
            InsertionPoint::longest_prefix_of("before-parameters-notes"),
            Some(InsertionPoint::BeforeParameters)
        );
        assert_eq!(
            InsertionPoint::longest_prefix_of("before-1"),
            Some(InsertionPoint::Before)
        );
        assert_eq!(InsertionPoint::longest_prefix_of("intro"), None);
    }

    #[test]
    fn test_position_display() {
        let position = ExtensionPosition::entity(Section::Definitions, InsertionPoint::End, "Pet");
        assert_eq!(position.to_string(), "definitions:end:Pet");
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let mut registry = ExtensionRegistry::new();
        let filter = PositionFilter::at(Section::Overview, InsertionPoint::DocumentEnd);
        registry
            .with_fn("a", vec![filter.clone()], |_| Ok(vec![Block::Raw("A".into())]))
            .with_fn("b", vec![filter], |_| Ok(vec![Block::Raw("B".into())]));

        let position = ExtensionPosition::document(Section::Overview, InsertionPoint::DocumentEnd);
        let blocks = dispatch_at(&registry, &position).expect("should dispatch");
        assert_eq!(blocks, vec![Block::Raw("A".into()), Block::Raw("B".into())]);

        let other = ExtensionPosition::document(Section::Paths, InsertionPoint::DocumentEnd);
        assert!(dispatch_at(&registry, &other).expect("should dispatch").is_empty());
    }

    struct Failing;

    impl ContentExtension for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn positions(&self) -> Vec<PositionFilter> {
            vec![PositionFilter::any()]
        }

        fn content(&self, _ctx: &ExtensionContext<'_>) -> Result<Vec<Block>, ExtensionError> {
            Err(ExtensionError::Custom("boom".into()))
        }
    }

    #[test]
    fn test_optional_failure_is_skipped() {
        let mut registry = ExtensionRegistry::new();
        registry.register(Failing, Requirement::Optional);
        let position = ExtensionPosition::document(Section::Security, InsertionPoint::DocumentBegin);
        assert!(dispatch_at(&registry, &position).expect("should dispatch").is_empty());
    }

    #[test]
    fn test_required_failure_names_extension_and_position() {
        let mut registry = ExtensionRegistry::new();
        registry.register(Failing, Requirement::Required);
        let position = ExtensionPosition::document(Section::Security, InsertionPoint::DocumentBegin);
        match dispatch_at(&registry, &position) {
            Err(ExtensionError::Failed {
                extension,
                position,
                ..
            }) => {
                assert_eq!(extension, "failing");
                assert_eq!(position, "security:document-begin");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
