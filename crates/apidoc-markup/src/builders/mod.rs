//! Section builders.
//!
//! Each builder turns the resolved model into a [`SectionDocument`] of
//! markup-neutral blocks. Builders share nothing but the read-only
//! [`BuildContext`].

pub mod common;
pub mod definitions;
pub mod overview;
pub mod paths;
pub mod security;

use apidoc_core::config::DocumentConfig;
use apidoc_core::ir::{GroupTree, IrDefinition, IrOperation, IrSpec};

use crate::block::Block;
use crate::descriptions::DefinitionDescriptions;
use crate::error::GenerateError;
use crate::extension::{
    ExtensionContext, ExtensionError, ExtensionPosition, ExtensionRegistry, InsertionPoint,
    Section,
};

/// Everything a builder may read.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub spec: &'a IrSpec,
    pub groups: &'a GroupTree,
    pub config: &'a DocumentConfig,
    pub descriptions: &'a DefinitionDescriptions,
    pub extensions: &'a ExtensionRegistry,
}

impl BuildContext<'_> {
    /// Blocks contributed by extensions at a section-level point.
    pub fn document_extensions(
        &self,
        section: Section,
        point: InsertionPoint,
    ) -> Result<Vec<Block>, ExtensionError> {
        let position = ExtensionPosition::document(section, point);
        self.extensions.dispatch(&ExtensionContext {
            position: &position,
            spec: self.spec,
            definition: None,
            operation: None,
            config: self.config,
        })
    }

    pub fn operation_extensions(
        &self,
        operation: &IrOperation,
        point: InsertionPoint,
    ) -> Result<Vec<Block>, ExtensionError> {
        let position = ExtensionPosition::entity(Section::Paths, point, &operation.name.original);
        self.extensions.dispatch(&ExtensionContext {
            position: &position,
            spec: self.spec,
            definition: None,
            operation: Some(operation),
            config: self.config,
        })
    }

    pub fn definition_extensions(
        &self,
        definition: &IrDefinition,
        point: InsertionPoint,
    ) -> Result<Vec<Block>, ExtensionError> {
        let position =
            ExtensionPosition::entity(Section::Definitions, point, &definition.name.original);
        self.extensions.dispatch(&ExtensionContext {
            position: &position,
            spec: self.spec,
            definition: Some(definition),
            operation: None,
            config: self.config,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Operation,
    Definition,
}

/// An operation or definition that may be written to its own file.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDocument {
    pub kind: EntityKind,
    pub name: String,
    pub title: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionItem {
    Blocks(Vec<Block>),
    Entity(EntityDocument),
}

/// The unrendered content of one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDocument {
    pub section: Section,
    pub items: Vec<SectionItem>,
}

impl SectionDocument {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            items: Vec::new(),
        }
    }

    /// Append blocks, merging into a trailing run of plain blocks.
    pub fn push_blocks(&mut self, blocks: impl IntoIterator<Item = Block>) {
        let mut blocks = blocks.into_iter().peekable();
        if blocks.peek().is_none() {
            return;
        }
        match self.items.last_mut() {
            Some(SectionItem::Blocks(existing)) => existing.extend(blocks),
            _ => self.items.push(SectionItem::Blocks(blocks.collect())),
        }
    }

    pub fn push_block(&mut self, block: Block) {
        self.push_blocks([block]);
    }

    pub fn push_entity(&mut self, entity: EntityDocument) {
        self.items.push(SectionItem::Entity(entity));
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityDocument> {
        self.items.iter().filter_map(|item| match item {
            SectionItem::Entity(entity) => Some(entity),
            SectionItem::Blocks(_) => None,
        })
    }
}

/// Build all four sections in output order.
pub fn build_all(ctx: &BuildContext<'_>) -> Result<Vec<SectionDocument>, GenerateError> {
    let builders: [(Section, fn(&BuildContext<'_>) -> Result<SectionDocument, ExtensionError>); 4] = [
        (Section::Overview, overview::build_overview),
        (Section::Paths, paths::build_paths),
        (Section::Definitions, definitions::build_definitions),
        (Section::Security, security::build_security),
    ];

    builders
        .into_iter()
        .map(|(section, build)| {
            log::debug!("building {section} section");
            build(ctx).map_err(|source| GenerateError::Extension { section, source })
        })
        .collect()
}
