use std::path::Path;

use apidoc_core::config::{DocumentConfig, NamingConfig};
use apidoc_core::ir::{IrSpec, group_operations};
use apidoc_core::parse;
use apidoc_core::parse::spec::SwaggerSpec;
use apidoc_core::transform::{TransformOptions, transform_with_options};
use apidoc_core::{DocumentGenerator, DocumentTree};

use crate::assembler::{OutputLayout, assemble};
use crate::block::LinkTarget;
use crate::builders::{BuildContext, build_all};
use crate::descriptions::DefinitionDescriptions;
use crate::error::GenerateError;
use crate::extension::ExtensionRegistry;
use crate::renderer::Renderer;

/// Generates AsciiDoc or Markdown documents from a resolved spec.
#[derive(Debug, Default)]
pub struct MarkupGenerator {
    extensions: ExtensionRegistry,
}

impl MarkupGenerator {
    pub fn new(extensions: ExtensionRegistry) -> Self {
        Self { extensions }
    }

    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }
}

impl DocumentGenerator for MarkupGenerator {
    type Config = DocumentConfig;
    type Error = GenerateError;

    fn generate(&self, ir: &IrSpec, config: &DocumentConfig) -> Result<DocumentTree, GenerateError> {
        let groups = group_operations(ir, config.group_by, config.operation_ordering)?;
        let descriptions = match config.definition_descriptions {
            Some(ref dir) => DefinitionDescriptions::load(dir, ir, config.markup)?,
            None => DefinitionDescriptions::empty(),
        };

        let ctx = BuildContext {
            spec: ir,
            groups: &groups,
            config,
            descriptions: &descriptions,
            extensions: &self.extensions,
        };
        let sections = build_all(&ctx)?;

        let layout = OutputLayout::from_config(config);
        let renderer = Renderer::new(layout, config.language)?.with_anchor_keys(anchor_keys(ir));
        assemble(sections, &layout, &renderer)
    }
}

/// Every anchor the builders emit: definitions, operations and security schemes.
fn anchor_keys(ir: &IrSpec) -> Vec<String> {
    let definitions = ir
        .definitions
        .iter()
        .map(|d| LinkTarget::Definition(d.name.original.clone()).anchor_key());
    let operations = ir.operations.iter().map(|op| op.name.original.clone());
    let schemes = ir
        .security_schemes
        .iter()
        .map(|s| LinkTarget::SecurityScheme(s.name.clone()).anchor_key());
    definitions.chain(operations).chain(schemes).collect()
}

/// Parse, resolve and generate in one call.
#[derive(Debug, Default)]
pub struct Converter {
    config: DocumentConfig,
    naming: NamingConfig,
    generator: MarkupGenerator,
}

impl Converter {
    pub fn new(config: DocumentConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_naming(mut self, naming: NamingConfig) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_extensions(mut self, extensions: ExtensionRegistry) -> Self {
        self.generator = MarkupGenerator::new(extensions);
        self
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn convert_str(&self, input: &str) -> Result<DocumentTree, GenerateError> {
        let spec = parse::from_str(input)?;
        self.convert_spec(&spec)
    }

    pub fn convert_path(&self, path: &Path) -> Result<DocumentTree, GenerateError> {
        let spec = parse::from_path(path)?;
        self.convert_spec(&spec)
    }

    pub fn convert_spec(&self, spec: &SwaggerSpec) -> Result<DocumentTree, GenerateError> {
        let ir = self.resolve(spec)?;
        self.generator.generate(&ir, &self.config)
    }

    /// Run only the resolve stage with this converter's options.
    pub fn resolve(&self, spec: &SwaggerSpec) -> Result<IrSpec, GenerateError> {
        let options = TransformOptions {
            naming_strategy: self.naming.strategy,
            aliases: self.naming.aliases.clone(),
            inline_schema_depth: self.config.inline_schema_depth,
        };
        Ok(transform_with_options(spec, &options)?)
    }
}
