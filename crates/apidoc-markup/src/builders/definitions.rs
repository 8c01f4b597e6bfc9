use apidoc_core::config::OrderBy;
use apidoc_core::ir::{IrDefinition, IrSchema, IrXml};

use crate::block::{Block, Line, LinkTarget};
use crate::examples::example_for_definition;
use crate::extension::{ExtensionError, InsertionPoint, Section};
use crate::i18n::Label;

use super::common::{
    InlineTable, all_fields, example_text, inherits_block, inline_table_blocks, labeled,
    properties_table, type_line,
};
use super::{BuildContext, EntityDocument, EntityKind, SectionDocument};

pub fn build_definitions(ctx: &BuildContext<'_>) -> Result<SectionDocument, ExtensionError> {
    let mut doc = SectionDocument::new(Section::Definitions);

    doc.push_blocks(ctx.document_extensions(Section::Definitions, InsertionPoint::DocumentBefore)?);
    doc.push_block(Block::label_heading(2, Label::Definitions));
    doc.push_blocks(ctx.document_extensions(Section::Definitions, InsertionPoint::DocumentBegin)?);

    let mut definitions: Vec<&IrDefinition> = ctx.spec.definitions.iter().collect();
    if ctx.config.definition_ordering == OrderBy::Alphabetical {
        definitions.sort_by(|a, b| a.name.original.cmp(&b.name.original));
    }
    for definition in definitions {
        doc.push_entity(definition_document(ctx, definition)?);
    }

    doc.push_blocks(ctx.document_extensions(Section::Definitions, InsertionPoint::DocumentEnd)?);
    doc.push_blocks(ctx.document_extensions(Section::Definitions, InsertionPoint::DocumentAfter)?);
    Ok(doc)
}

fn definition_document(
    ctx: &BuildContext<'_>,
    definition: &IrDefinition,
) -> Result<EntityDocument, ExtensionError> {
    let name = &definition.name.original;
    let mut blocks = ctx.definition_extensions(definition, InsertionPoint::Before)?;
    blocks.push(Block::anchored_heading(
        3,
        name.as_str(),
        LinkTarget::Definition(name.clone()).anchor_key(),
    ));
    blocks.extend(ctx.definition_extensions(definition, InsertionPoint::Begin)?);

    match (ctx.descriptions.get(name), &definition.description) {
        (Some(external), _) => blocks.push(Block::Raw(external.to_string())),
        (None, Some(description)) => blocks.push(Block::paragraph(description.trim())),
        (None, None) => {}
    }

    if let IrSchema::Object(ref obj) = definition.schema {
        blocks.extend(inherits_block(&obj.inherits));
    }

    blocks.extend(ctx.definition_extensions(definition, InsertionPoint::BeforeProperties)?);

    let mut tables: Vec<InlineTable> = Vec::new();
    match definition.schema {
        IrSchema::Object(ref obj) => {
            let fields = all_fields(ctx.spec, obj);
            if !fields.is_empty() {
                blocks.push(properties_table(&fields, &definition.name.pascal_case, &mut tables));
            }
            if let Some(ref additional) = obj.additional_properties {
                let value = type_line(
                    additional,
                    &format!("{}Value", definition.name.pascal_case),
                    &mut tables,
                );
                blocks.push(Block::paragraph(labeled(
                    Label::Type,
                    Line::text("< string, ").extend(value).push_text(" > map"),
                )));
            }
        }
        IrSchema::Enum(ref e) => {
            let values = Line::join(e.variants.iter().map(Line::code).collect(), ", ");
            blocks.push(Block::paragraph(labeled(
                Label::Type,
                Line::text("enum (").extend(values).push_text(")"),
            )));
        }
        IrSchema::Alias(ref alias) => {
            let target = type_line(&alias.target, &definition.name.pascal_case, &mut tables);
            blocks.push(Block::paragraph(labeled(Label::Type, target)));
        }
    }
    blocks.extend(inline_table_blocks(ctx.spec, tables));

    let xml = definition.xml.as_ref().map(xml_lines).unwrap_or_default();
    if !xml.is_empty() {
        blocks.push(Block::label_heading(4, Label::Xml));
        blocks.push(Block::List(xml));
    }

    if definition.example.is_some() || ctx.config.generated_examples {
        let example = example_for_definition(ctx.spec, definition);
        blocks.push(Block::label_heading(4, Label::Example));
        blocks.push(Block::code(Some("json"), example_text(&example)));
    }

    blocks.extend(ctx.definition_extensions(definition, InsertionPoint::End)?);
    blocks.extend(ctx.definition_extensions(definition, InsertionPoint::After)?);

    Ok(EntityDocument {
        kind: EntityKind::Definition,
        name: name.clone(),
        title: name.clone(),
        blocks,
    })
}

fn xml_lines(xml: &IrXml) -> Vec<Line> {
    let mut lines = Vec::new();
    for (label, value) in [
        (Label::Name, &xml.name),
        (Label::Namespace, &xml.namespace),
        (Label::Prefix, &xml.prefix),
    ] {
        if let Some(value) = value {
            lines.push(labeled(label, Line::code(value)));
        }
    }
    if xml.attribute {
        lines.push(labeled(Label::Attribute, Line::code("true")));
    }
    if xml.wrapped {
        lines.push(labeled(Label::Wrapped, Line::code("true")));
    }
    lines
}
