use apidoc_core::ir::{IrOperation, IrParameterLocation, IrResponse};
use heck::ToPascalCase;

use crate::block::{Block, Inline, Line, LinkTarget};
use crate::examples::example_for_type;
use crate::extension::{ExtensionError, InsertionPoint, Section};
use crate::i18n::Label;

use super::common::{
    InlineTable, example_text, inline_table_blocks, required_line, strong, type_line, value_text,
};
use super::{BuildContext, EntityDocument, EntityKind, SectionDocument};

pub fn build_paths(ctx: &BuildContext<'_>) -> Result<SectionDocument, ExtensionError> {
    let mut doc = SectionDocument::new(Section::Paths);

    doc.push_blocks(ctx.document_extensions(Section::Paths, InsertionPoint::DocumentBefore)?);
    doc.push_block(Block::label_heading(2, Label::Paths));
    doc.push_blocks(ctx.document_extensions(Section::Paths, InsertionPoint::DocumentBegin)?);

    for group in ctx.groups.leaf_groups() {
        doc.push_block(Block::heading(3, group.name.as_str()));
        if let Some(ref description) = group.description {
            doc.push_block(Block::paragraph(description.as_str()));
        }
        for &index in &group.operation_indices {
            let operation = &ctx.spec.operations[index];
            doc.push_entity(operation_document(ctx, operation)?);
        }
    }

    doc.push_blocks(ctx.document_extensions(Section::Paths, InsertionPoint::DocumentEnd)?);
    doc.push_blocks(ctx.document_extensions(Section::Paths, InsertionPoint::DocumentAfter)?);
    Ok(doc)
}

fn operation_document(
    ctx: &BuildContext<'_>,
    op: &IrOperation,
) -> Result<EntityDocument, ExtensionError> {
    let mut blocks = ctx.operation_extensions(op, InsertionPoint::Before)?;
    blocks.push(Block::anchored_heading(4, op.title(), &op.name.original));
    blocks.extend(ctx.operation_extensions(op, InsertionPoint::Begin)?);
    blocks.push(Block::code(None, op.key()));

    if op.deprecated {
        blocks.push(Block::paragraph(
            Line::new().push(Inline::Strong(vec![Inline::Label(Label::Deprecated)])),
        ));
    }
    if let Some(ref description) = op.description {
        blocks.push(Block::label_heading(5, Label::Description));
        blocks.push(Block::paragraph(description.trim()));
    }

    blocks.extend(ctx.operation_extensions(op, InsertionPoint::BeforeParameters)?);
    if !op.parameters.is_empty() {
        blocks.push(Block::label_heading(5, Label::Parameters));
        blocks.extend(parameters_blocks(ctx, op));
    }

    blocks.push(Block::label_heading(5, Label::Responses));
    blocks.extend(responses_blocks(ctx, op));

    for (label, values, as_code) in [
        (Label::Consumes, &op.consumes, true),
        (Label::Produces, &op.produces, true),
        (Label::Tags, &op.tags, false),
    ] {
        if values.is_empty() {
            continue;
        }
        blocks.push(Block::label_heading(5, label));
        blocks.push(Block::List(
            values
                .iter()
                .map(|v| if as_code { Line::code(v) } else { Line::text(v) })
                .collect(),
        ));
    }

    if !op.security.is_empty() {
        blocks.push(Block::label_heading(5, Label::Security));
        blocks.push(security_table(ctx, op));
    }

    blocks.extend(example_blocks(ctx, op));

    blocks.extend(ctx.operation_extensions(op, InsertionPoint::End)?);
    blocks.extend(ctx.operation_extensions(op, InsertionPoint::After)?);

    Ok(EntityDocument {
        kind: EntityKind::Operation,
        name: op.name.original.clone(),
        title: op.title(),
        blocks,
    })
}

/// Type | Name | Description | Required | Schema | Default
fn parameters_blocks(ctx: &BuildContext<'_>, op: &IrOperation) -> Vec<Block> {
    let mut tables: Vec<InlineTable> = Vec::new();
    let rows = op
        .parameters
        .iter()
        .map(|param| {
            let owner = match param.location {
                IrParameterLocation::Body => format!("{}Body", op.name.pascal_case),
                _ => format!("{}{}", op.name.pascal_case, param.name.pascal_case),
            };
            vec![
                Line::new().push(strong(param.location.as_str().to_pascal_case())),
                Line::new().push(strong(&param.original_name)),
                Line::text(param.description.clone().unwrap_or_default()),
                required_line(param.required),
                type_line(&param.param_type, &owner, &mut tables),
                param
                    .default_value
                    .as_ref()
                    .map(|v| Line::code(value_text(v)))
                    .unwrap_or_default(),
            ]
        })
        .collect();

    let mut blocks = vec![Block::Table {
        columns: vec![
            Label::Type,
            Label::Name,
            Label::Description,
            Label::Required,
            Label::Schema,
            Label::Default,
        ],
        rows,
    }];
    blocks.extend(inline_table_blocks(ctx.spec, tables));
    blocks
}

/// HTTP Code | Description | Schema
fn responses_blocks(ctx: &BuildContext<'_>, op: &IrOperation) -> Vec<Block> {
    let mut tables: Vec<InlineTable> = Vec::new();
    let rows = op
        .responses
        .iter()
        .map(|response| {
            let owner = format!(
                "{}Response{}",
                op.name.pascal_case,
                response.status.to_pascal_case()
            );
            let schema = match response.schema {
                Some(ref schema) => type_line(schema, &owner, &mut tables),
                None => Line::label(Label::NoContent),
            };
            vec![
                Line::new().push(strong(&response.status)),
                response_description(response, &owner, &mut tables),
                schema,
            ]
        })
        .collect();

    let mut blocks = vec![Block::Table {
        columns: vec![Label::HttpCode, Label::Description, Label::Schema],
        rows,
    }];
    blocks.extend(inline_table_blocks(ctx.spec, tables));
    blocks
}

fn response_description(response: &IrResponse, owner: &str, tables: &mut Vec<InlineTable>) -> Line {
    let mut line = Line::text(response.description.trim());
    if response.headers.is_empty() {
        return line;
    }
    if !line.is_empty() {
        line = line.push(Inline::LineBreak);
    }
    line = line
        .push(Inline::Strong(vec![Inline::Label(Label::Headers)]))
        .push_text(" :");
    for header in &response.headers {
        let header_owner = format!("{owner}{}", header.name.to_pascal_case());
        line = line
            .push(Inline::LineBreak)
            .push(Inline::Code(header.name.clone()))
            .push_text(" (")
            .extend(type_line(&header.header_type, &header_owner, tables))
            .push_text(")");
        if let Some(ref description) = header.description {
            line = line.push_text(format!(" : {description}"));
        }
    }
    line
}

/// Type | Name | Scopes
fn security_table(ctx: &BuildContext<'_>, op: &IrOperation) -> Block {
    let rows = op
        .security
        .iter()
        .map(|requirement| {
            let kind = ctx
                .spec
                .security_scheme(&requirement.scheme)
                .map(|s| s.kind.type_name())
                .unwrap_or_default();
            vec![
                Line::new().push(strong(kind)),
                Line::new().push(Inline::Link {
                    target: LinkTarget::SecurityScheme(requirement.scheme.clone()),
                    text: requirement.scheme.clone(),
                }),
                Line::text(requirement.scopes.join(", ")),
            ]
        })
        .collect();

    Block::Table {
        columns: vec![Label::Type, Label::Name, Label::Scopes],
        rows,
    }
}

/// Explicit response examples, plus generated request and response examples
/// when enabled.
fn example_blocks(ctx: &BuildContext<'_>, op: &IrOperation) -> Vec<Block> {
    let generate = ctx.config.generated_examples;
    let mut blocks = Vec::new();

    if generate {
        blocks.push(Block::label_heading(5, Label::ExampleRequest));
        blocks.push(Block::label_heading(6, Label::RequestPath));
        blocks.push(Block::code(None, op.path.as_str()));
        if let Some(body) = op.body_parameter() {
            let example = example_for_type(ctx.spec, &body.param_type);
            blocks.push(Block::label_heading(6, Label::RequestBody));
            blocks.push(Block::code(Some("json"), example_text(&example)));
        }
    }

    let mut responses = Vec::new();
    for response in &op.responses {
        if !response.examples.is_empty() {
            for example in response.examples.values() {
                responses.push((response.status.as_str(), example_text(example)));
            }
        } else if generate {
            if let Some(ref schema) = response.schema {
                let example = example_for_type(ctx.spec, schema);
                responses.push((response.status.as_str(), example_text(&example)));
            }
        }
    }

    if !responses.is_empty() {
        blocks.push(Block::label_heading(5, Label::ExampleResponse));
        for (status, example) in responses {
            blocks.push(Block::heading(
                6,
                Line::label(Label::Response).push_text(format!(" {status}")),
            ));
            blocks.push(Block::code(Some("json"), example));
        }
    }
    blocks
}
