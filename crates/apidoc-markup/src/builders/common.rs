use std::collections::VecDeque;

use apidoc_core::ir::{IrField, IrObjectSchema, IrSchema, IrSpec, IrType};

use crate::block::{Block, Inline, Line, LinkTarget};
use crate::i18n::Label;

/// An anonymous object schema rendered as its own table after the table
/// that mentions it.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineTable {
    pub name: String,
    pub inherits: Vec<String>,
    pub fields: Vec<IrField>,
}

/// Render a type as a table cell. Inline objects are named after `owner`
/// and queued on `tables`.
pub fn type_line(ir_type: &IrType, owner: &str, tables: &mut Vec<InlineTable>) -> Line {
    match ir_type {
        IrType::Primitive { primitive, format } => match format {
            Some(format) => Line::text(format!("{} ({})", primitive.as_str(), format)),
            None => Line::text(primitive.as_str()),
        },
        IrType::Enum(variants) => Line::text(format!("enum ({})", variants.join(", "))),
        IrType::Array(inner) => Line::text("< ")
            .extend(type_line(inner, &format!("{owner}Item"), tables))
            .push_text(" > array"),
        IrType::Map(inner) => Line::text("< string, ")
            .extend(type_line(inner, &format!("{owner}Value"), tables))
            .push_text(" > map"),
        IrType::Object(obj) => {
            tables.push(InlineTable {
                name: owner.to_string(),
                inherits: obj.inherits.clone(),
                fields: obj.fields.clone(),
            });
            Line::text(owner)
        }
        IrType::Ref(name) => Line::new().push(Inline::Link {
            target: LinkTarget::Definition(name.clone()),
            text: name.clone(),
        }),
        IrType::File => Line::text("file"),
        IrType::Any => Line::text("object"),
    }
}

pub fn strong(text: impl Into<String>) -> Inline {
    Inline::Strong(vec![Inline::Text(text.into())])
}

/// `*Label* : value`
pub fn labeled(label: Label, value: Line) -> Line {
    Line::new()
        .push(Inline::Strong(vec![Inline::Label(label)]))
        .push_text(" : ")
        .extend(value)
}

pub fn value_text(value: &serde_json::Value) -> String {
    value.to_string()
}

/// Pretty JSON for example blocks.
pub fn example_text(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn required_line(required: bool) -> Line {
    Line::label(if required {
        Label::Required
    } else {
        Label::Optional
    })
}

/// Name | Description | Required | Schema | Default
pub fn properties_table(fields: &[IrField], owner: &str, tables: &mut Vec<InlineTable>) -> Block {
    let rows = fields
        .iter()
        .map(|field| {
            let mut description = Line::text(field.description.clone().unwrap_or_default());
            if field.read_only {
                if !description.is_empty() {
                    description = description.push(Inline::LineBreak);
                }
                description = description.push(Inline::Strong(vec![Inline::Label(Label::ReadOnly)]));
            }
            if let Some(ref example) = field.example {
                description = description
                    .push(Inline::LineBreak)
                    .extend(labeled(Label::Example, Line::code(value_text(example))));
            }
            vec![
                Line::new().push(strong(&field.original_name)),
                description,
                required_line(field.required),
                type_line(
                    &field.field_type,
                    &format!("{owner}{}", field.name.pascal_case),
                    tables,
                ),
                field
                    .default_value
                    .as_ref()
                    .map(|v| Line::code(value_text(v)))
                    .unwrap_or_default(),
            ]
        })
        .collect();

    Block::Table {
        columns: vec![
            Label::Name,
            Label::Description,
            Label::Required,
            Label::Schema,
            Label::Default,
        ],
        rows,
    }
}

/// Render queued inline tables, including those nested inside them.
pub fn inline_table_blocks(spec: &IrSpec, tables: Vec<InlineTable>) -> Vec<Block> {
    let mut pending: VecDeque<InlineTable> = tables.into();
    let mut blocks = Vec::new();
    while let Some(table) = pending.pop_front() {
        let mut nested = Vec::new();
        blocks.push(Block::paragraph(Line::new().push(strong(&table.name))));
        if let Some(parents) = inherits_block(&table.inherits) {
            blocks.push(parents);
        }
        let fields = merged_fields(spec, &table.inherits, &table.fields);
        blocks.push(properties_table(&fields, &table.name, &mut nested));
        pending.extend(nested);
    }
    blocks
}

/// `*Inherits from* : <<Parent>>, ...`, or nothing without parents.
pub fn inherits_block(parents: &[String]) -> Option<Block> {
    if parents.is_empty() {
        return None;
    }
    let links = parents
        .iter()
        .map(|parent| {
            Line::new().push(Inline::Link {
                target: LinkTarget::Definition(parent.clone()),
                text: parent.clone(),
            })
        })
        .collect();
    Some(Block::paragraph(labeled(
        Label::Inherits,
        Line::join(links, ", "),
    )))
}

/// Every field of an object schema, inherited `allOf` fields first.
///
/// A field redeclared by a child replaces the inherited one in place.
pub fn all_fields(spec: &IrSpec, schema: &IrObjectSchema) -> Vec<IrField> {
    merged_fields(spec, &schema.inherits, &schema.fields)
}

/// Fields of `parents` (recursively) followed by `fields`.
pub fn merged_fields(spec: &IrSpec, parents: &[String], fields: &[IrField]) -> Vec<IrField> {
    let mut visited = Vec::new();
    let mut out = Vec::new();
    collect_fields(spec, parents, fields, &mut visited, &mut out);
    out
}

fn collect_fields(
    spec: &IrSpec,
    parents: &[String],
    fields: &[IrField],
    visited: &mut Vec<String>,
    out: &mut Vec<IrField>,
) {
    for parent in parents {
        if visited.contains(parent) {
            continue;
        }
        visited.push(parent.clone());
        if let Some(IrSchema::Object(parent_schema)) = spec.definition(parent).map(|d| &d.schema)
        {
            collect_fields(
                spec,
                &parent_schema.inherits,
                &parent_schema.fields,
                visited,
                out,
            );
        }
    }
    for field in fields {
        match out
            .iter_mut()
            .find(|f| f.original_name == field.original_name)
        {
            Some(existing) => *existing = field.clone(),
            None => out.push(field.clone()),
        }
    }
}
