use indexmap::IndexMap;

use heck::ToPascalCase;

use crate::error::ResolveError;
use crate::ir::{
    DefinitionOrigin, IrDefinition, IrObjectSchema, IrParameterLocation, IrSchema, IrSpec, IrType,
};

use super::name_normalizer::normalize_name;

/// Promote anonymous object schemas into named definitions, down to `max_depth`
/// levels below the declared definition or operation that owns them.
///
/// A promoted schema is appended to `ir.definitions` and replaced in place by
/// an `IrType::Ref`. Its name joins the owner chain in PascalCase
/// (`Pet` + `owner` = `PetOwner`, array items add `Item`, map values add
/// `Value`). Objects deeper than `max_depth` stay inline. A synthesized name
/// that is already taken is an error.
pub fn promote_inline_objects(ir: &mut IrSpec, max_depth: u32) -> Result<(), ResolveError> {
    if max_depth == 0 {
        return Ok(());
    }

    let mut promoter = Promoter {
        max_depth,
        owners: ir
            .definitions
            .iter()
            .map(|d| (d.name.original.clone(), format!("definition {}", d.name)))
            .collect(),
        promoted: Vec::new(),
    };

    // Phase 1: fields of declared definitions
    for def in &mut ir.definitions {
        let parent = def.name.original.clone();
        let context = def.name.pascal_case.clone();
        match &mut def.schema {
            IrSchema::Object(obj) => {
                for field in &mut obj.fields {
                    let field_context = format!("{}{}", context, field.name.pascal_case);
                    promoter.promote_type(&field_context, &mut field.field_type, 1, &parent)?;
                }
                if let Some(ref mut value) = obj.additional_properties {
                    let value_context = format!("{}Value", context);
                    promoter.promote_type(&value_context, value, 1, &parent)?;
                }
            }
            IrSchema::Alias(alias) => {
                promoter.promote_type(&context, &mut alias.target, 1, &parent)?;
            }
            IrSchema::Enum(_) => {}
        }
    }

    // Phase 2: bodies, parameters and responses of operations
    for op in &mut ir.operations {
        let parent = op.name.original.clone();
        let op_pascal = op.name.pascal_case.clone();

        for param in &mut op.parameters {
            let ctx = if param.location == IrParameterLocation::Body {
                format!("{}Body", op_pascal)
            } else {
                format!("{}{}", op_pascal, param.name.pascal_case)
            };
            promoter.promote_type(&ctx, &mut param.param_type, 1, &parent)?;
        }

        for response in &mut op.responses {
            if let Some(ref mut schema) = response.schema {
                let ctx = format!(
                    "{}Response{}",
                    op_pascal,
                    response.status.to_pascal_case()
                );
                promoter.promote_type(&ctx, schema, 1, &parent)?;
            }
        }
    }

    if !promoter.promoted.is_empty() {
        log::debug!(
            "promoted {} inline schemas to definitions",
            promoter.promoted.len()
        );
    }
    ir.definitions.extend(promoter.promoted);
    ir.reindex_definitions();
    Ok(())
}

struct Promoter {
    max_depth: u32,
    /// Every taken definition name, mapped to a description of its owner.
    owners: IndexMap<String, String>,
    promoted: Vec<IrDefinition>,
}

impl Promoter {
    fn promote_type(
        &mut self,
        context_name: &str,
        ir_type: &mut IrType,
        depth: u32,
        parent: &str,
    ) -> Result<(), ResolveError> {
        match ir_type {
            IrType::Object(obj) if !obj.is_empty() => {
                if depth > self.max_depth {
                    return Ok(());
                }
                let name = context_name.to_pascal_case();
                let owner = format!("inline schema of {parent}");
                if let Some(first) = self.owners.get(&name) {
                    return Err(ResolveError::NameCollision {
                        name,
                        first: first.clone(),
                        second: owner,
                    });
                }
                self.owners.insert(name.clone(), owner);

                let inherits = std::mem::take(&mut obj.inherits);
                let mut fields = std::mem::take(&mut obj.fields);
                for field in &mut fields {
                    let field_ctx = format!("{}{}", name, field.name.pascal_case);
                    self.promote_type(&field_ctx, &mut field.field_type, depth + 1, parent)?;
                }

                self.promoted.push(IrDefinition {
                    name: normalize_name(&name),
                    origin: DefinitionOrigin::Synthesized {
                        parent: parent.to_string(),
                        depth,
                    },
                    description: None,
                    schema: IrSchema::Object(IrObjectSchema {
                        inherits,
                        fields,
                        ..IrObjectSchema::default()
                    }),
                    xml: None,
                    example: None,
                });

                *ir_type = IrType::Ref(name);
                Ok(())
            }
            IrType::Array(inner) => {
                let item_ctx = format!("{}Item", context_name);
                self.promote_type(&item_ctx, inner, depth, parent)
            }
            IrType::Map(inner) => {
                let value_ctx = format!("{}Value", context_name);
                self.promote_type(&value_ctx, inner, depth, parent)
            }
            _ => Ok(()),
        }
    }
}
