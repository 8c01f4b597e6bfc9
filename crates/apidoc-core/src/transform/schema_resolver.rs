use crate::error::ResolveError;
use crate::ir::{
    DefinitionOrigin, IrAliasSchema, IrDefinition, IrEnumSchema, IrField, IrInlineObject,
    IrObjectSchema, IrSchema, IrType, IrXml, PrimitiveType,
};
use crate::parse::ref_resolve::parse_ref_name;
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType, Xml};

use super::name_normalizer::normalize_name;

/// Convert a parsed `SchemaOrRef` to an `IrType`.
pub fn schema_or_ref_to_ir_type(schema_or_ref: &SchemaOrRef) -> Result<IrType, ResolveError> {
    match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => {
            let name = parse_ref_name(ref_path, "definitions")?;
            Ok(IrType::Ref(name.to_string()))
        }
        SchemaOrRef::Schema(schema) => schema_to_ir_type(schema),
    }
}

/// Convert a parsed `Schema` to an `IrType`.
pub fn schema_to_ir_type(schema: &Schema) -> Result<IrType, ResolveError> {
    if !schema.all_of.is_empty() {
        return all_of_to_ir_type(schema);
    }

    if !schema.enum_values.is_empty() {
        return Ok(IrType::Enum(enum_variants(&schema.enum_values)));
    }

    match schema.schema_type {
        Some(SchemaType::String) => Ok(primitive(PrimitiveType::String, schema)),
        Some(SchemaType::Integer) => Ok(primitive(PrimitiveType::Integer, schema)),
        Some(SchemaType::Number) => Ok(primitive(PrimitiveType::Number, schema)),
        Some(SchemaType::Boolean) => Ok(primitive(PrimitiveType::Boolean, schema)),
        Some(SchemaType::File) => Ok(IrType::File),
        Some(SchemaType::Null) => Ok(IrType::Any),
        Some(SchemaType::Array) => {
            let item = match schema.items {
                Some(ref items) => schema_or_ref_to_ir_type(items)?,
                None => IrType::Any,
            };
            Ok(IrType::Array(Box::new(item)))
        }
        Some(SchemaType::Object) | None => object_to_ir_type(schema),
    }
}

fn primitive(primitive: PrimitiveType, schema: &Schema) -> IrType {
    IrType::Primitive {
        primitive,
        format: schema.format.clone(),
    }
}

fn object_to_ir_type(schema: &Schema) -> Result<IrType, ResolveError> {
    if !schema.properties.is_empty() {
        return Ok(IrType::Object(IrInlineObject {
            inherits: Vec::new(),
            fields: object_fields(schema)?,
        }));
    }
    if let Some(value) = additional_properties_type(schema)? {
        return Ok(IrType::Map(Box::new(value)));
    }
    Ok(IrType::Any)
}

/// An inline `allOf`: a lone reference stays a reference, anything else
/// becomes an inline object that inherits the referenced definitions.
fn all_of_to_ir_type(schema: &Schema) -> Result<IrType, ResolveError> {
    if schema.all_of.len() == 1 && schema.properties.is_empty() {
        return schema_or_ref_to_ir_type(&schema.all_of[0]);
    }
    let mut inherits = Vec::new();
    let mut fields = Vec::new();
    for part in &schema.all_of {
        match part {
            SchemaOrRef::Schema(inner) => fields.extend(object_fields(inner)?),
            SchemaOrRef::Ref { ref_path } => {
                inherits.push(parse_ref_name(ref_path, "definitions")?.to_string());
            }
        }
    }
    fields.extend(object_fields(schema)?);
    if fields.is_empty() && inherits.len() == 1 {
        return Ok(IrType::Ref(inherits.remove(0)));
    }
    let object = IrInlineObject { inherits, fields };
    if object.is_empty() {
        return Ok(IrType::Any);
    }
    Ok(IrType::Object(object))
}

/// Convert the `properties` of an object schema to fields.
pub fn object_fields(schema: &Schema) -> Result<Vec<IrField>, ResolveError> {
    schema
        .properties
        .iter()
        .map(|(name, prop)| {
            let (description, read_only, default_value, example) = match prop {
                SchemaOrRef::Schema(s) => (
                    s.description.clone(),
                    s.read_only.unwrap_or(false),
                    s.default_value.clone(),
                    s.example.clone(),
                ),
                SchemaOrRef::Ref { .. } => (None, false, None, None),
            };
            Ok(IrField {
                name: normalize_name(name),
                original_name: name.clone(),
                field_type: schema_or_ref_to_ir_type(prop)?,
                required: schema.required.contains(name),
                description,
                read_only,
                default_value,
                example,
            })
        })
        .collect()
}

fn additional_properties_type(schema: &Schema) -> Result<Option<IrType>, ResolveError> {
    match schema.additional_properties {
        Some(AdditionalProperties::Schema(ref value)) => {
            Ok(Some(schema_or_ref_to_ir_type(value)?))
        }
        Some(AdditionalProperties::Bool(true)) => Ok(Some(IrType::Any)),
        Some(AdditionalProperties::Bool(false)) | None => Ok(None),
    }
}

fn enum_variants(values: &[serde_json::Value]) -> Vec<String> {
    values
        .iter()
        .map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

/// Convert a declared definition to an `IrDefinition`.
pub fn definition_to_ir(
    name: &str,
    schema_or_ref: &SchemaOrRef,
) -> Result<IrDefinition, ResolveError> {
    let schema = match schema_or_ref {
        SchemaOrRef::Ref { .. } => {
            return Ok(IrDefinition {
                name: normalize_name(name),
                origin: DefinitionOrigin::Declared,
                description: None,
                schema: IrSchema::Alias(IrAliasSchema {
                    target: schema_or_ref_to_ir_type(schema_or_ref)?,
                }),
                xml: None,
                example: None,
            });
        }
        SchemaOrRef::Schema(schema) => schema,
    };

    let ir_schema = if !schema.enum_values.is_empty() {
        let base = match schema.schema_type {
            Some(SchemaType::Integer) => IrType::primitive(PrimitiveType::Integer),
            Some(SchemaType::Number) => IrType::primitive(PrimitiveType::Number),
            _ => IrType::primitive(PrimitiveType::String),
        };
        IrSchema::Enum(IrEnumSchema {
            base,
            variants: enum_variants(&schema.enum_values),
        })
    } else if !schema.all_of.is_empty() {
        composed_object(schema)?
    } else if is_object(schema) {
        IrSchema::Object(IrObjectSchema {
            inherits: Vec::new(),
            fields: object_fields(schema)?,
            additional_properties: additional_properties_type(schema)?,
            discriminator: schema.discriminator.clone(),
        })
    } else {
        IrSchema::Alias(IrAliasSchema {
            target: schema_to_ir_type(schema)?,
        })
    };

    Ok(IrDefinition {
        name: normalize_name(name),
        origin: DefinitionOrigin::Declared,
        description: schema.description.clone().or_else(|| schema.title.clone()),
        schema: ir_schema,
        xml: schema.xml.as_ref().map(xml_to_ir),
        example: schema.example.clone(),
    })
}

fn is_object(schema: &Schema) -> bool {
    match schema.schema_type {
        Some(SchemaType::Object) => true,
        None => !schema.properties.is_empty() || schema.additional_properties.is_some(),
        _ => false,
    }
}

/// `allOf` on a declared definition: referenced parts are inherited, inline
/// parts contribute their own properties.
fn composed_object(schema: &Schema) -> Result<IrSchema, ResolveError> {
    let mut inherits = Vec::new();
    let mut fields = Vec::new();
    let mut discriminator = schema.discriminator.clone();

    for part in &schema.all_of {
        match part {
            SchemaOrRef::Ref { ref_path } => {
                inherits.push(parse_ref_name(ref_path, "definitions")?.to_string());
            }
            SchemaOrRef::Schema(inner) => {
                fields.extend(object_fields(inner)?);
                if discriminator.is_none() {
                    discriminator = inner.discriminator.clone();
                }
            }
        }
    }
    fields.extend(object_fields(schema)?);

    Ok(IrSchema::Object(IrObjectSchema {
        inherits,
        fields,
        additional_properties: additional_properties_type(schema)?,
        discriminator,
    }))
}

fn xml_to_ir(xml: &Xml) -> IrXml {
    IrXml {
        name: xml.name.clone(),
        namespace: xml.namespace.clone(),
        prefix: xml.prefix.clone(),
        attribute: xml.attribute,
        wrapped: xml.wrapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_schema(yaml: &str) -> SchemaOrRef {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_ref_keeps_definition_name() {
        let schema = parse_schema("$ref: '#/definitions/Pet'");
        assert_eq!(
            schema_or_ref_to_ir_type(&schema).unwrap(),
            IrType::Ref("Pet".to_string())
        );
    }

    #[test]
    fn test_array_of_refs() {
        let schema = parse_schema("type: array\nitems:\n  $ref: '#/definitions/Tag'");
        assert_eq!(
            schema_or_ref_to_ir_type(&schema).unwrap(),
            IrType::Array(Box::new(IrType::Ref("Tag".to_string())))
        );
    }

    #[test]
    fn test_map_of_integers() {
        let schema = parse_schema(
            "type: object\nadditionalProperties:\n  type: integer\n  format: int32",
        );
        match schema_or_ref_to_ir_type(&schema).unwrap() {
            IrType::Map(inner) => assert_eq!(
                *inner,
                IrType::Primitive {
                    primitive: PrimitiveType::Integer,
                    format: Some("int32".to_string()),
                }
            ),
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn test_definition_with_all_of_inherits() {
        let schema = parse_schema(
            r#"
allOf:
  - $ref: '#/definitions/Pet'
  - type: object
    required: [packSize]
    properties:
      packSize:
        type: integer
"#,
        );
        let def = definition_to_ir("Dog", &schema).unwrap();
        match def.schema {
            IrSchema::Object(obj) => {
                assert_eq!(obj.inherits, vec!["Pet".to_string()]);
                assert_eq!(obj.fields.len(), 1);
                assert!(obj.fields[0].required);
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_inline_all_of_keeps_parent() {
        let schema = parse_schema(
            r##"
allOf:
  - $ref: '#/definitions/Base'
  - type: object
    properties:
      extra:
        type: string
"##,
        );
        match schema_or_ref_to_ir_type(&schema).unwrap() {
            IrType::Object(obj) => {
                assert_eq!(obj.inherits, vec!["Base".to_string()]);
                assert_eq!(obj.fields.len(), 1);
                assert_eq!(obj.fields[0].original_name, "extra");
            }
            other => panic!("expected inline object, got {other:?}"),
        }
    }

    #[test]
    fn test_string_enum_definition() {
        let schema = parse_schema("type: string\nenum: [placed, approved, delivered]");
        let def = definition_to_ir("Status", &schema).unwrap();
        match def.schema {
            IrSchema::Enum(e) => assert_eq!(e.variants, vec!["placed", "approved", "delivered"]),
            other => panic!("expected enum, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_ref_is_rejected() {
        let schema = parse_schema("$ref: 'other.yaml#/Pet'");
        assert!(matches!(
            schema_or_ref_to_ir_type(&schema),
            Err(ResolveError::InvalidRefFormat(_))
        ));
    }
}
