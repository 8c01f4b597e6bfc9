//! Example values generated from schemas.

use apidoc_core::ir::{IrDefinition, IrField, IrSchema, IrSpec, IrType, PrimitiveType};
use serde_json::{Map, Value, json};

use crate::builders::common::{all_fields, merged_fields};

/// A placeholder value shaped like `ir_type`.
pub fn example_for_type(spec: &IrSpec, ir_type: &IrType) -> Value {
    Generator {
        spec,
        visiting: Vec::new(),
    }
    .for_type(ir_type)
}

/// The declared example of a definition, or a generated one.
pub fn example_for_definition(spec: &IrSpec, definition: &IrDefinition) -> Value {
    if let Some(ref example) = definition.example {
        return example.clone();
    }
    let mut generator = Generator {
        spec,
        visiting: vec![definition.name.original.clone()],
    };
    generator.for_schema(&definition.schema)
}

struct Generator<'a> {
    spec: &'a IrSpec,
    /// Definitions on the current path, to cut off recursive schemas.
    visiting: Vec<String>,
}

impl Generator<'_> {
    fn for_type(&mut self, ir_type: &IrType) -> Value {
        match ir_type {
            IrType::Primitive { primitive, format } => primitive_example(*primitive, format.as_deref()),
            IrType::Enum(variants) => variants
                .first()
                .map(|v| Value::String(v.clone()))
                .unwrap_or_else(|| json!("string")),
            IrType::Array(inner) => Value::Array(vec![self.for_type(inner)]),
            IrType::Map(inner) => json!({ "string": self.for_type(inner) }),
            IrType::Object(obj) => {
                let fields = merged_fields(self.spec, &obj.inherits, &obj.fields);
                self.for_fields(&fields)
            }
            IrType::Ref(name) => self.for_ref(name),
            IrType::File => json!("file"),
            IrType::Any => json!({}),
        }
    }

    fn for_ref(&mut self, name: &str) -> Value {
        let Some(definition) = self.spec.definition(name) else {
            return json!({});
        };
        if let Some(ref example) = definition.example {
            return example.clone();
        }
        if self.visiting.iter().any(|v| v == name) {
            return json!({});
        }
        self.visiting.push(name.to_string());
        let value = self.for_schema(&definition.schema);
        self.visiting.pop();
        value
    }

    fn for_schema(&mut self, schema: &IrSchema) -> Value {
        match schema {
            IrSchema::Object(obj) => {
                let fields = all_fields(self.spec, obj);
                let mut value = self.for_fields(&fields);
                if fields.is_empty() {
                    if let Some(ref additional) = obj.additional_properties {
                        value = json!({ "string": self.for_type(additional) });
                    }
                }
                value
            }
            IrSchema::Enum(e) => e
                .variants
                .first()
                .map(|v| Value::String(v.clone()))
                .unwrap_or_else(|| self.for_type(&e.base)),
            IrSchema::Alias(alias) => self.for_type(&alias.target),
        }
    }

    fn for_fields(&mut self, fields: &[IrField]) -> Value {
        let mut map = Map::new();
        for field in fields {
            let value = match (&field.example, &field.default_value) {
                (Some(example), _) => example.clone(),
                (None, Some(default)) => default.clone(),
                (None, None) => self.for_type(&field.field_type),
            };
            map.insert(field.original_name.clone(), value);
        }
        Value::Object(map)
    }
}

fn primitive_example(primitive: PrimitiveType, format: Option<&str>) -> Value {
    match (primitive, format) {
        (PrimitiveType::String, Some("date")) => json!("1970-01-01"),
        (PrimitiveType::String, Some("date-time")) => json!("1970-01-01T00:00:00Z"),
        (PrimitiveType::String, _) => json!("string"),
        (PrimitiveType::Integer, _) => json!(0),
        (PrimitiveType::Number, _) => json!(0.0),
        (PrimitiveType::Boolean, _) => json!(true),
    }
}

#[cfg(test)]
mod tests {
    use apidoc_core::parse;
    use apidoc_core::transform::transform;

    use super::*;

    const SPEC: &str = r##"
swagger: "2.0"
info: { title: Nodes, version: "1" }
paths: {}
definitions:
  Node:
    type: object
    properties:
      id: { type: integer, format: int64 }
      label: { type: string, example: root }
      created: { type: string, format: date-time }
      children:
        type: array
        items: { $ref: "#/definitions/Node" }
"##;

    #[test]
    fn test_recursive_definition_terminates() {
        let ir = transform(&parse::from_yaml(SPEC).expect("should parse")).expect("should transform");
        let node = ir.definition("Node").expect("should have Node");
        let example = example_for_definition(&ir, node);
        assert_eq!(
            example,
            json!({
                "id": 0,
                "label": "root",
                "created": "1970-01-01T00:00:00Z",
                "children": [{}]
            })
        );
    }

    #[test]
    fn test_map_and_enum() {
        let ir = transform(&parse::from_yaml(SPEC).expect("should parse")).expect("should transform");
        let map = IrType::Map(Box::new(IrType::Enum(vec!["a".into(), "b".into()])));
        assert_eq!(example_for_type(&ir, &map), json!({ "string": "a" }));
    }
}
