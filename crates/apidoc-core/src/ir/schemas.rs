use super::types::NormalizedName;

/// A named, reusable schema.
#[derive(Debug, Clone)]
pub struct IrDefinition {
    pub name: NormalizedName,
    pub origin: DefinitionOrigin,
    pub description: Option<String>,
    pub schema: IrSchema,
    pub xml: Option<IrXml>,
    pub example: Option<serde_json::Value>,
}

/// Whether a definition was declared in the Swagger document or promoted from an inline schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionOrigin {
    Declared,
    /// Promoted from an anonymous schema; `parent` names the owning definition
    /// or operation and `depth` is the distance from it.
    Synthesized { parent: String, depth: u32 },
}

/// The structural body of a definition.
#[derive(Debug, Clone)]
pub enum IrSchema {
    Object(IrObjectSchema),
    Enum(IrEnumSchema),
    Alias(IrAliasSchema),
}

/// An object schema with typed fields.
#[derive(Debug, Clone, Default)]
pub struct IrObjectSchema {
    /// Definitions merged in through `allOf`, in declaration order.
    pub inherits: Vec<String>,
    pub fields: Vec<IrField>,
    pub additional_properties: Option<IrType>,
    pub discriminator: Option<String>,
}

/// A field on an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct IrField {
    pub name: NormalizedName,
    pub original_name: String,
    pub field_type: IrType,
    pub required: bool,
    pub description: Option<String>,
    pub read_only: bool,
    pub default_value: Option<serde_json::Value>,
    pub example: Option<serde_json::Value>,
}

/// An enum schema.
#[derive(Debug, Clone)]
pub struct IrEnumSchema {
    pub base: IrType,
    pub variants: Vec<String>,
}

/// A type alias (e.g. a named array of `Pet`).
#[derive(Debug, Clone)]
pub struct IrAliasSchema {
    pub target: IrType,
}

/// XML serialization metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrXml {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub attribute: bool,
    pub wrapped: bool,
}

/// Primitive JSON types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    String,
    Integer,
    Number,
    Boolean,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Number => "number",
            PrimitiveType::Boolean => "boolean",
        }
    }
}

/// An anonymous object that stayed inline (beyond the promotion depth).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IrInlineObject {
    /// Definitions referenced by an inline `allOf`, in declaration order.
    pub inherits: Vec<String>,
    pub fields: Vec<IrField>,
}

impl IrInlineObject {
    pub fn is_empty(&self) -> bool {
        self.inherits.is_empty() && self.fields.is_empty()
    }
}

/// A resolved type reference.
#[derive(Debug, Clone, PartialEq)]
pub enum IrType {
    Primitive {
        primitive: PrimitiveType,
        format: Option<String>,
    },
    Enum(Vec<String>),
    Array(Box<IrType>),
    Map(Box<IrType>),
    Object(IrInlineObject),
    /// Reference to a definition by canonical name.
    Ref(String),
    File,
    Any,
}

impl IrType {
    pub fn primitive(primitive: PrimitiveType) -> Self {
        IrType::Primitive {
            primitive,
            format: None,
        }
    }

    /// Every definition name referenced anywhere inside this type.
    pub fn refs(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_refs(self, &mut out);
        out
    }
}

fn collect_refs<'a>(ir_type: &'a IrType, out: &mut Vec<&'a str>) {
    match ir_type {
        IrType::Ref(name) => out.push(name),
        IrType::Array(inner) | IrType::Map(inner) => collect_refs(inner, out),
        IrType::Object(obj) => {
            out.extend(obj.inherits.iter().map(String::as_str));
            for field in &obj.fields {
                collect_refs(&field.field_type, out);
            }
        }
        _ => {}
    }
}
