use std::collections::HashMap;

use indexmap::IndexMap;

use crate::config::NamingStrategy;
use crate::error::{ResolveError, TransformError};
use crate::ir::*;
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::response::{Header, ResponseOrRef};
use crate::parse::schema::{SchemaOrRef, SchemaType};
use crate::parse::security::{ApiKeyLocation, OAuthFlow, SecurityScheme, SecuritySchemeType};
use crate::parse::spec::SwaggerSpec;

use super::name_normalizer::{normalize_name, route_to_name};
use super::promote_inline::promote_inline_objects;
use super::schema_resolver::{definition_to_ir, schema_or_ref_to_ir_type};

/// Options controlling how the transform phase names operations and how deep
/// inline schemas are promoted.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    pub naming_strategy: NamingStrategy,
    pub aliases: IndexMap<String, String>,
    pub inline_schema_depth: u32,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            naming_strategy: NamingStrategy::UseOperationId,
            aliases: IndexMap::new(),
            inline_schema_depth: 10,
        }
    }
}

/// Transform a parsed Swagger spec into the fully resolved IR.
pub fn transform(spec: &SwaggerSpec) -> Result<IrSpec, TransformError> {
    transform_with_options(spec, &TransformOptions::default())
}

/// Transform with explicit naming and promotion options.
pub fn transform_with_options(
    spec: &SwaggerSpec,
    options: &TransformOptions,
) -> Result<IrSpec, TransformError> {
    // Phase 1: Inline parameter/response refs and validate definition refs
    let resolver = RefResolver::new(spec);
    let resolved = resolver.resolve_spec()?;

    // Phase 2: Declared definitions
    let definitions = resolved
        .definitions
        .iter()
        .map(|(name, schema)| definition_to_ir(name, schema))
        .collect::<Result<Vec<_>, _>>()?;

    // Phase 3: Security schemes, then operations that reference them
    let security_schemes = resolved
        .security_definitions
        .iter()
        .map(|(name, scheme)| resolve_security_scheme(name, scheme))
        .collect();

    let operations = resolve_operations(&resolved, options)?;

    // Phase 4: Metadata
    let info = IrInfo {
        title: resolved.info.title.clone(),
        description: resolved.info.description.clone(),
        version: resolved.info.version.clone(),
        terms_of_service: resolved.info.terms_of_service.clone(),
        contact: resolved.info.contact.as_ref().map(|c| IrContact {
            name: c.name.clone(),
            url: c.url.clone(),
            email: c.email.clone(),
        }),
        license: resolved.info.license.as_ref().map(|l| IrLicense {
            name: l.name.clone(),
            url: l.url.clone(),
        }),
    };

    let uri_scheme = IrUriScheme {
        host: resolved.host.clone(),
        base_path: resolved.base_path.clone(),
        schemes: resolved.schemes.clone(),
    };

    let tags = resolved
        .tags
        .iter()
        .map(|t| IrTag {
            name: t.name.clone(),
            description: t.description.clone(),
        })
        .collect();

    let mut ir = IrSpec {
        info,
        uri_scheme,
        consumes: resolved.consumes.clone(),
        produces: resolved.produces.clone(),
        tags,
        definitions,
        definition_index: IndexMap::new(),
        operations,
        security_schemes,
    };
    ir.reindex_definitions();

    // Phase 5: Promote inline objects to named definitions
    promote_inline_objects(&mut ir, options.inline_schema_depth)?;

    log::debug!(
        "resolved {} definitions and {} operations",
        ir.definitions.len(),
        ir.operations.len()
    );
    Ok(ir)
}

fn resolve_security_scheme(name: &str, scheme: &SecurityScheme) -> IrSecurityScheme {
    let kind = match scheme.scheme_type {
        SecuritySchemeType::Basic => IrSecurityKind::Basic,
        SecuritySchemeType::ApiKey => IrSecurityKind::ApiKey {
            name: scheme.name.clone().unwrap_or_default(),
            location: match scheme.location {
                Some(ApiKeyLocation::Query) => "query".to_string(),
                Some(ApiKeyLocation::Header) | None => "header".to_string(),
            },
        },
        SecuritySchemeType::OAuth2 => IrSecurityKind::OAuth2 {
            flow: match scheme.flow {
                Some(OAuthFlow::Implicit) | None => "implicit",
                Some(OAuthFlow::Password) => "password",
                Some(OAuthFlow::Application) => "application",
                Some(OAuthFlow::AccessCode) => "accessCode",
            }
            .to_string(),
            authorization_url: scheme.authorization_url.clone(),
            token_url: scheme.token_url.clone(),
            scopes: scheme.scopes.clone(),
        },
    };
    IrSecurityScheme {
        name: name.to_string(),
        description: scheme.description.clone(),
        kind,
    }
}

fn resolve_operations(
    spec: &SwaggerSpec,
    options: &TransformOptions,
) -> Result<Vec<IrOperation>, TransformError> {
    let mut operations = Vec::new();

    for (path, path_item) in &spec.paths {
        collect_operations(spec, path, path_item, options, &mut operations)?;
    }

    // Canonical names must be unique across the whole spec.
    let mut seen: HashMap<&str, String> = HashMap::new();
    for op in &operations {
        if let Some(first) = seen.insert(op.name.original.as_str(), op.key()) {
            return Err(ResolveError::DuplicateOperation {
                name: op.name.original.clone(),
                first,
                second: op.key(),
            }
            .into());
        }
    }

    Ok(operations)
}

fn collect_operations(
    spec: &SwaggerSpec,
    path: &str,
    item: &PathItem,
    options: &TransformOptions,
    out: &mut Vec<IrOperation>,
) -> Result<(), TransformError> {
    macro_rules! add_op {
        ($method:expr, $op:expr) => {
            if let Some(ref op) = $op {
                let ir_op = build_operation(spec, $method, path, op, &item.parameters, options)?;
                out.push(ir_op);
            }
        };
    }

    add_op!(HttpMethod::Get, item.get);
    add_op!(HttpMethod::Put, item.put);
    add_op!(HttpMethod::Post, item.post);
    add_op!(HttpMethod::Delete, item.delete);
    add_op!(HttpMethod::Options, item.options);
    add_op!(HttpMethod::Head, item.head);
    add_op!(HttpMethod::Patch, item.patch);

    Ok(())
}

fn build_operation(
    spec: &SwaggerSpec,
    method: HttpMethod,
    path: &str,
    op: &Operation,
    path_params: &[ParameterOrRef],
    options: &TransformOptions,
) -> Result<IrOperation, TransformError> {
    let raw_name = match options.naming_strategy {
        NamingStrategy::UseOperationId => op
            .operation_id
            .clone()
            .unwrap_or_else(|| route_to_name(method, path)),
        NamingStrategy::UseRouteBased => route_to_name(method, path),
    };

    let name = options.aliases.get(&raw_name).cloned().unwrap_or(raw_name);

    let parameters = merge_parameters(path_params, &op.parameters)
        .into_iter()
        .map(resolve_parameter)
        .collect::<Result<Vec<_>, _>>()?;

    let responses = op
        .responses
        .iter()
        .filter_map(|(status, r)| match r {
            ResponseOrRef::Response(response) => Some((status, response)),
            ResponseOrRef::Ref { .. } => None, // Already inlined by the resolver
        })
        .map(|(status, response)| -> Result<IrResponse, ResolveError> {
            Ok(IrResponse {
                status: status.clone(),
                description: response.description.clone(),
                schema: response
                    .schema
                    .as_ref()
                    .map(schema_or_ref_to_ir_type)
                    .transpose()?,
                headers: response
                    .headers
                    .iter()
                    .map(|(name, header)| resolve_header(name, header))
                    .collect::<Result<Vec<_>, ResolveError>>()?,
                examples: response.examples.clone(),
            })
        })
        .collect::<Result<Vec<_>, ResolveError>>()?;

    let key = format!("{} {}", method, path);
    let requirements = op.security.as_ref().or(spec.security.as_ref());
    let mut security = Vec::new();
    for requirement in requirements.into_iter().flatten() {
        for (scheme, scopes) in requirement {
            if !spec.security_definitions.contains_key(scheme) {
                return Err(ResolveError::UnknownSecurityScheme {
                    scheme: scheme.clone(),
                    operation: key,
                }
                .into());
            }
            security.push(IrSecurityRequirement {
                scheme: scheme.clone(),
                scopes: scopes.clone(),
            });
        }
    }

    Ok(IrOperation {
        name: normalize_name(&name),
        method,
        path: path.to_string(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        tags: op.tags.clone(),
        parameters,
        responses,
        consumes: inherit(&op.consumes, &spec.consumes),
        produces: inherit(&op.produces, &spec.produces),
        security,
        deprecated: op.deprecated.unwrap_or(false),
    })
}

fn inherit(own: &[String], global: &[String]) -> Vec<String> {
    if own.is_empty() {
        global.to_vec()
    } else {
        own.to_vec()
    }
}

/// Path-level parameters first, replaced by an operation-level parameter with
/// the same name and location.
fn merge_parameters<'a>(
    path_params: &'a [ParameterOrRef],
    op_params: &'a [ParameterOrRef],
) -> Vec<&'a Parameter> {
    let op_params: Vec<&Parameter> = op_params.iter().filter_map(as_parameter).collect();
    let mut merged: Vec<&Parameter> = path_params
        .iter()
        .filter_map(as_parameter)
        .map(|p| {
            op_params
                .iter()
                .find(|o| o.name == p.name && o.location == p.location)
                .copied()
                .unwrap_or(p)
        })
        .collect();
    for param in op_params {
        if !merged.iter().any(|m| std::ptr::eq(*m, param)) {
            merged.push(param);
        }
    }
    merged
}

fn as_parameter(p: &ParameterOrRef) -> Option<&Parameter> {
    match p {
        ParameterOrRef::Parameter(param) => Some(param),
        ParameterOrRef::Ref { .. } => None, // Already inlined by the resolver
    }
}

fn resolve_parameter(param: &Parameter) -> Result<IrParameter, ResolveError> {
    let location = match param.location {
        ParameterLocation::Path => IrParameterLocation::Path,
        ParameterLocation::Query => IrParameterLocation::Query,
        ParameterLocation::Header => IrParameterLocation::Header,
        ParameterLocation::FormData => IrParameterLocation::FormData,
        ParameterLocation::Body => IrParameterLocation::Body,
    };

    let param_type = match (&param.location, &param.schema) {
        (ParameterLocation::Body, Some(schema)) => schema_or_ref_to_ir_type(schema)?,
        (ParameterLocation::Body, None) => IrType::Any,
        _ => simple_type(
            param.param_type.as_ref(),
            param.format.as_deref(),
            param.items.as_deref(),
            &param.enum_values,
        )?,
    };

    Ok(IrParameter {
        name: normalize_name(&param.name),
        original_name: param.name.clone(),
        location,
        param_type,
        // Path parameters are always required.
        required: param.required || param.location == ParameterLocation::Path,
        description: param.description.clone(),
        default_value: param.default_value.clone(),
    })
}

fn resolve_header(name: &str, header: &Header) -> Result<IrHeader, ResolveError> {
    Ok(IrHeader {
        name: name.to_string(),
        header_type: simple_type(
            Some(&header.header_type),
            header.format.as_deref(),
            header.items.as_deref(),
            &[],
        )?,
        description: header.description.clone(),
    })
}

/// Type of a non-body parameter or header, described by `type`/`format`/`items`.
fn simple_type(
    schema_type: Option<&SchemaType>,
    format: Option<&str>,
    items: Option<&SchemaOrRef>,
    enum_values: &[serde_json::Value],
) -> Result<IrType, ResolveError> {
    if !enum_values.is_empty() {
        return Ok(IrType::Enum(
            enum_values
                .iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ));
    }
    let primitive = |p| IrType::Primitive {
        primitive: p,
        format: format.map(str::to_string),
    };
    Ok(match schema_type {
        Some(SchemaType::String) => primitive(PrimitiveType::String),
        Some(SchemaType::Integer) => primitive(PrimitiveType::Integer),
        Some(SchemaType::Number) => primitive(PrimitiveType::Number),
        Some(SchemaType::Boolean) => primitive(PrimitiveType::Boolean),
        Some(SchemaType::File) => IrType::File,
        Some(SchemaType::Array) => {
            let item = match items {
                Some(items) => schema_or_ref_to_ir_type(items)?,
                None => IrType::Any,
            };
            IrType::Array(Box::new(item))
        }
        Some(SchemaType::Object) | Some(SchemaType::Null) | None => IrType::Any,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const SPEC: &str = r#"
swagger: "2.0"
info:
  title: Pets
  version: "1.0"
securityDefinitions:
  api_key:
    type: apiKey
    name: api_key
    in: header
paths:
  /pets/{petId}:
    parameters:
      - name: petId
        in: path
        type: integer
        description: path level
    get:
      operationId: getPetById
      parameters:
        - name: petId
          in: path
          type: integer
          format: int64
          description: operation level
        - name: verbose
          in: query
          type: boolean
      responses:
        "200":
          description: ok
      security:
        - api_key: []
"#;

    #[test]
    fn test_operation_parameters_override_path_parameters() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let ir = transform(&spec).unwrap();
        let op = &ir.operations[0];
        assert_eq!(op.parameters.len(), 2);
        assert_eq!(op.parameters[0].description.as_deref(), Some("operation level"));
        assert!(op.parameters[0].required);
        assert_eq!(op.parameters[1].original_name, "verbose");
    }

    #[test]
    fn test_alias_replaces_operation_name() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let mut aliases = IndexMap::new();
        aliases.insert("getPetById".to_string(), "fetchPet".to_string());
        let options = TransformOptions {
            aliases,
            ..TransformOptions::default()
        };
        let ir = transform_with_options(&spec, &options).unwrap();
        assert_eq!(ir.operations[0].name.original, "fetchPet");
    }

    #[test]
    fn test_unknown_security_scheme() {
        let yaml = SPEC.replace("- api_key: []", "- petstore_auth: []");
        let spec = parse::from_yaml(&yaml).unwrap();
        match transform(&spec) {
            Err(TransformError::Resolve(ResolveError::UnknownSecurityScheme {
                scheme,
                operation,
            })) => {
                assert_eq!(scheme, "petstore_auth");
                assert_eq!(operation, "GET /pets/{petId}");
            }
            other => panic!("expected UnknownSecurityScheme, got {other:?}"),
        }
    }
}
