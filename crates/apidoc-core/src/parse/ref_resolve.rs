use indexmap::IndexMap;

use super::operation::{Operation, PathItem};
use super::parameter::{Parameter, ParameterOrRef};
use super::response::{Response, ResponseOrRef};
use super::schema::{AdditionalProperties, Schema, SchemaOrRef};
use super::spec::SwaggerSpec;
use crate::error::ResolveError;

/// Inlines every `#/parameters/*` and `#/responses/*` reference and checks that
/// every `#/definitions/*` reference names a declared definition.
///
/// Schema references are deliberately left in place: definitions reference
/// each other by name (possibly cyclically) and are looked up through the IR's
/// definition table rather than expanded.
pub struct RefResolver<'a> {
    spec: &'a SwaggerSpec,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a SwaggerSpec) -> Self {
        Self { spec }
    }

    /// Resolve the entire spec, returning a copy with no parameter or response refs.
    pub fn resolve_spec(&self) -> Result<SwaggerSpec, ResolveError> {
        let mut resolved = self.spec.clone();

        for (name, schema) in &resolved.definitions {
            self.check_schema_or_ref(schema, &format!("definition {name}"))?;
        }

        for (path, item) in &mut resolved.paths {
            self.resolve_path_item(path, item)?;
        }

        Ok(resolved)
    }

    fn resolve_path_item(&self, path: &str, item: &mut PathItem) -> Result<(), ResolveError> {
        let context = format!("path {path}");
        item.parameters = self.resolve_parameters(&item.parameters, &context)?;

        macro_rules! resolve_op {
            ($method:literal, $op:expr) => {
                if let Some(ref mut op) = $op {
                    let context = format!("operation {} {}", $method, path);
                    self.resolve_operation(op, &context)?;
                }
            };
        }
        resolve_op!("GET", item.get);
        resolve_op!("PUT", item.put);
        resolve_op!("POST", item.post);
        resolve_op!("DELETE", item.delete);
        resolve_op!("OPTIONS", item.options);
        resolve_op!("HEAD", item.head);
        resolve_op!("PATCH", item.patch);
        Ok(())
    }

    fn resolve_operation(&self, op: &mut Operation, context: &str) -> Result<(), ResolveError> {
        op.parameters = self.resolve_parameters(&op.parameters, context)?;

        let mut resolved_responses = IndexMap::new();
        for (status, resp) in &op.responses {
            let resp_context = format!("{context} response {status}");
            let response = self.resolve_response_or_ref(resp, &resp_context)?;
            resolved_responses.insert(status.clone(), ResponseOrRef::Response(response));
        }
        op.responses = resolved_responses;

        Ok(())
    }

    fn resolve_parameters(
        &self,
        params: &[ParameterOrRef],
        context: &str,
    ) -> Result<Vec<ParameterOrRef>, ResolveError> {
        params
            .iter()
            .map(|p| {
                let param = self.resolve_parameter_or_ref(p, context)?;
                Ok(ParameterOrRef::Parameter(param))
            })
            .collect()
    }

    fn resolve_parameter_or_ref(
        &self,
        param: &ParameterOrRef,
        context: &str,
    ) -> Result<Parameter, ResolveError> {
        let param = match param {
            ParameterOrRef::Ref { ref_path } => self.lookup_parameter(ref_path, context)?,
            ParameterOrRef::Parameter(p) => p.clone(),
        };
        let param_context = format!("{context} parameter {}", param.name);
        if let Some(ref schema) = param.schema {
            self.check_schema_or_ref(schema, &param_context)?;
        }
        if let Some(ref items) = param.items {
            self.check_schema_or_ref(items, &param_context)?;
        }
        Ok(param)
    }

    fn resolve_response_or_ref(
        &self,
        resp: &ResponseOrRef,
        context: &str,
    ) -> Result<Response, ResolveError> {
        let response = match resp {
            ResponseOrRef::Ref { ref_path } => self.lookup_response(ref_path, context)?,
            ResponseOrRef::Response(r) => r.clone(),
        };
        if let Some(ref schema) = response.schema {
            self.check_schema_or_ref(schema, context)?;
        }
        Ok(response)
    }

    /// Walk a schema tree and fail on the first reference without a target.
    pub fn check_schema_or_ref(
        &self,
        schema_or_ref: &SchemaOrRef,
        context: &str,
    ) -> Result<(), ResolveError> {
        match schema_or_ref {
            SchemaOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "definitions")?;
                if self.spec.definitions.contains_key(name) {
                    Ok(())
                } else {
                    Err(ResolveError::UnresolvedRef {
                        reference: ref_path.clone(),
                        context: context.to_string(),
                    })
                }
            }
            SchemaOrRef::Schema(schema) => self.check_schema(schema, context),
        }
    }

    fn check_schema(&self, schema: &Schema, context: &str) -> Result<(), ResolveError> {
        for (name, prop) in &schema.properties {
            self.check_schema_or_ref(prop, &format!("{context}.{name}"))?;
        }
        if let Some(ref items) = schema.items {
            self.check_schema_or_ref(items, context)?;
        }
        for part in &schema.all_of {
            self.check_schema_or_ref(part, context)?;
        }
        if let Some(AdditionalProperties::Schema(ref s)) = schema.additional_properties {
            self.check_schema_or_ref(s, context)?;
        }
        Ok(())
    }

    // Lookup helpers

    fn lookup_parameter(&self, ref_path: &str, context: &str) -> Result<Parameter, ResolveError> {
        let name = parse_ref_name(ref_path, "parameters")?;
        self.spec
            .parameters
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::UnresolvedRef {
                reference: ref_path.to_string(),
                context: context.to_string(),
            })
    }

    fn lookup_response(&self, ref_path: &str, context: &str) -> Result<Response, ResolveError> {
        let name = parse_ref_name(ref_path, "responses")?;
        self.spec
            .responses
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::UnresolvedRef {
                reference: ref_path.to_string(),
                context: context.to_string(),
            })
    }
}

/// Parse a `$ref` path like `#/definitions/Foo` and extract the name.
pub fn parse_ref_name<'a>(
    ref_path: &'a str,
    expected_section: &str,
) -> Result<&'a str, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section || name.is_empty() {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(name)
}
