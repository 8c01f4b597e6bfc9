use std::fmt;

use indexmap::IndexMap;

use super::schemas::IrType;
use super::types::NormalizedName;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved API operation, unique by `(path, method)`.
#[derive(Debug, Clone)]
pub struct IrOperation {
    pub name: NormalizedName,
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<IrParameter>,
    pub responses: Vec<IrResponse>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub security: Vec<IrSecurityRequirement>,
    pub deprecated: bool,
}

impl IrOperation {
    /// Display title: the summary when present, otherwise `METHOD path`.
    pub fn title(&self) -> String {
        match self.summary {
            Some(ref summary) if !summary.trim().is_empty() => summary.clone(),
            _ => self.key(),
        }
    }

    /// The `METHOD path` key.
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    pub fn body_parameter(&self) -> Option<&IrParameter> {
        self.parameters
            .iter()
            .find(|p| p.location == IrParameterLocation::Body)
    }
}

/// A resolved response.
#[derive(Debug, Clone)]
pub struct IrResponse {
    /// Status code or `default`.
    pub status: String,
    pub description: String,
    pub schema: Option<IrType>,
    pub headers: Vec<IrHeader>,
    /// Explicit examples keyed by mime type.
    pub examples: IndexMap<String, serde_json::Value>,
}

/// A response header.
#[derive(Debug, Clone)]
pub struct IrHeader {
    pub name: String,
    pub header_type: IrType,
    pub description: Option<String>,
}

/// A resolved parameter.
#[derive(Debug, Clone)]
pub struct IrParameter {
    pub name: NormalizedName,
    pub original_name: String,
    pub location: IrParameterLocation,
    pub param_type: IrType,
    pub required: bool,
    pub description: Option<String>,
    pub default_value: Option<serde_json::Value>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrParameterLocation {
    Path,
    Query,
    Header,
    FormData,
    Body,
}

impl IrParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrParameterLocation::Path => "path",
            IrParameterLocation::Query => "query",
            IrParameterLocation::Header => "header",
            IrParameterLocation::FormData => "formData",
            IrParameterLocation::Body => "body",
        }
    }
}

/// A security requirement of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrSecurityRequirement {
    pub scheme: String,
    pub scopes: Vec<String>,
}
