pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod response;
pub mod schema;
pub mod security;
pub mod spec;

use std::fs;
use std::path::Path;

use crate::error::ParseError;
use spec::SwaggerSpec;

/// Parse a Swagger 2.0 spec from YAML.
pub fn from_yaml(input: &str) -> Result<SwaggerSpec, ParseError> {
    let spec: SwaggerSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse a Swagger 2.0 spec from JSON.
pub fn from_json(input: &str) -> Result<SwaggerSpec, ParseError> {
    let spec: SwaggerSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse a spec held in memory, sniffing JSON by its leading brace.
pub fn from_str(input: &str) -> Result<SwaggerSpec, ParseError> {
    if input.trim_start().starts_with('{') {
        from_json(input)
    } else {
        from_yaml(input)
    }
}

/// Read and parse a spec file. `.json` files are parsed as JSON, anything
/// else goes through content sniffing.
pub fn from_path(path: &Path) -> Result<SwaggerSpec, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("parsing {}", path.display());
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => from_json(&content),
        _ => from_str(&content),
    }
}

fn validate_version(spec: &SwaggerSpec) -> Result<(), ParseError> {
    if spec.swagger != "2.0" {
        return Err(ParseError::UnsupportedVersion(spec.swagger.clone()));
    }
    Ok(())
}
