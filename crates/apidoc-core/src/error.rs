use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported Swagger version: {0:?} (expected \"2.0\")")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unresolved reference {reference} in {context}")]
    UnresolvedRef { reference: String, context: String },

    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("definition name {name} synthesized for {second} collides with {first}")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("operation name {name} is used by both {first} and {second}")]
    DuplicateOperation {
        name: String,
        first: String,
        second: String,
    },

    #[error("operation {operation} requires unknown security scheme {scheme}")]
    UnknownSecurityScheme { scheme: String, operation: String },
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupingError {
    #[error("can't group by tags: operation '{operation}' ({method} {path}) has no tags")]
    MissingTag {
        operation: String,
        method: String,
        path: String,
    },
}
