use indexmap::IndexMap;

/// A declared security scheme.
#[derive(Debug, Clone)]
pub struct IrSecurityScheme {
    pub name: String,
    pub description: Option<String>,
    pub kind: IrSecurityKind,
}

#[derive(Debug, Clone)]
pub enum IrSecurityKind {
    Basic,
    ApiKey {
        name: String,
        location: String,
    },
    OAuth2 {
        flow: String,
        authorization_url: Option<String>,
        token_url: Option<String>,
        scopes: IndexMap<String, String>,
    },
}

impl IrSecurityKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            IrSecurityKind::Basic => "basic",
            IrSecurityKind::ApiKey { .. } => "apiKey",
            IrSecurityKind::OAuth2 { .. } => "oauth2",
        }
    }
}
