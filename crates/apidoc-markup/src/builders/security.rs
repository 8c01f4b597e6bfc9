use std::collections::HashSet;

use apidoc_core::ir::{IrSecurityKind, IrSecurityScheme};

use crate::block::{Block, Line, LinkTarget};
use crate::extension::{ExtensionError, InsertionPoint, Section};
use crate::i18n::Label;

use super::common::{labeled, strong};
use super::{BuildContext, SectionDocument};

/// Schemes referenced by at least one operation, in declaration order.
pub fn build_security(ctx: &BuildContext<'_>) -> Result<SectionDocument, ExtensionError> {
    let mut doc = SectionDocument::new(Section::Security);

    doc.push_blocks(ctx.document_extensions(Section::Security, InsertionPoint::DocumentBefore)?);
    doc.push_block(Block::label_heading(2, Label::Security));
    doc.push_blocks(ctx.document_extensions(Section::Security, InsertionPoint::DocumentBegin)?);

    let referenced: HashSet<&str> = ctx
        .spec
        .operations
        .iter()
        .flat_map(|op| op.security.iter().map(|r| r.scheme.as_str()))
        .collect();

    for scheme in ctx
        .spec
        .security_schemes
        .iter()
        .filter(|s| referenced.contains(s.name.as_str()))
    {
        doc.push_blocks(scheme_blocks(scheme));
    }

    doc.push_blocks(ctx.document_extensions(Section::Security, InsertionPoint::DocumentEnd)?);
    doc.push_blocks(ctx.document_extensions(Section::Security, InsertionPoint::DocumentAfter)?);
    Ok(doc)
}

fn scheme_blocks(scheme: &IrSecurityScheme) -> Vec<Block> {
    let mut blocks = vec![Block::anchored_heading(
        3,
        scheme.name.as_str(),
        LinkTarget::SecurityScheme(scheme.name.clone()).anchor_key(),
    )];

    let mut facts = vec![labeled(Label::Type, Line::text(scheme.kind.type_name()))];
    let mut scopes = None;
    match scheme.kind {
        IrSecurityKind::Basic => {}
        IrSecurityKind::ApiKey {
            ref name,
            ref location,
        } => {
            facts.push(labeled(Label::Name, Line::text(name)));
            facts.push(labeled(Label::In, Line::text(location.to_uppercase())));
        }
        IrSecurityKind::OAuth2 {
            ref flow,
            ref authorization_url,
            ref token_url,
            scopes: ref declared,
        } => {
            facts.push(labeled(Label::Flow, Line::text(flow)));
            if let Some(url) = authorization_url {
                facts.push(labeled(Label::AuthorizationUrl, Line::text(url)));
            }
            if let Some(url) = token_url {
                facts.push(labeled(Label::TokenUrl, Line::text(url)));
            }
            if !declared.is_empty() {
                scopes = Some(declared);
            }
        }
    }
    blocks.push(Block::List(facts));

    if let Some(ref description) = scheme.description {
        blocks.push(Block::paragraph(description.trim()));
    }

    if let Some(scopes) = scopes {
        blocks.push(Block::Table {
            columns: vec![Label::Name, Label::Description],
            rows: scopes
                .iter()
                .map(|(name, description)| {
                    vec![Line::new().push(strong(name)), Line::text(description)]
                })
                .collect(),
        });
    }
    blocks
}
