use crate::block::{Block, Line};
use crate::extension::{ExtensionError, InsertionPoint, Section};
use crate::i18n::Label;

use super::common::labeled;
use super::{BuildContext, SectionDocument};

pub fn build_overview(ctx: &BuildContext<'_>) -> Result<SectionDocument, ExtensionError> {
    let spec = ctx.spec;
    let info = &spec.info;
    let mut doc = SectionDocument::new(Section::Overview);

    doc.push_blocks(ctx.document_extensions(Section::Overview, InsertionPoint::DocumentBefore)?);
    doc.push_block(Block::heading(1, info.title.as_str()));
    doc.push_blocks(ctx.document_extensions(Section::Overview, InsertionPoint::DocumentBegin)?);
    doc.push_block(Block::label_heading(2, Label::Overview));
    if let Some(ref description) = info.description {
        doc.push_block(Block::paragraph(description.trim()));
    }

    doc.push_block(Block::label_heading(3, Label::VersionInformation));
    doc.push_block(Block::paragraph(labeled(
        Label::Version,
        Line::text(&info.version),
    )));

    if let Some(ref contact) = info.contact {
        let entries: Vec<Line> = [
            (Label::Contact, &contact.name),
            (Label::ContactEmail, &contact.email),
            (Label::ContactUrl, &contact.url),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| labeled(label, Line::text(v))))
        .collect();
        if !entries.is_empty() {
            doc.push_block(Block::label_heading(3, Label::ContactInformation));
            doc.push_block(Block::List(entries));
        }
    }

    let mut license = Vec::new();
    if let Some(ref l) = info.license {
        license.push(labeled(Label::License, Line::text(&l.name)));
        if let Some(ref url) = l.url {
            license.push(labeled(Label::LicenseUrl, Line::text(url)));
        }
    }
    if let Some(ref terms) = info.terms_of_service {
        license.push(labeled(Label::TermsOfService, Line::text(terms)));
    }
    if !license.is_empty() {
        doc.push_block(Block::label_heading(3, Label::LicenseInformation));
        doc.push_block(Block::List(license));
    }

    let uri = &spec.uri_scheme;
    if !uri.schemes.is_empty() {
        let mut entries = Vec::new();
        if let Some(ref host) = uri.host {
            entries.push(labeled(Label::Host, Line::text(host)));
        }
        if let Some(ref base_path) = uri.base_path {
            entries.push(labeled(Label::BasePath, Line::text(base_path)));
        }
        let schemes: Vec<String> = uri.schemes.iter().map(|s| s.to_uppercase()).collect();
        entries.push(labeled(Label::Schemes, Line::text(schemes.join(", "))));
        doc.push_block(Block::label_heading(3, Label::UriScheme));
        doc.push_block(Block::List(entries));
    }

    if !spec.tags.is_empty() {
        let tags = spec
            .tags
            .iter()
            .map(|tag| match tag.description {
                Some(ref description) => Line::text(format!("{} : {}", tag.name, description)),
                None => Line::text(&tag.name),
            })
            .collect();
        doc.push_block(Block::label_heading(3, Label::Tags));
        doc.push_block(Block::List(tags));
    }

    for (label, media_types) in [
        (Label::Consumes, &spec.consumes),
        (Label::Produces, &spec.produces),
    ] {
        if media_types.is_empty() {
            continue;
        }
        doc.push_block(Block::label_heading(3, label));
        doc.push_block(Block::List(media_types.iter().map(Line::code).collect()));
    }

    doc.push_blocks(ctx.document_extensions(Section::Overview, InsertionPoint::DocumentEnd)?);
    doc.push_blocks(ctx.document_extensions(Section::Overview, InsertionPoint::DocumentAfter)?);
    Ok(doc)
}
