//! Localized headings and labels.
//!
//! Builders never emit literal heading text; they emit a [`Label`] which the
//! renderer translates for the configured [`Language`]. A label missing from a
//! language falls back to English.

use apidoc_core::config::Language;

/// Canonical keys for every fixed piece of text in a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Overview,
    VersionInformation,
    Version,
    ContactInformation,
    Contact,
    ContactEmail,
    ContactUrl,
    LicenseInformation,
    License,
    LicenseUrl,
    TermsOfService,
    UriScheme,
    Host,
    BasePath,
    Schemes,
    Tags,
    Consumes,
    Produces,
    Paths,
    Description,
    Parameters,
    Responses,
    HttpCode,
    Type,
    Name,
    Required,
    Optional,
    Schema,
    Default,
    Headers,
    NoContent,
    Security,
    Scopes,
    ExampleRequest,
    ExampleResponse,
    RequestPath,
    RequestBody,
    Response,
    Definitions,
    Inherits,
    Xml,
    Attribute,
    Wrapped,
    Namespace,
    Prefix,
    Example,
    Deprecated,
    ReadOnly,
    Flow,
    AuthorizationUrl,
    TokenUrl,
    In,
    XmlSchema,
    JsonSchema,
}

/// Translate a label. Never empty; unknown keys fall back to English.
pub fn translate(label: Label, language: Language) -> &'static str {
    let localized = match language {
        Language::En => None,
        Language::Ru => russian(label),
        Language::Fr => french(label),
        Language::De => german(label),
    };
    localized.unwrap_or_else(|| english(label))
}

/// Translate a label for a language tag such as `ru` or `fr-CA`.
pub fn translate_tag(label: Label, tag: &str) -> &'static str {
    translate(label, Language::from_tag(tag))
}

fn english(label: Label) -> &'static str {
    match label {
        Label::Overview => "Overview",
        Label::VersionInformation => "Version information",
        Label::Version => "Version",
        Label::ContactInformation => "Contact information",
        Label::Contact => "Contact",
        Label::ContactEmail => "Contact Email",
        Label::ContactUrl => "Contact URL",
        Label::LicenseInformation => "License information",
        Label::License => "License",
        Label::LicenseUrl => "License URL",
        Label::TermsOfService => "Terms of service",
        Label::UriScheme => "URI scheme",
        Label::Host => "Host",
        Label::BasePath => "BasePath",
        Label::Schemes => "Schemes",
        Label::Tags => "Tags",
        Label::Consumes => "Consumes",
        Label::Produces => "Produces",
        Label::Paths => "Paths",
        Label::Description => "Description",
        Label::Parameters => "Parameters",
        Label::Responses => "Responses",
        Label::HttpCode => "HTTP Code",
        Label::Type => "Type",
        Label::Name => "Name",
        Label::Required => "Required",
        Label::Optional => "Optional",
        Label::Schema => "Schema",
        Label::Default => "Default",
        Label::Headers => "Headers",
        Label::NoContent => "No Content",
        Label::Security => "Security",
        Label::Scopes => "Scopes",
        Label::ExampleRequest => "Example HTTP request",
        Label::ExampleResponse => "Example HTTP response",
        Label::RequestPath => "Request path",
        Label::RequestBody => "Request body",
        Label::Response => "Response",
        Label::Definitions => "Definitions",
        Label::Inherits => "Inherits from",
        Label::Xml => "XML",
        Label::Attribute => "Attribute",
        Label::Wrapped => "Wrapped",
        Label::Namespace => "Namespace",
        Label::Prefix => "Prefix",
        Label::Example => "Example",
        Label::Deprecated => "Deprecated",
        Label::ReadOnly => "Read-only",
        Label::Flow => "Flow",
        Label::AuthorizationUrl => "Authorization URL",
        Label::TokenUrl => "Token URL",
        Label::In => "In",
        Label::XmlSchema => "XML Schema",
        Label::JsonSchema => "JSON Schema",
    }
}

fn russian(label: Label) -> Option<&'static str> {
    Some(match label {
        Label::Overview => "Обзор",
        Label::VersionInformation => "Сведения о версии",
        Label::Version => "Версия",
        Label::ContactInformation => "Контактная информация",
        Label::Contact => "Контактное лицо",
        Label::ContactEmail => "Email для связи",
        Label::ContactUrl => "URL для связи",
        Label::LicenseInformation => "Сведения о лицензии",
        Label::License => "Лицензия",
        Label::LicenseUrl => "URL лицензии",
        Label::TermsOfService => "Условия использования",
        Label::UriScheme => "Схема URI",
        Label::Host => "Хост",
        Label::BasePath => "Базовый путь",
        Label::Schemes => "Схемы",
        Label::Tags => "Теги",
        Label::Consumes => "Принимает",
        Label::Produces => "Возвращает",
        Label::Paths => "Ресурсы",
        Label::Description => "Описание",
        Label::Parameters => "Параметры",
        Label::Responses => "Ответы",
        Label::HttpCode => "HTTP код",
        Label::Type => "Тип",
        Label::Name => "Имя",
        Label::Required => "Обязательный",
        Label::Optional => "Необязательный",
        Label::Schema => "Схема",
        Label::Default => "По умолчанию",
        Label::Headers => "Заголовки",
        Label::NoContent => "Без содержимого",
        Label::Security => "Безопасность",
        Label::Scopes => "Области доступа",
        Label::ExampleRequest => "Пример HTTP запроса",
        Label::ExampleResponse => "Пример HTTP ответа",
        Label::RequestPath => "Путь запроса",
        Label::RequestBody => "Тело запроса",
        Label::Response => "Ответ",
        Label::Definitions => "Определения",
        Label::Inherits => "Наследует",
        Label::Attribute => "Атрибут",
        Label::Wrapped => "Обёрнутый",
        Label::Namespace => "Пространство имён",
        Label::Prefix => "Префикс",
        Label::Example => "Пример",
        Label::Deprecated => "Устарело",
        Label::ReadOnly => "Только чтение",
        Label::Flow => "Поток",
        Label::AuthorizationUrl => "URL авторизации",
        Label::TokenUrl => "URL токена",
        Label::In => "Расположение",
        Label::XmlSchema => "XML схема",
        Label::JsonSchema => "JSON схема",
        Label::Xml => return None,
    })
}

fn french(label: Label) -> Option<&'static str> {
    Some(match label {
        Label::Overview => "Présentation",
        Label::VersionInformation => "Informations de version",
        Label::ContactInformation => "Informations de contact",
        Label::ContactEmail => "E-mail de contact",
        Label::ContactUrl => "URL de contact",
        Label::LicenseInformation => "Informations de licence",
        Label::License => "Licence",
        Label::LicenseUrl => "URL de licence",
        Label::TermsOfService => "Conditions d'utilisation",
        Label::UriScheme => "Schéma d'URI",
        Label::Host => "Hôte",
        Label::BasePath => "Chemin de base",
        Label::Schemes => "Schémas",
        Label::Consumes => "Consomme",
        Label::Produces => "Produit",
        Label::Paths => "Chemins",
        Label::Parameters => "Paramètres",
        Label::Responses => "Réponses",
        Label::HttpCode => "Code HTTP",
        Label::Name => "Nom",
        Label::Required => "Requis",
        Label::Optional => "Optionnel",
        Label::Schema => "Schéma",
        Label::Default => "Défaut",
        Label::Headers => "En-têtes",
        Label::NoContent => "Pas de contenu",
        Label::Security => "Sécurité",
        Label::Scopes => "Portées",
        Label::ExampleRequest => "Exemple de requête HTTP",
        Label::ExampleResponse => "Exemple de réponse HTTP",
        Label::RequestPath => "Chemin de la requête",
        Label::RequestBody => "Corps de la requête",
        Label::Response => "Réponse",
        Label::Definitions => "Définitions",
        Label::Inherits => "Hérite de",
        Label::Attribute => "Attribut",
        Label::Wrapped => "Encapsulé",
        Label::Namespace => "Espace de noms",
        Label::Prefix => "Préfixe",
        Label::Example => "Exemple",
        Label::Deprecated => "Obsolète",
        Label::ReadOnly => "Lecture seule",
        Label::Flow => "Flux",
        Label::AuthorizationUrl => "URL d'autorisation",
        Label::TokenUrl => "URL du jeton",
        Label::In => "Emplacement",
        Label::XmlSchema => "Schéma XML",
        Label::JsonSchema => "Schéma JSON",
        // Same spelling as English.
        Label::Version
        | Label::Contact
        | Label::Tags
        | Label::Description
        | Label::Type
        | Label::Xml => return None,
    })
}

/// German only covers section and table headings so far.
fn german(label: Label) -> Option<&'static str> {
    match label {
        Label::Overview => Some("Übersicht"),
        Label::VersionInformation => Some("Versionsinformationen"),
        Label::Paths => Some("Pfade"),
        Label::Definitions => Some("Definitionen"),
        Label::Security => Some("Sicherheit"),
        Label::Parameters => Some("Parameter"),
        Label::Responses => Some("Antworten"),
        Label::Description => Some("Beschreibung"),
        Label::Type => Some("Typ"),
        Label::Required => Some("Erforderlich"),
        Label::Optional => Some("Optional"),
        Label::Default => Some("Standard"),
        Label::Example => Some("Beispiel"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_default() {
        assert_eq!(translate(Label::UriScheme, Language::En), "URI scheme");
        assert_eq!(translate(Label::Definitions, Language::default()), "Definitions");
    }

    #[test]
    fn test_russian_and_french() {
        assert_eq!(translate(Label::Definitions, Language::Ru), "Определения");
        assert_eq!(translate(Label::UriScheme, Language::Fr), "Schéma d'URI");
        assert_eq!(translate(Label::Version, Language::Fr), "Version");
    }

    #[test]
    fn test_partial_language_falls_back() {
        assert_eq!(translate(Label::Definitions, Language::De), "Definitionen");
        assert_eq!(translate(Label::TokenUrl, Language::De), "Token URL");
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        assert_eq!(translate_tag(Label::Paths, "ru"), "Ресурсы");
        assert_eq!(translate_tag(Label::Paths, "xx-YY"), "Paths");
    }
}
