use apidoc_core::config::{
    DocumentConfig, GroupBy, Language, LineSeparator, MarkupLanguage, OrderBy,
};
use apidoc_core::error::GroupingError;
use apidoc_markup::i18n::{Label, translate_tag};
use apidoc_markup::{Converter, GenerateError};

const PETSTORE: &str = include_str!("../../apidoc-core/tests/fixtures/petstore.yaml");
const MINIMAL: &str = include_str!("../../apidoc-core/tests/fixtures/minimal.yaml");
const MISSING_TAG: &str = include_str!("../../apidoc-core/tests/fixtures/missing_tag.json");
const INLINE_SCHEMA: &str = include_str!("../../apidoc-core/tests/fixtures/inline_schema.yaml");
const WITH_URI_SCHEME: &str =
    include_str!("../../apidoc-core/tests/fixtures/should_contain_uri_scheme.yaml");
const WITHOUT_URI_SCHEME: &str =
    include_str!("../../apidoc-core/tests/fixtures/should_not_contain_uri_scheme.yaml");

const INLINE_ALL_OF: &str = r##"
swagger: "2.0"
info: { title: Composition, version: "1" }
paths: {}
definitions:
  Base:
    type: object
    properties:
      id: { type: integer, format: int64 }
  Holder:
    type: object
    properties:
      item:
        allOf:
          - $ref: "#/definitions/Base"
          - type: object
            properties:
              extra: { type: string }
"##;

fn convert(input: &str, config: DocumentConfig) -> apidoc_core::DocumentTree {
    Converter::new(config)
        .convert_str(input)
        .expect("should convert")
}

#[test]
fn default_config_writes_four_sections() {
    let tree = convert(PETSTORE, DocumentConfig::default());
    let paths: Vec<&str> = tree.paths().collect();
    assert_eq!(
        paths,
        vec![
            "overview.adoc",
            "paths.adoc",
            "definitions.adoc",
            "security.adoc"
        ]
    );

    let overview = tree.get("overview.adoc").expect("should have overview");
    assert!(overview.starts_with("= Swagger Petstore\n"));
    assert!(overview.contains("*Version* : 1.0.0"));
    assert!(overview.contains("*License* : Apache 2.0"));
}

#[test]
fn conversion_is_deterministic() {
    let first = convert(PETSTORE, DocumentConfig::default());
    let second = convert(PETSTORE, DocumentConfig::default());
    assert_eq!(first, second);
}

#[test]
fn uri_scheme_only_when_schemes_declared() {
    let with = convert(WITH_URI_SCHEME, DocumentConfig::default());
    let overview = with.get("overview.adoc").expect("should have overview");
    assert!(overview.contains("=== URI scheme"));
    assert!(overview.contains("*Host* : api.example.com"));
    assert!(overview.contains("*Schemes* : HTTP, HTTPS"));

    let without = convert(WITHOUT_URI_SCHEME, DocumentConfig::default());
    let overview = without.get("overview.adoc").expect("should have overview");
    assert!(!overview.contains("=== URI scheme"));
}

#[test]
fn separated_entities_get_their_own_files() {
    let config = DocumentConfig {
        separate_definitions: true,
        separate_operations: true,
        ..DocumentConfig::default()
    };
    let tree = convert(PETSTORE, config);

    let definitions = tree
        .paths()
        .filter(|p| p.starts_with("definitions/"))
        .count();
    let operations = tree.paths().filter(|p| p.starts_with("operations/")).count();
    assert_eq!(definitions, 5);
    assert_eq!(operations, 16);
    assert_eq!(tree.len(), 4 + 5 + 16);

    let section = tree.get("definitions.adoc").expect("should have definitions");
    assert!(section.contains("include::definitions/Pet.adoc[]"));

    let pet = tree.get("definitions/Pet.adoc").expect("should have Pet");
    assert!(pet.starts_with("[[_pet]]\n=== Pet\n"));

    // Links from an operation file climb out of `operations/`.
    let add_pet = tree.get("operations/addPet.adoc").expect("should have addPet");
    assert!(add_pet.contains("<<../definitions/Pet.adoc#_pet,Pet>>"));
}

#[test]
fn section_files_follow_each_other_with_entities() {
    let config = DocumentConfig {
        separate_definitions: true,
        ..DocumentConfig::default()
    };
    let tree = convert(MINIMAL, config);
    let paths: Vec<&str> = tree.paths().collect();
    assert_eq!(
        paths,
        vec![
            "overview.adoc",
            "paths.adoc",
            "definitions.adoc",
            "definitions/Pet.adoc",
            "definitions/Status.adoc",
            "security.adoc"
        ]
    );
}

#[test]
fn cross_references_link_definitions_and_schemes() {
    let tree = convert(PETSTORE, DocumentConfig::default());
    let paths = tree.get("paths.adoc").expect("should have paths");
    assert!(paths.contains("<<definitions.adoc#_pet,Pet>>"));
    assert!(paths.contains("<<security.adoc#_security_api_key,api_key>>"));

    let security = tree.get("security.adoc").expect("should have security");
    assert!(security.contains("[[_security_api_key]]\n=== api_key"));
    assert!(security.contains("=== petstore_auth"));
    assert!(security.contains("|*write_pets*|modify pets in your account"));
}

#[test]
fn operations_render_tables() {
    let tree = convert(PETSTORE, DocumentConfig::default());
    let paths = tree.get("paths.adoc").expect("should have paths");

    assert!(paths.contains("[[_getpetbyid]]\n==== Find pet by ID"));
    assert!(paths.contains("----\nGET /pets/{petId}\n----"));
    assert!(paths.contains("|*Path*|*petId*|ID of pet that needs to be fetched|Required|integer (int64)|"));
    assert!(paths.contains("`X-Rate-Limit` (integer (int32)) : calls per hour allowed by the user"));
    assert!(paths.contains("|*405*|Invalid input|No Content"));
}

#[test]
fn definitions_render_properties_and_xml() {
    let tree = convert(PETSTORE, DocumentConfig::default());
    let definitions = tree.get("definitions.adoc").expect("should have definitions");

    assert!(definitions.starts_with("== Definitions\n"));
    assert!(definitions.contains("|*category*||Optional|<<_category,Category>>|"));
    assert!(definitions.contains("|*tags*||Optional|< <<_tag,Tag>> > array|"));
    assert!(definitions.contains("==== XML\n\n* *Name* : `Pet`"));
    assert!(!definitions.contains("==== Example"));
}

#[test]
fn generated_examples_when_enabled() {
    let config = DocumentConfig {
        generated_examples: true,
        ..DocumentConfig::default()
    };
    let tree = convert(MINIMAL, config);

    let paths = tree.get("paths.adoc").expect("should have paths");
    assert!(paths.contains("===== Example HTTP request"));
    assert!(paths.contains("====== Request body"));
    assert!(paths.contains("===== Example HTTP response"));

    let definitions = tree.get("definitions.adoc").expect("should have definitions");
    assert!(definitions.contains("==== Example\n\n[source,json]\n----\n{\n  \"id\": 0,\n  \"name\": \"string\"\n}\n----"));
}

#[test]
fn localized_headings() {
    let ru = convert(
        PETSTORE,
        DocumentConfig {
            language: Language::Ru,
            ..DocumentConfig::default()
        },
    );
    assert!(ru.get("definitions.adoc").expect("should have definitions").contains("== Определения"));
    assert!(ru.get("paths.adoc").expect("should have paths").contains("== Ресурсы"));

    let fr = convert(
        WITH_URI_SCHEME,
        DocumentConfig {
            language: Language::Fr,
            ..DocumentConfig::default()
        },
    );
    assert!(fr.get("overview.adoc").expect("should have overview").contains("=== Schéma d'URI"));
}

#[test]
fn markdown_output() {
    let config = DocumentConfig {
        markup: MarkupLanguage::Markdown,
        ..DocumentConfig::default()
    };
    let tree = convert(PETSTORE, config);
    let paths: Vec<&str> = tree.paths().collect();
    assert_eq!(
        paths,
        vec!["overview.md", "paths.md", "definitions.md", "security.md"]
    );

    let definitions = tree.get("definitions.md").expect("should have definitions");
    assert!(definitions.starts_with("## Definitions\n"));
    assert!(definitions.contains("<a name=\"pet\"></a>\n### Pet"));
    assert!(definitions.contains("| Name | Description | Required | Schema | Default |"));

    let paths = tree.get("paths.md").expect("should have paths");
    assert!(paths.contains("[Pet](definitions.md#pet)"));
}

#[test]
fn windows_line_separator() {
    let config = DocumentConfig {
        line_separator: LineSeparator::Windows,
        ..DocumentConfig::default()
    };
    let tree = convert(MINIMAL, config);
    let text = tree.as_string();
    assert!(text.contains("= Minimal\r\n"));
    assert!(!text.replace("\r\n", "").contains('\n'));
}

#[test]
fn windows_line_separator_keeps_crlf_descriptions_intact() {
    let input = r#"
swagger: "2.0"
info:
  title: Endings
  version: "1"
  description: "line one\r\nline two"
paths: {}
"#;
    let config = DocumentConfig {
        line_separator: LineSeparator::Windows,
        ..DocumentConfig::default()
    };
    let text = convert(input, config).as_string();
    assert!(text.contains("line one\r\nline two"));
    assert!(!text.contains("\r\r"));
}

#[test]
fn inline_schema_depth_boundary() {
    let promoted = convert(
        INLINE_SCHEMA,
        DocumentConfig {
            inline_schema_depth: 1,
            ..DocumentConfig::default()
        },
    );
    let definitions = promoted.get("definitions.adoc").expect("should have definitions");
    assert!(definitions.contains("=== PetOwner"));
    assert!(definitions.contains("=== AddPetBody"));

    let inline = convert(
        INLINE_SCHEMA,
        DocumentConfig {
            inline_schema_depth: 0,
            ..DocumentConfig::default()
        },
    );
    let definitions = inline.get("definitions.adoc").expect("should have definitions");
    assert!(!definitions.contains("=== PetOwner"));
    // Still documented, as an inline table under Pet.
    assert!(definitions.contains("*PetOwner*"));

    let paths = inline.get("paths.adoc").expect("should have paths");
    assert!(paths.contains("*AddPetBody*"));
}

#[test]
fn group_by_tags_requires_tags() {
    let config = DocumentConfig {
        group_by: GroupBy::Tags,
        ..DocumentConfig::default()
    };
    let err = Converter::new(config)
        .convert_str(MISSING_TAG)
        .expect_err("should fail");
    match err {
        GenerateError::Grouping(GroupingError::MissingTag { operation, .. }) => {
            assert_eq!(operation, "updatePet");
        }
        other => panic!("expected MissingTag, got {other:?}"),
    }
}

#[test]
fn minimal_end_to_end() {
    let tree = convert(MINIMAL, DocumentConfig::default());
    assert_eq!(tree.len(), 4);
    let paths = tree.get("paths.adoc").expect("should have paths");
    assert!(paths.contains("=== /health"));
    assert!(paths.contains("=== /pets"));

    // Nothing references a security scheme, the section is just its heading.
    assert_eq!(tree.get("security.adoc"), Some("== Security\n"));

    let config = DocumentConfig {
        group_by: GroupBy::Tags,
        ..DocumentConfig::default()
    };
    let err = Converter::new(config)
        .convert_str(MINIMAL)
        .expect_err("should fail");
    assert!(err.to_string().contains("'health'"));
}

#[test]
fn tag_groups_carry_descriptions() {
    let config = DocumentConfig {
        group_by: GroupBy::Tags,
        ..DocumentConfig::default()
    };
    let tree = convert(PETSTORE, config);
    let paths = tree.get("paths.adoc").expect("should have paths");
    let pet = paths.find("=== pet\n\nPet resource").expect("should have pet group");
    let store = paths.find("=== store\n\nStore resource").expect("should have store group");
    assert!(pet < store);
}

#[test]
fn inline_all_of_keeps_inherited_fields() {
    let inline = convert(
        INLINE_ALL_OF,
        DocumentConfig {
            inline_schema_depth: 0,
            ..DocumentConfig::default()
        },
    );
    let definitions = inline.get("definitions.adoc").expect("should have definitions");
    assert!(definitions.contains("*HolderItem*\n\n*Inherits from* : <<_base,Base>>"));
    let id = definitions.rfind("|*id*||Optional|integer (int64)|").expect("should list id");
    let extra = definitions.find("|*extra*||Optional|string|").expect("should list extra");
    assert!(id < extra);

    let promoted = convert(
        INLINE_ALL_OF,
        DocumentConfig {
            inline_schema_depth: 1,
            ..DocumentConfig::default()
        },
    );
    let definitions = promoted.get("definitions.adoc").expect("should have definitions");
    let item = definitions.find("=== HolderItem").expect("should promote HolderItem");
    let section = &definitions[item..];
    assert!(section.contains("*Inherits from* : <<_base,Base>>"));
    assert!(section.contains("|*id*||Optional|integer (int64)|"));
    assert!(section.contains("|*extra*||Optional|string|"));
}

#[test]
fn definitions_in_alphabetical_order() {
    let input = r#"
swagger: "2.0"
info: { title: Fruit, version: "1" }
paths: {}
definitions:
  Zebra: { type: object, properties: { stripes: { type: integer } } }
  Mango: { type: string }
  Apple: { type: object, properties: { color: { type: string } } }
"#;
    let positions = |tree: &apidoc_core::DocumentTree| -> Vec<usize> {
        let definitions = tree.get("definitions.adoc").expect("should have definitions");
        ["=== Apple", "=== Mango", "=== Zebra"]
            .iter()
            .map(|h| definitions.find(h).expect("should have heading"))
            .collect()
    };

    let declared = positions(&convert(input, DocumentConfig::default()));
    assert!(declared[2] < declared[1] && declared[1] < declared[0]);

    let config = DocumentConfig {
        definition_ordering: OrderBy::Alphabetical,
        ..DocumentConfig::default()
    };
    let sorted = positions(&convert(input, config.clone()));
    assert!(sorted[0] < sorted[1] && sorted[1] < sorted[2]);

    let separated = convert(
        input,
        DocumentConfig {
            separate_definitions: true,
            ..config
        },
    );
    let files: Vec<&str> = separated
        .paths()
        .filter(|p| p.starts_with("definitions/"))
        .collect();
    assert_eq!(
        files,
        vec![
            "definitions/Apple.adoc",
            "definitions/Mango.adoc",
            "definitions/Zebra.adoc"
        ]
    );
}

#[test]
fn section_headings_follow_language_tags() {
    for tag in ["en", "ru", "fr", "de", "pt-BR"] {
        let config = DocumentConfig {
            language: Language::from_tag(tag),
            ..DocumentConfig::default()
        };
        let tree = convert(MINIMAL, config);
        let paths = tree.get("paths.adoc").expect("should have paths");
        assert!(paths.starts_with(&format!("== {}\n", translate_tag(Label::Paths, tag))));
        let security = tree.get("security.adoc").expect("should have security");
        assert_eq!(security, format!("== {}\n", translate_tag(Label::Security, tag)));
    }
}

#[test]
fn case_variant_definitions_get_distinct_anchors() {
    let input = r##"
swagger: "2.0"
info: { title: Case, version: "1" }
paths: {}
definitions:
  Pet:
    type: object
    properties:
      twin: { $ref: "#/definitions/pet" }
  pet:
    type: object
    properties:
      name: { type: string }
"##;
    let tree = convert(input, DocumentConfig::default());
    let definitions = tree.get("definitions.adoc").expect("should have definitions");
    assert!(definitions.contains("[[_Pet]]\n=== Pet"));
    assert!(definitions.contains("[[_pet]]\n=== pet"));
    assert!(definitions.contains("|*twin*||Optional|<<_pet,pet>>|"));
}
