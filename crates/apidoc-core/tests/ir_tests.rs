use apidoc_core::config::NamingStrategy;
use apidoc_core::error::{ResolveError, TransformError};
use apidoc_core::ir::*;
use apidoc_core::parse;
use apidoc_core::transform::{self, TransformOptions};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const INLINE_SCHEMA: &str = include_str!("fixtures/inline_schema.yaml");

fn petstore_ir() -> IrSpec {
    let spec = parse::from_yaml(PETSTORE).expect("should parse petstore");
    transform::transform(&spec).expect("should transform petstore")
}

fn inline_ir(depth: u32) -> IrSpec {
    let spec = parse::from_yaml(INLINE_SCHEMA).expect("should parse inline schema spec");
    let options = TransformOptions {
        inline_schema_depth: depth,
        ..TransformOptions::default()
    };
    transform::transform_with_options(&spec, &options).expect("should transform")
}

fn synthesized_names(ir: &IrSpec) -> Vec<&str> {
    ir.definitions
        .iter()
        .filter(|d| matches!(d.origin, DefinitionOrigin::Synthesized { .. }))
        .map(|d| d.name.original.as_str())
        .collect()
}

#[test]
fn petstore_definitions_in_declaration_order() {
    let ir = petstore_ir();
    let names: Vec<&str> = ir
        .definitions
        .iter()
        .map(|d| d.name.original.as_str())
        .collect();
    assert_eq!(names, vec!["Category", "Order", "Pet", "Tag", "User"]);
    assert!(ir.definition("Pet").is_some());
    assert!(ir.definition("Missing").is_none());
}

#[test]
fn petstore_pet_fields() {
    let ir = petstore_ir();
    let pet = ir.definition("Pet").expect("should have Pet");
    let fields = match &pet.schema {
        IrSchema::Object(obj) => &obj.fields,
        other => panic!("expected object, got {other:?}"),
    };
    assert_eq!(fields.len(), 6);

    let category = fields.iter().find(|f| f.original_name == "category").unwrap();
    assert_eq!(category.field_type, IrType::Ref("Category".to_string()));
    assert!(!category.required);

    let name = fields.iter().find(|f| f.original_name == "name").unwrap();
    assert!(name.required);
    assert_eq!(name.example, Some(serde_json::json!("doggie")));

    let tags = fields.iter().find(|f| f.original_name == "tags").unwrap();
    assert_eq!(
        tags.field_type,
        IrType::Array(Box::new(IrType::Ref("Tag".to_string())))
    );

    let status = fields.iter().find(|f| f.original_name == "status").unwrap();
    assert_eq!(
        status.field_type,
        IrType::Enum(vec![
            "available".to_string(),
            "pending".to_string(),
            "sold".to_string()
        ])
    );
    assert_eq!(pet.xml.as_ref().and_then(|x| x.name.as_deref()), Some("Pet"));
}

#[test]
fn petstore_operations() {
    let ir = petstore_ir();
    assert_eq!(ir.operations.len(), 16);

    let first = &ir.operations[0];
    assert_eq!(first.name.original, "updatePet");
    assert_eq!(first.method, HttpMethod::Put);
    assert_eq!(first.path, "/pets");

    let get_pet = ir
        .operations
        .iter()
        .find(|o| o.name.original == "getPetById")
        .expect("should have getPetById");
    assert_eq!(get_pet.key(), "GET /pets/{petId}");
    assert_eq!(get_pet.title(), "Find pet by ID");
    assert_eq!(get_pet.tags, vec!["pet"]);
    assert_eq!(get_pet.responses.len(), 3);
    assert_eq!(get_pet.responses[0].status, "200");
    assert_eq!(
        get_pet.responses[0].schema,
        Some(IrType::Ref("Pet".to_string()))
    );
    assert_eq!(get_pet.responses[0].headers[0].name, "X-Rate-Limit");
    assert_eq!(get_pet.security.len(), 2);
    assert_eq!(get_pet.security[0].scheme, "api_key");
    assert_eq!(get_pet.security[1].scopes, vec!["write_pets", "read_pets"]);

    let add_pet = ir
        .operations
        .iter()
        .find(|o| o.name.original == "addPet")
        .expect("should have addPet");
    let body = add_pet.body_parameter().expect("should have body");
    assert_eq!(body.param_type, IrType::Ref("Pet".to_string()));
}

#[test]
fn petstore_metadata() {
    let ir = petstore_ir();
    assert_eq!(ir.info.title, "Swagger Petstore");
    assert_eq!(
        ir.info.license.as_ref().map(|l| l.name.as_str()),
        Some("Apache 2.0")
    );
    assert_eq!(ir.uri_scheme.schemes, vec!["http"]);
    assert_eq!(ir.tags.len(), 3);
    assert_eq!(ir.security_schemes.len(), 2);
    match &ir.security_scheme("petstore_auth").unwrap().kind {
        IrSecurityKind::OAuth2 { flow, scopes, .. } => {
            assert_eq!(flow, "implicit");
            assert_eq!(scopes.len(), 2);
        }
        other => panic!("expected oauth2, got {other:?}"),
    }
}

#[test]
fn route_based_naming() {
    let spec = parse::from_yaml(PETSTORE).expect("should parse petstore");
    let options = TransformOptions {
        naming_strategy: NamingStrategy::UseRouteBased,
        ..TransformOptions::default()
    };
    let ir = transform::transform_with_options(&spec, &options).expect("should transform");
    let names: Vec<&str> = ir
        .operations
        .iter()
        .filter(|o| o.path == "/pets/{petId}")
        .map(|o| o.name.original.as_str())
        .collect();
    assert_eq!(names, vec!["getPet", "createPet", "deletePet"]);
}

#[test]
fn duplicate_operation_names_are_rejected() {
    let yaml = PETSTORE.replace("operationId: deleteUser", "operationId: deletePet");
    let spec = parse::from_yaml(&yaml).expect("should parse");
    match transform::transform(&spec) {
        Err(TransformError::Resolve(ResolveError::DuplicateOperation { name, first, second })) => {
            assert_eq!(name, "deletePet");
            assert_eq!(first, "DELETE /pets/{petId}");
            assert_eq!(second, "DELETE /users/{username}");
        }
        other => panic!("expected DuplicateOperation, got {other:?}"),
    }
}

#[test]
fn unresolved_definition_ref_is_fatal() {
    let yaml = PETSTORE.replace("$ref: \"#/definitions/Category\"", "$ref: \"#/definitions/Kind\"");
    let spec = parse::from_yaml(&yaml).expect("should parse");
    match transform::transform(&spec) {
        Err(TransformError::Resolve(ResolveError::UnresolvedRef { reference, .. })) => {
            assert_eq!(reference, "#/definitions/Kind");
        }
        other => panic!("expected UnresolvedRef, got {other:?}"),
    }
}

#[test]
fn inline_depth_zero_promotes_nothing() {
    let ir = inline_ir(0);
    assert!(synthesized_names(&ir).is_empty());
    let pet = ir.definition("Pet").unwrap();
    match &pet.schema {
        IrSchema::Object(obj) => {
            assert!(matches!(obj.fields[2].field_type, IrType::Object(_)));
        }
        other => panic!("expected object, got {other:?}"),
    }
}

#[test]
fn inline_depth_one_promotes_exactly_one_level() {
    let ir = inline_ir(1);
    assert_eq!(
        synthesized_names(&ir),
        vec![
            "PetOwner",
            "PetVaccinationsItem",
            "GetPetByIdResponse200",
            "AddPetBody"
        ]
    );

    // The nested address stays inline below the promoted owner.
    match &ir.definition("PetOwner").unwrap().schema {
        IrSchema::Object(obj) => {
            let address = obj
                .fields
                .iter()
                .find(|f| f.original_name == "address")
                .unwrap();
            assert!(matches!(address.field_type, IrType::Object(_)));
        }
        other => panic!("expected object, got {other:?}"),
    }

    let get_pet = &ir.operations[0];
    assert_eq!(
        get_pet.responses[0].schema,
        Some(IrType::Ref("GetPetByIdResponse200".to_string()))
    );
}

#[test]
fn inline_depth_two_promotes_nested() {
    let ir = inline_ir(2);
    let names = synthesized_names(&ir);
    assert_eq!(names.len(), 7);
    assert!(names.contains(&"PetOwnerAddress"));
    assert!(names.contains(&"GetPetByIdResponse200Links"));
    assert!(names.contains(&"AddPetBodyOwner"));

    match &ir.definition("PetOwnerAddress").unwrap().origin {
        DefinitionOrigin::Synthesized { parent, depth } => {
            assert_eq!(parent, "Pet");
            assert_eq!(*depth, 2);
        }
        DefinitionOrigin::Declared => panic!("expected synthesized definition"),
    }
}

#[test]
fn synthesized_name_collision_is_fatal() {
    let yaml = INLINE_SCHEMA.replace(
        "definitions:\n  Pet:",
        "definitions:\n  PetOwner:\n    type: string\n  Pet:",
    );
    let spec = parse::from_yaml(&yaml).expect("should parse");
    match transform::transform(&spec) {
        Err(TransformError::Resolve(ResolveError::NameCollision { name, .. })) => {
            assert_eq!(name, "PetOwner");
        }
        other => panic!("expected NameCollision, got {other:?}"),
    }
}
