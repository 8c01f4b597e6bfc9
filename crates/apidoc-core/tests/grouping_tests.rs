use apidoc_core::config::{GroupBy, OrderBy};
use apidoc_core::error::GroupingError;
use apidoc_core::ir::{IrSpec, group_operations};
use apidoc_core::parse;
use apidoc_core::transform;

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const MISSING_TAG: &str = include_str!("fixtures/missing_tag.json");
const MINIMAL: &str = include_str!("fixtures/minimal.yaml");

fn ir_from(input: &str) -> IrSpec {
    let spec = parse::from_str(input).expect("should parse");
    transform::transform(&spec).expect("should transform")
}

fn op_names(ir: &IrSpec, indices: &[usize]) -> Vec<String> {
    indices
        .iter()
        .map(|&i| ir.operations[i].name.original.clone())
        .collect()
}

#[test]
fn as_is_mirrors_path_hierarchy() {
    let ir = ir_from(PETSTORE);
    let tree = group_operations(&ir, GroupBy::AsIs, OrderBy::Declared).unwrap();

    let roots: Vec<&str> = tree.roots.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(roots, vec!["/pets", "/stores", "/users"]);

    let pets = &tree.roots[0];
    let children: Vec<&str> = pets.children.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(
        children,
        vec!["/pets/findByStatus", "/pets/findByTags", "/pets/{petId}"]
    );
    assert_eq!(op_names(&ir, &pets.operation_indices), vec!["updatePet", "addPet"]);

    // `/stores` holds no operation of its own.
    assert!(tree.roots[1].operation_indices.is_empty());
}

#[test]
fn as_is_is_total() {
    let ir = ir_from(PETSTORE);
    let tree = group_operations(&ir, GroupBy::AsIs, OrderBy::Declared).unwrap();
    let mut indices = tree.operation_indices();
    assert_eq!(indices.len(), ir.operations.len());
    indices.sort_unstable();
    indices.dedup();
    assert_eq!(indices.len(), ir.operations.len());
}

#[test]
fn as_is_leaf_groups_in_traversal_order() {
    let ir = ir_from(PETSTORE);
    let tree = group_operations(&ir, GroupBy::AsIs, OrderBy::Declared).unwrap();
    let leaves: Vec<&str> = tree.leaf_groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(
        leaves,
        vec![
            "/pets",
            "/pets/findByStatus",
            "/pets/findByTags",
            "/pets/{petId}",
            "/stores/order",
            "/stores/order/{orderId}",
            "/users",
            "/users/login",
            "/users/logout",
            "/users/{username}",
        ]
    );
}

#[test]
fn by_tags_follows_declared_tag_order() {
    let ir = ir_from(PETSTORE);
    let tree = group_operations(&ir, GroupBy::Tags, OrderBy::Declared).unwrap();
    let groups: Vec<&str> = tree.roots.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(groups, vec!["pet", "store", "user"]);
    assert_eq!(tree.roots[0].description.as_deref(), Some("Pet resource"));
    assert_eq!(tree.roots[0].operation_indices.len(), 7);
    assert_eq!(tree.roots[1].operation_indices.len(), 3);
    assert_eq!(tree.roots[2].operation_indices.len(), 6);
}

#[test]
fn by_tags_alphabetical_sorts_operations() {
    let ir = ir_from(PETSTORE);
    let tree = group_operations(&ir, GroupBy::Tags, OrderBy::Alphabetical).unwrap();
    assert_eq!(
        op_names(&ir, &tree.roots[1].operation_indices),
        vec!["placeOrder", "deleteOrder", "getOrderById"]
    );
}

#[test]
fn by_tags_missing_tag_names_operation() {
    let ir = ir_from(MISSING_TAG);
    let err = group_operations(&ir, GroupBy::Tags, OrderBy::Declared).unwrap_err();
    assert_eq!(
        err,
        GroupingError::MissingTag {
            operation: "updatePet".to_string(),
            method: "PUT".to_string(),
            path: "/pets".to_string(),
        }
    );
    insta::assert_snapshot!(
        err.to_string(),
        @"can't group by tags: operation 'updatePet' (PUT /pets) has no tags"
    );
}

#[test]
fn minimal_as_is_succeeds_with_untagged_operation() {
    let ir = ir_from(MINIMAL);
    let tree = group_operations(&ir, GroupBy::AsIs, OrderBy::Declared).unwrap();
    assert_eq!(tree.operation_indices().len(), 3);

    let err = group_operations(&ir, GroupBy::Tags, OrderBy::Declared).unwrap_err();
    assert!(err.to_string().contains("'health'"));
}
