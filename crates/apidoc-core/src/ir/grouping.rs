use indexmap::IndexMap;

use super::types::IrSpec;
use crate::config::{GroupBy, OrderBy};
use crate::error::GroupingError;

/// A group of operations, rendered under one heading in the paths section.
///
/// Under [`GroupBy::AsIs`] groups nest like the URL path hierarchy and `name`
/// is the full path of the node. Under [`GroupBy::Tags`] `name` is the tag and
/// `children` is always empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationGroup {
    pub name: String,
    pub description: Option<String>,
    pub operation_indices: Vec<usize>,
    pub children: Vec<OperationGroup>,
}

/// The grouping of every operation of a spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTree {
    pub group_by: GroupBy,
    pub roots: Vec<OperationGroup>,
}

impl GroupTree {
    /// Groups that hold operations, in depth-first traversal order.
    pub fn leaf_groups(&self) -> Vec<&OperationGroup> {
        fn walk<'a>(group: &'a OperationGroup, out: &mut Vec<&'a OperationGroup>) {
            if !group.operation_indices.is_empty() {
                out.push(group);
            }
            for child in &group.children {
                walk(child, out);
            }
        }

        let mut out = Vec::new();
        for root in &self.roots {
            walk(root, &mut out);
        }
        out
    }

    /// Operation indices in rendering order.
    pub fn operation_indices(&self) -> Vec<usize> {
        self.leaf_groups()
            .into_iter()
            .flat_map(|g| g.operation_indices.iter().copied())
            .collect()
    }
}

/// Group operations in the IR spec according to the grouping strategy.
pub fn group_operations(
    ir: &IrSpec,
    group_by: GroupBy,
    ordering: OrderBy,
) -> Result<GroupTree, GroupingError> {
    let roots = match group_by {
        GroupBy::AsIs => group_as_is(ir, ordering),
        GroupBy::Tags => group_by_tags(ir, ordering)?,
    };
    log::debug!(
        "grouped {} operations into {} top-level groups",
        ir.operations.len(),
        roots.len()
    );
    Ok(GroupTree { group_by, roots })
}

#[derive(Default)]
struct PathNode {
    path: String,
    operations: Vec<usize>,
    children: IndexMap<String, PathNode>,
}

impl PathNode {
    fn into_group(self, ir: &IrSpec, ordering: OrderBy) -> OperationGroup {
        let mut children: Vec<(String, PathNode)> = self.children.into_iter().collect();
        if ordering == OrderBy::Alphabetical {
            children.sort_by(|a, b| a.0.cmp(&b.0));
        }
        let mut operation_indices = self.operations;
        sort_operations(ir, &mut operation_indices, ordering);
        OperationGroup {
            name: self.path,
            description: None,
            operation_indices,
            children: children
                .into_iter()
                .map(|(_, node)| node.into_group(ir, ordering))
                .collect(),
        }
    }
}

/// Build a tree mirroring the path segments, children in first-appearance order.
fn group_as_is(ir: &IrSpec, ordering: OrderBy) -> Vec<OperationGroup> {
    let mut root = PathNode {
        path: "/".to_string(),
        ..PathNode::default()
    };

    for (i, op) in ir.operations.iter().enumerate() {
        let mut node = &mut root;
        let mut prefix = String::new();
        for segment in op.path.split('/').filter(|s| !s.is_empty()) {
            prefix.push('/');
            prefix.push_str(segment);
            node = node
                .children
                .entry(segment.to_string())
                .or_insert_with(|| PathNode {
                    path: prefix.clone(),
                    ..PathNode::default()
                });
        }
        node.operations.push(i);
    }

    // Operations on `/` itself form their own group ahead of the tree.
    let root_ops = std::mem::take(&mut root.operations);
    let mut groups = root.into_group(ir, ordering).children;
    if !root_ops.is_empty() {
        let mut operation_indices = root_ops;
        sort_operations(ir, &mut operation_indices, ordering);
        groups.insert(
            0,
            OperationGroup {
                name: "/".to_string(),
                description: None,
                operation_indices,
                children: Vec::new(),
            },
        );
    }
    groups
}

/// One flat group per first tag.
fn group_by_tags(ir: &IrSpec, ordering: OrderBy) -> Result<Vec<OperationGroup>, GroupingError> {
    let mut buckets: IndexMap<&str, Vec<usize>> = ir
        .tags
        .iter()
        .map(|t| (t.name.as_str(), Vec::new()))
        .collect();

    for (i, op) in ir.operations.iter().enumerate() {
        let Some(first) = op.tags.first() else {
            return Err(GroupingError::MissingTag {
                operation: op.name.original.clone(),
                method: op.method.to_string(),
                path: op.path.clone(),
            });
        };
        buckets.entry(first.as_str()).or_default().push(i);
    }

    let mut groups: Vec<OperationGroup> = buckets
        .into_iter()
        .filter(|(_, ops)| !ops.is_empty())
        .map(|(tag, mut operation_indices)| {
            sort_operations(ir, &mut operation_indices, ordering);
            OperationGroup {
                name: tag.to_string(),
                description: ir.tag(tag).and_then(|t| t.description.clone()),
                operation_indices,
                children: Vec::new(),
            }
        })
        .collect();

    if ordering == OrderBy::Alphabetical {
        groups.sort_by(|a, b| a.name.cmp(&b.name));
    }
    Ok(groups)
}

fn sort_operations(ir: &IrSpec, indices: &mut [usize], ordering: OrderBy) {
    match ordering {
        OrderBy::Declared => indices.sort_unstable(),
        OrderBy::Alphabetical => indices.sort_by(|&a, &b| {
            let (a, b) = (&ir.operations[a], &ir.operations[b]);
            a.path
                .cmp(&b.path)
                .then_with(|| a.method.as_str().cmp(b.method.as_str()))
        }),
    }
}
