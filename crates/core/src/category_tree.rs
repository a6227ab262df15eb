//! Assembly of the flat category table into a sorted forest.
//!
//! Categories reference their parent by id. A category whose parent does not
//! exist is an orphan: it is left out of the forest (together with its own
//! subtree) without failing the request. The same happens to categories
//! nested deeper than [`MAX_TREE_DEPTH`] levels.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::types::DbId;

/// Number of levels placed in the forest, roots included.
pub const MAX_TREE_DEPTH: usize = 128;

/// One category row as fetched for tree assembly, with optional aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub level: i32,
    pub path: String,
    pub attribute_count: Option<i64>,
    pub product_count: Option<i64>,
}

/// A category with its (recursively sorted) children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeNode {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub level: i32,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<i64>,
    pub children: Vec<CategoryTreeNode>,
}

/// Result of [`build_tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTree {
    pub roots: Vec<CategoryTreeNode>,
    /// Number of records passed in, orphans included.
    pub total: usize,
    /// Number of records that could not be attached under any root.
    pub detached: usize,
}

/// Build the category forest from flat records.
///
/// Roots are the records without a parent. Every other record is attached to
/// its parent; records whose parent chain never reaches a root, or reaches it
/// through more than [`MAX_TREE_DEPTH`] levels, are counted in
/// [`CategoryTree::detached`] and omitted. Roots and every children list
/// are sorted with [`compare_names`].
pub fn build_tree(records: Vec<CategoryRecord>) -> CategoryTree {
    let total = records.len();

    let mut children_of: HashMap<DbId, Vec<CategoryRecord>> = HashMap::new();
    let mut root_records = Vec::new();
    for record in records {
        match record.parent_id {
            None => root_records.push(record),
            Some(parent_id) => children_of.entry(parent_id).or_default().push(record),
        }
    }

    let mut attached = 0;
    let mut roots: Vec<CategoryTreeNode> = root_records
        .into_iter()
        .map(|record| attach(record, 0, &mut children_of, &mut attached))
        .collect();
    roots.sort_by(compare_nodes);

    CategoryTree {
        roots,
        total,
        detached: total - attached,
    }
}

/// Turn `record` into a node, consuming its children from `children_of`.
///
/// Each parent's child list is removed from the map when visited, so no
/// record can be placed twice. Recursion stops at [`MAX_TREE_DEPTH`]; the
/// deeper records stay in the map and are never attached.
fn attach(
    record: CategoryRecord,
    depth: usize,
    children_of: &mut HashMap<DbId, Vec<CategoryRecord>>,
    attached: &mut usize,
) -> CategoryTreeNode {
    *attached += 1;

    let mut children: Vec<CategoryTreeNode> = if depth + 1 < MAX_TREE_DEPTH {
        children_of
            .remove(&record.id)
            .unwrap_or_default()
            .into_iter()
            .map(|child| attach(child, depth + 1, children_of, attached))
            .collect()
    } else {
        Vec::new()
    };
    children.sort_by(compare_nodes);

    CategoryTreeNode {
        id: record.id,
        name: record.name,
        parent_id: record.parent_id,
        level: record.level,
        path: record.path,
        attribute_count: record.attribute_count,
        product_count: record.product_count,
        children,
    }
}

fn compare_nodes(a: &CategoryTreeNode, b: &CategoryTreeNode) -> Ordering {
    compare_names(&a.name, &b.name).then(a.id.cmp(&b.id))
}

/// Case-insensitive name ordering, falling back to exact comparison so the
/// result is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Total number of nodes in a forest.
pub fn count_nodes(nodes: &[CategoryTreeNode]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + count_nodes(&node.children))
        .sum()
}
