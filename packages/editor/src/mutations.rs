//! # Tree Mutations
//!
//! Pure operations over a component forest.
//!
//! Every operation takes the current forest by reference and returns a new
//! one; the input is never touched. Operations are total: a missing id or a
//! target that cannot own children yields an unchanged copy of the input
//! rather than an error. Callers that want feedback ("select a container
//! first") check preconditions with the query helpers before applying.
//!
//! Searches are depth-first pre-order. Ids are unique within a page, but if
//! that ever fails only the first node encountered is affected.
//!
//! ## Semantics
//!
//! ### Insert
//! - Appends to the root when no parent is given
//! - Appends to the parent's children when the parent is container-capable
//!
//! ### Duplicate
//! - Deep clone with fresh ids throughout, appended to the forest root
//! - New ids are drawn until none collides with an id already in the forest
//!
//! ### Remove
//! - Removes the node and all descendants
//!
//! ### Move
//! - Swaps with the neighbouring sibling; never changes nesting level

use crate::component::{ComponentNode, ComponentPatch, ComponentType, Forest};
use crate::id_generator::IdGenerator;
use crate::templates::Template;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Serializable description of a tree operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Create a node of `component_type` under `parent_id` (or at the root)
    Insert {
        component_type: ComponentType,
        parent_id: Option<String>,
    },

    /// Instantiate a section template under `parent_id` (or at the root)
    InsertTemplate {
        template: Template,
        parent_id: Option<String>,
    },

    /// Shallow-merge fields into a node
    Update {
        node_id: String,
        patch: ComponentPatch,
    },

    /// Set a single style property
    SetStyle {
        node_id: String,
        property: String,
        value: String,
    },

    /// Deep-clone a subtree to the forest root
    Duplicate { node_id: String },

    /// Remove a node and its subtree
    Remove { node_id: String },

    /// Swap a node with its neighbouring sibling
    Move {
        node_id: String,
        direction: Direction,
    },
}

impl Mutation {
    /// Apply to a forest, producing the new forest
    pub fn apply(&self, forest: &[ComponentNode], ids: &mut IdGenerator) -> Forest {
        match self {
            Mutation::Insert {
                component_type,
                parent_id,
            } => insert(forest, *component_type, parent_id.as_deref(), ids),

            Mutation::InsertTemplate {
                template,
                parent_id,
            } => insert_template(forest, *template, parent_id.as_deref(), ids),

            Mutation::Update { node_id, patch } => update(forest, node_id, patch),

            Mutation::SetStyle {
                node_id,
                property,
                value,
            } => set_style(forest, node_id, property, value),

            Mutation::Duplicate { node_id } => duplicate(forest, node_id, ids),

            Mutation::Remove { node_id } => remove(forest, node_id),

            Mutation::Move { node_id, direction } => move_node(forest, node_id, *direction),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::Insert { .. } => "insert",
            Mutation::InsertTemplate { .. } => "insert_template",
            Mutation::Update { .. } => "update",
            Mutation::SetStyle { .. } => "set_style",
            Mutation::Duplicate { .. } => "duplicate",
            Mutation::Remove { .. } => "remove",
            Mutation::Move { .. } => "move",
        }
    }
}

/// Result of applying a mutation through the document store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    /// False when the operation was a structural no-op
    pub changed: bool,
}

// ============================================================================
// Queries
// ============================================================================

/// Depth-first pre-order search by id
pub fn find<'a>(forest: &'a [ComponentNode], id: &str) -> Option<&'a ComponentNode> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(&node.children, id) {
            return Some(found);
        }
    }
    None
}

fn find_mut<'a>(forest: &'a mut [ComponentNode], id: &str) -> Option<&'a mut ComponentNode> {
    for node in forest.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

pub fn contains(forest: &[ComponentNode], id: &str) -> bool {
    find(forest, id).is_some()
}

/// Total number of nodes in the forest
pub fn count(forest: &[ComponentNode]) -> usize {
    forest.iter().map(ComponentNode::subtree_size).sum()
}

/// Size of the subtree rooted at `id` (0 when absent)
pub fn subtree_size(forest: &[ComponentNode], id: &str) -> usize {
    find(forest, id).map_or(0, ComponentNode::subtree_size)
}

/// Every id in pre-order
pub fn all_ids(forest: &[ComponentNode]) -> Vec<String> {
    let mut ids = Vec::new();
    collect_ids(forest, &mut ids);
    ids
}

fn collect_ids(forest: &[ComponentNode], out: &mut Vec<String>) {
    for node in forest {
        out.push(node.id.clone());
        collect_ids(&node.children, out);
    }
}

/// Parent id of `id`: `None` when absent, `Some(None)` for a root node
pub fn parent_of<'a>(forest: &'a [ComponentNode], id: &str) -> Option<Option<&'a str>> {
    if forest.iter().any(|n| n.id == id) {
        return Some(None);
    }
    fn search<'a>(parent: &'a ComponentNode, id: &str) -> Option<&'a str> {
        for child in &parent.children {
            if child.id == id {
                return Some(parent.id.as_str());
            }
            if let Some(found) = search(child, id) {
                return Some(found);
            }
        }
        None
    }
    forest.iter().find_map(|n| search(n, id)).map(Some)
}

/// Whether `parent_id` names a node that accepts inserted children
pub fn accepts_children(forest: &[ComponentNode], parent_id: &str) -> bool {
    find(forest, parent_id).is_some_and(ComponentNode::can_have_children)
}

// ============================================================================
// Operations
// ============================================================================

pub fn insert(
    forest: &[ComponentNode],
    component_type: ComponentType,
    parent_id: Option<&str>,
    ids: &mut IdGenerator,
) -> Forest {
    if let Some(parent_id) = parent_id {
        if !accepts_children(forest, parent_id) {
            return forest.to_vec();
        }
    }
    let mut taken = id_set(forest);
    let node = ComponentNode::new(ids.next_free(&mut taken), component_type);
    append_nodes(forest, vec![node], parent_id)
}

pub fn insert_template(
    forest: &[ComponentNode],
    template: Template,
    parent_id: Option<&str>,
    ids: &mut IdGenerator,
) -> Forest {
    if let Some(parent_id) = parent_id {
        if !accepts_children(forest, parent_id) {
            return forest.to_vec();
        }
    }
    let mut taken = id_set(forest);
    let mut nodes = template.instantiate(ids);
    for node in &mut nodes {
        resolve_collisions(node, ids, &mut taken);
    }
    append_nodes(forest, nodes, parent_id)
}

fn id_set(forest: &[ComponentNode]) -> HashSet<String> {
    all_ids(forest).into_iter().collect()
}

/// Keep ids already unique in `taken`, redraw the rest
fn resolve_collisions(node: &mut ComponentNode, ids: &mut IdGenerator, taken: &mut HashSet<String>) {
    if !taken.insert(node.id.clone()) {
        node.id = ids.next_free(taken);
    }
    for child in &mut node.children {
        resolve_collisions(child, ids, taken);
    }
}

fn append_nodes(forest: &[ComponentNode], nodes: Vec<ComponentNode>, parent_id: Option<&str>) -> Forest {
    let mut out = forest.to_vec();
    match parent_id {
        None => out.extend(nodes),
        Some(parent_id) => match find_mut(&mut out, parent_id) {
            Some(parent) if parent.can_have_children() => parent.children.extend(nodes),
            _ => return forest.to_vec(),
        },
    }
    out
}

pub fn update(forest: &[ComponentNode], id: &str, patch: &ComponentPatch) -> Forest {
    let mut out = forest.to_vec();
    if let Some(node) = find_mut(&mut out, id) {
        patch.merge_into(node);
    }
    out
}

pub fn set_style(forest: &[ComponentNode], id: &str, property: &str, value: &str) -> Forest {
    let mut out = forest.to_vec();
    if let Some(node) = find_mut(&mut out, id) {
        node.styles.insert(property.to_string(), value.to_string());
    }
    out
}

pub fn duplicate(forest: &[ComponentNode], id: &str, ids: &mut IdGenerator) -> Forest {
    let mut out = forest.to_vec();
    if let Some(original) = find(forest, id) {
        let mut clone = original.clone();
        let mut taken = id_set(forest);
        reassign_ids(&mut clone, ids, &mut taken);
        out.push(clone);
    }
    out
}

fn reassign_ids(node: &mut ComponentNode, ids: &mut IdGenerator, taken: &mut HashSet<String>) {
    node.id = ids.next_free(taken);
    for child in &mut node.children {
        reassign_ids(child, ids, taken);
    }
}

pub fn remove(forest: &[ComponentNode], id: &str) -> Forest {
    let mut out = forest.to_vec();
    remove_first(&mut out, id);
    out
}

fn remove_first(nodes: &mut Vec<ComponentNode>, id: &str) -> Option<ComponentNode> {
    for i in 0..nodes.len() {
        if nodes[i].id == id {
            return Some(nodes.remove(i));
        }
        if let Some(removed) = remove_first(&mut nodes[i].children, id) {
            return Some(removed);
        }
    }
    None
}

pub fn move_node(forest: &[ComponentNode], id: &str, direction: Direction) -> Forest {
    let mut out = forest.to_vec();
    swap_with_sibling(&mut out, id, direction);
    out
}

/// Returns true once the node has been located, whether or not it moved
fn swap_with_sibling(nodes: &mut [ComponentNode], id: &str, direction: Direction) -> bool {
    for i in 0..nodes.len() {
        if nodes[i].id == id {
            match direction {
                Direction::Up if i > 0 => nodes.swap(i, i - 1),
                Direction::Down if i + 1 < nodes.len() => nodes.swap(i, i + 1),
                _ => {}
            }
            return true;
        }
        if swap_with_sibling(&mut nodes[i].children, id, direction) {
            return true;
        }
    }
    false
}
