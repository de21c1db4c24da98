//! Branch selection over a [`MessageTree`].
//!
//! A [`SelectionPath`] records which child is chosen at each branch point.
//! It is sparse: wherever no choice is recorded the first child wins. The
//! mutators in this module never touch their input; they return a fresh
//! path so callers can detect a change by comparing values.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::trace;

use super::tree::{MessageTree, NodeIdx};

/// Serialized key for the top-level (root) choice.
pub const ROOT_KEY: &str = "root";

/// Where a branch choice is made: between roots, or between the children
/// of a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BranchPoint {
    Root,
    Message(String),
}

impl BranchPoint {
    pub fn message(id: impl Into<String>) -> Self {
        BranchPoint::Message(id.into())
    }

    /// The branch point a node is chosen at.
    pub fn of(tree: &MessageTree, node: NodeIdx) -> Self {
        match tree.node(node).parent {
            Some(parent) => BranchPoint::message(tree.message(parent).id()),
            None => BranchPoint::Root,
        }
    }
}

impl fmt::Display for BranchPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchPoint::Root => write!(f, "{ROOT_KEY}"),
            BranchPoint::Message(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct SelectionPath {
    root: Option<String>,
    selected: HashMap<String, String>,
}

impl SelectionPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// The child chosen under `parent_id`, if one was recorded.
    pub fn selected_child(&self, parent_id: &str) -> Option<&str> {
        self.selected.get(parent_id).map(String::as_str)
    }

    pub fn get(&self, at: &BranchPoint) -> Option<&str> {
        match at {
            BranchPoint::Root => self.root(),
            BranchPoint::Message(id) => self.selected_child(id),
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len() + usize::from(self.root.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of this path with `at → child_id` recorded.
    pub fn with(&self, at: &BranchPoint, child_id: &str) -> Self {
        let mut next = self.clone();
        match at {
            BranchPoint::Root => next.root = Some(child_id.to_string()),
            BranchPoint::Message(id) => {
                next.selected.insert(id.clone(), child_id.to_string());
            }
        }
        next
    }

    /// Copy of this path keeping only entries that still name a parent and
    /// one of its children in `tree`.
    pub fn prune(&self, tree: &MessageTree) -> Self {
        let root = self
            .root
            .as_ref()
            .filter(|id| {
                tree.get(id)
                    .is_some_and(|idx| tree.node(idx).parent.is_none())
            })
            .cloned();

        let selected = self
            .selected
            .iter()
            .filter(|(parent_id, child_id)| {
                let (Some(parent), Some(child)) = (tree.get(parent_id), tree.get(child_id)) else {
                    return false;
                };
                tree.node(child).parent == Some(parent)
            })
            .map(|(parent_id, child_id)| (parent_id.clone(), child_id.clone()))
            .collect();

        Self { root, selected }
    }
}

impl From<BTreeMap<String, String>> for SelectionPath {
    fn from(mut map: BTreeMap<String, String>) -> Self {
        let root = map.remove(ROOT_KEY);
        Self {
            root,
            selected: map.into_iter().collect(),
        }
    }
}

impl From<SelectionPath> for BTreeMap<String, String> {
    fn from(path: SelectionPath) -> Self {
        let mut map: BTreeMap<String, String> = path.selected.into_iter().collect();
        if let Some(root) = path.root {
            map.insert(ROOT_KEY.to_string(), root);
        }
        map
    }
}

/// The linear transcript currently shown for `tree` under `path`.
///
/// Starts at the selected root (or the first root) and follows the selected
/// child at every node, falling back to the first child. Stops at a leaf.
pub fn visible_path(tree: &MessageTree, path: &SelectionPath) -> Vec<NodeIdx> {
    let start = path
        .root()
        .and_then(|root_id| {
            tree.roots()
                .iter()
                .copied()
                .find(|&r| tree.message(r).id() == root_id)
        })
        .or_else(|| tree.roots().first().copied());

    let mut visible = Vec::new();
    let mut current = start;
    while let Some(node) = current {
        visible.push(node);
        let children = tree.children(node);
        current = path
            .selected_child(tree.message(node).id())
            .and_then(|child_id| {
                children
                    .iter()
                    .copied()
                    .find(|&c| tree.message(c).id() == child_id)
            })
            .or_else(|| children.first().copied());
    }

    trace!(
        target: "message_path::visible",
        len = visible.len(),
        selections = path.len(),
        "Resolved visible path"
    );
    visible
}

/// Record `child_id` as the choice at `at`, leaving every other entry as is.
pub fn update_path(current: &SelectionPath, at: &BranchPoint, child_id: &str) -> SelectionPath {
    current.with(at, child_id)
}

/// Selections that lead from the target's root down to `target_id`.
///
/// The root choice is left unset; see [`navigate_to_message`] for the
/// variant that also selects the target's root. An unknown target yields an
/// empty path.
pub fn build_path_to_message(tree: &MessageTree, target_id: &str) -> SelectionPath {
    let mut path = SelectionPath::new();
    let Some(mut current) = tree.get(target_id) else {
        return path;
    };

    while let Some(parent_id) = tree.message(current).parent_message_id() {
        let Some(parent) = tree.get(parent_id) else {
            break;
        };
        path.selected
            .insert(parent_id.to_string(), tree.message(current).id().to_string());
        current = parent;
    }
    path
}

/// Like [`build_path_to_message`], but also selects the root the target
/// descends from, so the jump works across independent conversation starts.
pub fn navigate_to_message(tree: &MessageTree, target_id: &str) -> SelectionPath {
    let Some(target) = tree.get(target_id) else {
        return SelectionPath::new();
    };
    let root = tree.root_of(target);
    build_path_to_message(tree, target_id).with(&BranchPoint::Root, tree.message(root).id())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingDirection {
    Previous,
    Next,
}

/// Switch the branch that `node` sits on to its previous or next sibling.
///
/// At either end of the sibling list the path is returned unchanged.
pub fn select_sibling(
    tree: &MessageTree,
    path: &SelectionPath,
    node: NodeIdx,
    direction: SiblingDirection,
) -> SelectionPath {
    let siblings = tree.siblings(node);
    let index = tree.node(node).sibling_index;
    let target = match direction {
        SiblingDirection::Previous => index.checked_sub(1),
        SiblingDirection::Next => Some(index + 1),
    }
    .and_then(|i| siblings.get(i).copied());

    match target {
        Some(sibling) => update_path(
            path,
            &BranchPoint::of(tree, node),
            tree.message(sibling).id(),
        ),
        None => path.clone(),
    }
}

/// "n of m" marker for a node that has alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchIndicator {
    /// 1-based.
    pub position: usize,
    pub total: usize,
}

impl BranchIndicator {
    pub fn for_node(tree: &MessageTree, node: NodeIdx) -> Option<Self> {
        let total = tree.siblings(node).len();
        (total > 1).then(|| BranchIndicator {
            position: tree.node(node).sibling_index + 1,
            total,
        })
    }

    pub fn has_previous(&self) -> bool {
        self.position > 1
    }

    pub fn has_next(&self) -> bool {
        self.position < self.total
    }
}

impl fmt::Display for BranchIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.position, self.total)
    }
}
