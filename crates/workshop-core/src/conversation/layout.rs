//! Grid layout of the whole conversation forest for the minimap.
//!
//! Every node gets a `level` (its depth) and a `column`. Leaves take the
//! next free column; a parent sits at the midpoint of its first and last
//! child's columns. Roots are laid out left to right and never share
//! columns. Pixel sizes are the renderer's business.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::tree::{MessageTree, NodeIdx};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    #[serde(skip)]
    pub node: NodeIdx,
    pub message_id: String,
    pub parent_message_id: Option<String>,
    pub level: usize,
    pub column: usize,
    pub is_visible: bool,
    pub has_children: bool,
    pub siblings: Vec<String>,
    pub sibling_index: usize,
}

/// Line between two entries of [`GraphLayout::graph_nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub parent: usize,
    pub child: usize,
    /// Both ends are on the visible path.
    pub on_visible_path: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphLayout {
    /// Sorted by `(level, column)`.
    pub graph_nodes: Vec<GraphNode>,
    pub max_column: usize,
}

impl GraphLayout {
    /// Lay out every node of `tree`, flagging those in `visible`.
    pub fn compute(tree: &MessageTree, visible: &[NodeIdx]) -> Self {
        let columns = assign_columns(tree);
        let visible: HashSet<NodeIdx> = visible.iter().copied().collect();

        let mut graph_nodes: Vec<GraphNode> = tree
            .iter()
            .map(|(idx, node)| GraphNode {
                node: idx,
                message_id: node.id().to_string(),
                parent_message_id: node
                    .parent
                    .map(|parent| tree.message(parent).id().to_string()),
                level: node.depth,
                column: columns[idx.index()],
                is_visible: visible.contains(&idx),
                has_children: node.has_children(),
                siblings: tree
                    .siblings(idx)
                    .iter()
                    .map(|&s| tree.message(s).id().to_string())
                    .collect(),
                sibling_index: node.sibling_index,
            })
            .collect();
        graph_nodes.sort_by_key(|n| (n.level, n.column));

        let max_column = graph_nodes.iter().map(|n| n.column).max().unwrap_or(0);

        debug!(
            target: "message_graph::layout",
            nodes = graph_nodes.len(),
            max_column,
            visible = visible.len(),
            "Computed graph layout"
        );

        Self {
            graph_nodes,
            max_column,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.graph_nodes.is_empty()
    }

    /// Row of a message in the naive one-row-per-node scheme.
    pub fn row_of(&self, message_id: &str) -> Option<usize> {
        self.graph_nodes
            .iter()
            .position(|n| n.message_id == message_id)
    }

    pub fn max_level(&self) -> usize {
        self.graph_nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }

    pub fn edges(&self) -> Vec<GraphEdge> {
        let rows: HashMap<&str, usize> = self
            .graph_nodes
            .iter()
            .enumerate()
            .map(|(row, n)| (n.message_id.as_str(), row))
            .collect();

        self.graph_nodes
            .iter()
            .enumerate()
            .filter_map(|(child, node)| {
                let parent = rows.get(node.parent_message_id.as_deref()?).copied()?;
                Some(GraphEdge {
                    parent,
                    child,
                    on_visible_path: self.graph_nodes[parent].is_visible && node.is_visible,
                })
            })
            .collect()
    }
}

/// Column per arena slot, computed with an explicit post-order walk.
fn assign_columns(tree: &MessageTree) -> Vec<usize> {
    let mut columns = vec![0; tree.len()];
    let mut next_column = 0;

    for &root in tree.roots() {
        let mut stack = vec![(root, false)];
        while let Some((node, children_done)) = stack.pop() {
            let children = tree.children(node);
            match (children.first(), children.last()) {
                (Some(&first), Some(&last)) if children_done => {
                    columns[node.index()] = (columns[first.index()] + columns[last.index()]) / 2;
                }
                (Some(_), Some(_)) => {
                    stack.push((node, true));
                    stack.extend(children.iter().rev().map(|&child| (child, false)));
                }
                _ => {
                    columns[node.index()] = next_column;
                    next_column += 1;
                }
            }
        }
    }
    columns
}
