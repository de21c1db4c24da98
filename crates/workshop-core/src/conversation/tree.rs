//! Builds the conversation forest from a flat message list.
//!
//! Nodes live in a single arena and refer to each other by [`NodeIdx`].
//! Parent links are indices, never owning references, so the forest has no
//! ownership cycles. The arena is rebuilt from scratch whenever the message
//! list changes; nothing here is patched incrementally.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use super::message::Message;

/// Position of a node inside a [`MessageTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeIdx(usize);

impl NodeIdx {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub message: Message,
    pub parent: Option<NodeIdx>,
    /// Same-parent messages in input order.
    pub children: Vec<NodeIdx>,
    /// Distance from the node's root; roots sit at depth 0.
    pub depth: usize,
    /// Position within the parent's children (or within the roots).
    pub sibling_index: usize,
}

impl TreeNode {
    pub fn id(&self) -> &str {
        self.message.id()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageTree {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeIdx>,
    index: HashMap<String, NodeIdx>,
    orphans: Vec<Message>,
}

/// One pending node in the depth-first build.
struct Pending {
    input: usize,
    parent: Option<NodeIdx>,
    depth: usize,
    sibling_index: usize,
}

impl MessageTree {
    /// Build the forest from messages in server order.
    ///
    /// Messages without a parent become roots. A message whose parent is not
    /// in the list is an orphan: it and everything below it are left out of
    /// the forest and reported by [`MessageTree::orphans`].
    pub fn build(messages: impl IntoIterator<Item = Message>) -> Self {
        let mut seen = HashSet::new();
        let mut inputs: Vec<Option<Message>> = Vec::new();
        for message in messages {
            if seen.insert(message.message_id.clone()) {
                inputs.push(Some(message));
            } else {
                warn!(
                    target: "message_tree::build",
                    message_id = %message.message_id,
                    "Skipping duplicate message id"
                );
            }
        }

        let mut root_group: Vec<usize> = Vec::new();
        let mut child_groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (input, message) in inputs.iter().enumerate() {
            let Some(message) = message else { continue };
            match message.parent_message_id() {
                None => root_group.push(input),
                Some(parent_id) => child_groups
                    .entry(parent_id.to_string())
                    .or_default()
                    .push(input),
            }
        }

        let mut tree = MessageTree {
            nodes: Vec::with_capacity(inputs.len()),
            ..Self::default()
        };

        let mut stack: Vec<Pending> = root_group
            .iter()
            .enumerate()
            .rev()
            .map(|(sibling_index, &input)| Pending {
                input,
                parent: None,
                depth: 0,
                sibling_index,
            })
            .collect();

        while let Some(pending) = stack.pop() {
            let Some(message) = inputs.get_mut(pending.input).and_then(Option::take) else {
                continue;
            };

            let idx = NodeIdx(tree.nodes.len());
            match pending.parent {
                Some(parent) => tree.nodes[parent.0].children.push(idx),
                None => tree.roots.push(idx),
            }

            if let Some(group) = child_groups.remove(message.id()) {
                stack.extend(
                    group
                        .into_iter()
                        .enumerate()
                        .rev()
                        .map(|(sibling_index, input)| Pending {
                            input,
                            parent: Some(idx),
                            depth: pending.depth + 1,
                            sibling_index,
                        }),
                );
            }

            tree.index.insert(message.message_id.clone(), idx);
            tree.nodes.push(TreeNode {
                message,
                parent: pending.parent,
                children: Vec::new(),
                depth: pending.depth,
                sibling_index: pending.sibling_index,
            });
        }

        tree.orphans = inputs.into_iter().flatten().collect();

        debug!(
            target: "message_tree::build",
            nodes = tree.nodes.len(),
            roots = tree.roots.len(),
            orphans = tree.orphans.len(),
            "Built message tree"
        );
        tree
    }

    pub fn roots(&self) -> &[NodeIdx] {
        &self.roots
    }

    /// Look up a reachable message by id.
    pub fn get(&self, message_id: &str) -> Option<NodeIdx> {
        self.index.get(message_id).copied()
    }

    pub fn contains(&self, message_id: &str) -> bool {
        self.index.contains_key(message_id)
    }

    pub fn node(&self, idx: NodeIdx) -> &TreeNode {
        &self.nodes[idx.0]
    }

    pub fn message(&self, idx: NodeIdx) -> &Message {
        &self.nodes[idx.0].message
    }

    pub fn children(&self, idx: NodeIdx) -> &[NodeIdx] {
        &self.nodes[idx.0].children
    }

    /// All nodes sharing `idx`'s parent, `idx` included.
    pub fn siblings(&self, idx: NodeIdx) -> &[NodeIdx] {
        match self.nodes[idx.0].parent {
            Some(parent) => &self.nodes[parent.0].children,
            None => &self.roots,
        }
    }

    /// Walk from `idx` up to its root, `idx` first.
    pub fn ancestors(&self, idx: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        std::iter::successors(Some(idx), |current| self.nodes[current.0].parent)
    }

    pub fn root_of(&self, idx: NodeIdx) -> NodeIdx {
        self.ancestors(idx).last().unwrap_or(idx)
    }

    /// Messages that were left out of the forest, in input order.
    pub fn orphans(&self) -> &[Message] {
        &self.orphans
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIdx, &TreeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIdx(i), node))
    }
}
