use tracing::debug;

use super::layout::GraphLayout;
use super::message::Message;
use super::path::{
    BranchIndicator, BranchPoint, SelectionPath, SiblingDirection, navigate_to_message,
    select_sibling, update_path, visible_path,
};
use super::tree::{MessageTree, NodeIdx};

/// Owner of one open conversation: its forest and its branch selection.
///
/// The forest is rebuilt whole on every [`ConversationView::replace_messages`];
/// `generation` counts those rebuilds so callers can memoize derived views.
/// All selection changes go through the path mutators and replace the held
/// selection, so the last change applied wins.
#[derive(Debug, Clone, Default)]
pub struct ConversationView {
    tree: MessageTree,
    selection: SelectionPath,
    generation: u64,
}

impl ConversationView {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            tree: MessageTree::build(messages),
            selection: SelectionPath::new(),
            generation: 0,
        }
    }

    pub fn tree(&self) -> &MessageTree {
        &self.tree
    }

    pub fn selection(&self) -> &SelectionPath {
        &self.selection
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap in a new message list, rebuilding the forest from scratch.
    ///
    /// Selections that no longer name a parent/child pair are dropped.
    pub fn replace_messages(&mut self, messages: Vec<Message>) {
        self.tree = MessageTree::build(messages);
        self.selection = self.selection.prune(&self.tree);
        self.generation += 1;
        debug!(
            target: "conversation_view::replace_messages",
            generation = self.generation,
            nodes = self.tree.len(),
            "Rebuilt conversation tree"
        );
    }

    pub fn select_branch(&mut self, at: &BranchPoint, child_id: &str) {
        self.selection = update_path(&self.selection, at, child_id);
    }

    /// Move the branch containing `message_id` one sibling over.
    ///
    /// Returns false when the message is not in the tree or there is no
    /// sibling in that direction.
    pub fn select_sibling(&mut self, message_id: &str, direction: SiblingDirection) -> bool {
        let Some(node) = self.tree.get(message_id) else {
            return false;
        };
        let next = select_sibling(&self.tree, &self.selection, node, direction);
        let changed = next != self.selection;
        self.selection = next;
        changed
    }

    /// Show the branch that contains `message_id`, switching roots if needed.
    ///
    /// Unknown ids leave the selection untouched and return false.
    pub fn navigate_to(&mut self, message_id: &str) -> bool {
        if !self.tree.contains(message_id) {
            debug!(
                target: "conversation_view::navigate_to",
                message_id,
                "Ignoring navigation to unknown message"
            );
            return false;
        }
        self.selection = navigate_to_message(&self.tree, message_id);
        true
    }

    pub fn visible_path(&self) -> Vec<NodeIdx> {
        visible_path(&self.tree, &self.selection)
    }

    /// Messages of the visible path, top to bottom.
    pub fn transcript(&self) -> Vec<&Message> {
        self.visible_path()
            .into_iter()
            .map(|node| self.tree.message(node))
            .collect()
    }

    /// Visible nodes that have alternatives, with their "n/m" marker.
    pub fn branch_indicators(&self) -> Vec<(NodeIdx, BranchIndicator)> {
        self.visible_path()
            .into_iter()
            .filter_map(|node| {
                BranchIndicator::for_node(&self.tree, node).map(|indicator| (node, indicator))
            })
            .collect()
    }

    pub fn layout(&self) -> GraphLayout {
        GraphLayout::compute(&self.tree, &self.visible_path())
    }
}
