mod layout;
mod message;
mod path;
mod session;
mod tree;

#[cfg(test)]
mod tests;

pub use layout::{GraphEdge, GraphLayout, GraphNode};
pub use message::{Message, MessageListing, SenderRole};
pub use path::{
    BranchIndicator, BranchPoint, ROOT_KEY, SelectionPath, SiblingDirection,
    build_path_to_message, navigate_to_message, select_sibling, update_path, visible_path,
};
pub use session::ConversationView;
pub use tree::{MessageTree, NodeIdx, TreeNode};
