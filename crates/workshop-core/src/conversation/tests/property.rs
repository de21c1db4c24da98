use crate::conversation::{
    BranchPoint, GraphLayout, Message, MessageTree, NodeIdx, SelectionPath, SenderRole,
    build_path_to_message, navigate_to_message, update_path, visible_path,
};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

/// Parent choice for the message at position `i`.
#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Missing,
    Earlier(usize),
}

fn arb_links() -> impl Strategy<Value = Vec<Link>> {
    prop::collection::vec((0u8..10, any::<usize>()), 1..48).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (kind, pick))| match kind {
                _ if i == 0 => Link::Root,
                0 => Link::Root,
                1 => Link::Missing,
                _ => Link::Earlier(pick % i),
            })
            .collect()
    })
}

fn messages_from(links: &[Link]) -> Vec<Message> {
    links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let parent = match link {
                Link::Root => None,
                Link::Missing => Some(format!("missing_{i}")),
                Link::Earlier(p) => Some(format!("m{p}")),
            };
            Message::new(format!("m{i}"), parent.as_deref(), SenderRole::User, "")
        })
        .collect()
}

/// Which input positions have a complete ancestor chain.
fn expected_reachable(links: &[Link]) -> Vec<bool> {
    let mut reachable: Vec<bool> = Vec::with_capacity(links.len());
    for link in links {
        let ok = match link {
            Link::Root => true,
            Link::Missing => false,
            Link::Earlier(p) => reachable[*p],
        };
        reachable.push(ok);
    }
    reachable
}

fn ids(tree: &MessageTree, path: &[NodeIdx]) -> Vec<String> {
    path.iter()
        .map(|&n| tree.message(n).id().to_string())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_complete_chains_are_reachable_exactly_once(links in arb_links()) {
        let tree = MessageTree::build(messages_from(&links));
        let reachable = expected_reachable(&links);

        for (i, ok) in reachable.iter().enumerate() {
            prop_assert_eq!(tree.contains(&format!("m{i}")), *ok);
        }
        prop_assert_eq!(tree.len(), reachable.iter().filter(|ok| **ok).count());
        prop_assert_eq!(tree.len() + tree.orphans().len(), links.len());

        let mut seen = HashSet::new();
        for (_, node) in tree.iter() {
            prop_assert!(seen.insert(node.id().to_string()));
        }
    }

    #[test]
    fn prop_default_path_is_total_and_follows_first_children(links in arb_links()) {
        let tree = MessageTree::build(messages_from(&links));
        let path = visible_path(&tree, &SelectionPath::new());

        prop_assert!(!path.is_empty());
        prop_assert_eq!(path[0], tree.roots()[0]);
        for pair in path.windows(2) {
            prop_assert_eq!(tree.children(pair[0]).first().copied(), Some(pair[1]));
        }
        let last = path[path.len() - 1];
        prop_assert!(tree.children(last).is_empty());
    }

    #[test]
    fn prop_navigation_reaches_every_node(links in arb_links()) {
        let tree = MessageTree::build(messages_from(&links));

        for (target, node) in tree.iter() {
            let root = tree.root_of(target);
            let partial = build_path_to_message(&tree, node.id());
            prop_assert_eq!(partial.root(), None);

            let with_root = update_path(&partial, &BranchPoint::Root, tree.message(root).id());
            prop_assert!(visible_path(&tree, &with_root).contains(&target));
            prop_assert_eq!(&navigate_to_message(&tree, node.id()), &with_root);
        }
    }

    #[test]
    fn prop_selected_child_follows_its_parent(links in arb_links()) {
        let tree = MessageTree::build(messages_from(&links));

        for (parent, node) in tree.iter() {
            for &child in &node.children {
                let base = navigate_to_message(&tree, node.id());
                let selected = update_path(
                    &base,
                    &BranchPoint::message(node.id()),
                    tree.message(child).id(),
                );
                let visible = visible_path(&tree, &selected);
                let at = visible.iter().position(|&n| n == parent);
                prop_assert!(at.is_some());
                if let Some(at) = at {
                    prop_assert_eq!(visible.get(at + 1).copied(), Some(child));
                }
                prop_assert_ne!(&base, &selected);
            }
        }
    }

    #[test]
    fn prop_layout_centers_parents_and_separates_roots(links in arb_links()) {
        let tree = MessageTree::build(messages_from(&links));
        let layout = GraphLayout::compute(&tree, &visible_path(&tree, &SelectionPath::new()));

        let columns: HashMap<NodeIdx, usize> =
            layout.graph_nodes.iter().map(|n| (n.node, n.column)).collect();

        for (idx, node) in tree.iter() {
            if let (Some(first), Some(last)) = (node.children.first(), node.children.last()) {
                prop_assert_eq!(columns[&idx], (columns[first] + columns[last]) / 2);
            }
        }

        let mut spans: Vec<(usize, usize)> = Vec::new();
        for &root in tree.roots() {
            let subtree: Vec<usize> = tree
                .iter()
                .filter(|(idx, _)| tree.root_of(*idx) == root)
                .map(|(idx, _)| columns[&idx])
                .collect();
            let lo = subtree.iter().copied().min().unwrap_or(0);
            let hi = subtree.iter().copied().max().unwrap_or(0);
            spans.push((lo, hi));
        }
        for pair in spans.windows(2) {
            prop_assert!(pair[0].1 < pair[1].0);
        }

        let order: Vec<(usize, usize)> =
            layout.graph_nodes.iter().map(|n| (n.level, n.column)).collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        prop_assert_eq!(order, sorted);
        prop_assert_eq!(
            layout.max_column,
            layout.graph_nodes.iter().map(|n| n.column).max().unwrap_or(0)
        );
    }
}

#[test]
fn documented_scenario() {
    let tree = MessageTree::build(messages_from(&[
        Link::Root,
        Link::Earlier(0),
        Link::Earlier(0),
        Link::Earlier(1),
    ]));

    assert_eq!(ids(&tree, tree.roots()), vec!["m0"]);
    let m0 = tree.roots()[0];
    assert_eq!(ids(&tree, tree.children(m0)), vec!["m1", "m2"]);
    assert_eq!(
        ids(&tree, &visible_path(&tree, &SelectionPath::new())),
        vec!["m0", "m1", "m3"]
    );

    let switched = update_path(&SelectionPath::new(), &BranchPoint::message("m0"), "m2");
    assert_eq!(ids(&tree, &visible_path(&tree, &switched)), vec!["m0", "m2"]);

    let to_m3 = build_path_to_message(&tree, "m3");
    assert_eq!(to_m3.selected_child("m0"), Some("m1"));
    assert_eq!(to_m3.selected_child("m1"), Some("m3"));
    assert_eq!(to_m3.root(), None);
}
