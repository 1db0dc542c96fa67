mod astar;

pub use astar::{a_star_search, search};

use crate::common::{Path, SearchNode};

// Walk parent handles from `current` back to the root.
fn construct_path<S: Clone>(nodes: &[SearchNode<S>], mut current: usize) -> Path<S> {
    let mut path = vec![nodes[current].state.clone()];
    while let Some(parent) = nodes[current].parent {
        path.push(nodes[parent].state.clone());
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_path_follows_parents() {
        let nodes = vec![
            SearchNode::root("a"),
            SearchNode::child("b", 0, 0),
            SearchNode::child("c", 0, 0),
            SearchNode::child("d", 2, 1),
        ];
        assert_eq!(construct_path(&nodes, 3), vec!["a", "c", "d"]);
        assert_eq!(construct_path(&nodes, 1), vec!["a", "b"]);
        assert_eq!(construct_path(&nodes, 0), vec!["a"]);
    }
}
