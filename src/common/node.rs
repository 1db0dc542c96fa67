use std::cmp::Ordering;

/// Arena handle of a search node.
pub(crate) type NodeId = usize;

#[derive(Debug, Clone)]
pub(crate) struct SearchNode<S> {
    pub(crate) state: S,
    pub(crate) cost: usize, // number of moves from the initial state
    pub(crate) parent: Option<NodeId>,
}

impl<S> SearchNode<S> {
    pub(crate) fn root(state: S) -> Self {
        SearchNode {
            state,
            cost: 0,
            parent: None,
        }
    }

    pub(crate) fn child(state: S, parent: NodeId, parent_cost: usize) -> Self {
        SearchNode {
            state,
            cost: parent_cost + 1,
            parent: Some(parent),
        }
    }
}

// Open list entry. The node id doubles as the insertion sequence number, so
// two entries never compare equal and ties on f cost pop oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenNode {
    pub(crate) f_open_cost: usize,
    pub(crate) node: NodeId,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_open_cost
            .cmp(&other.f_open_cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
