mod node;

pub(crate) use node::{OpenNode, SearchNode};

/// States from the initial state to the goal, both inclusive.
pub type Path<S> = Vec<S>;
