pub mod jugs;
pub mod tiles;

pub use jugs::{JugRules, JugState, WaterJugs};
pub use tiles::{Direction, SlidingTiles, TileBoard};

use anyhow::Result;
use std::fmt::Debug;
use std::hash::Hash;

/// A state space the A* engine can search.
///
/// Every operation must be pure: calling it twice on the same state yields the
/// same answer. Edges have unit cost.
pub trait Problem {
    type State: Clone + Eq + Debug;
    /// Identity used by the explored set. Equal states must map to equal keys.
    type Key: Clone + Eq + Hash + Debug;

    fn equals(&self, a: &Self::State, b: &Self::State) -> bool {
        a == b
    }

    fn key(&self, state: &Self::State) -> Self::Key;

    /// Reject a start state that does not belong to this state space. States
    /// produced by `successors` from a checked state are always valid.
    fn check(&self, _state: &Self::State) -> Result<()> {
        Ok(())
    }

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Every state reachable from `state` in exactly one move.
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    /// Estimate of the remaining number of moves. Optimality of the returned
    /// path needs this to be admissible and consistent.
    fn heuristic(&self, state: &Self::State) -> usize;
}
