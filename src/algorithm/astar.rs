use super::construct_path;
use crate::common::{OpenNode, Path, SearchNode};
use crate::problem::Problem;
use crate::stat::Stats;

use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashSet};
use std::time::Instant;
use tracing::{debug, instrument, trace};

/// Run A* from `initial` and return the states from start to goal, or `None`
/// when the reachable state space holds no goal. Fails if `initial` does not
/// pass [`Problem::check`].
pub fn search<P: Problem>(problem: &P, initial: P::State) -> Result<Option<Path<P::State>>> {
    let mut stats = Stats::default();
    let path = a_star_search(problem, initial, &mut stats)?;
    debug!("{stats:?}");
    Ok(path)
}

/// A* with unit edge costs.
///
/// A state is closed the first time it is expanded and is never re-opened, so
/// the returned path is only guaranteed shortest when the heuristic is both
/// admissible and consistent.
#[instrument(skip_all, name = "a_star", fields(start = format!("{:?}", initial)), level = "debug")]
pub fn a_star_search<P: Problem>(
    problem: &P,
    initial: P::State,
    stats: &mut Stats,
) -> Result<Option<Path<P::State>>> {
    problem.check(&initial).context("invalid start state")?;
    let search_start_time = Instant::now();

    let mut nodes = Vec::new();
    let mut open_list = BTreeSet::new();
    let mut closed_list = HashSet::new();

    open_list.insert(OpenNode {
        f_open_cost: problem.heuristic(&initial),
        node: 0,
    });
    nodes.push(SearchNode::root(initial));
    stats.generated_nodes += 1;
    stats.max_frontier = stats.max_frontier.max(open_list.len());

    while let Some(current) = open_list.pop_first() {
        let node = &nodes[current.node];
        let g_cost = node.cost;
        let key = problem.key(&node.state);

        // The same state can be queued several times; only the first pop expands it.
        if closed_list.contains(&key) {
            stats.stale_nodes += 1;
            continue;
        }

        trace!(
            "expand node: {:?} g: {g_cost} f: {}",
            node.state,
            current.f_open_cost
        );
        stats.expanded_nodes += 1;

        if problem.is_goal(&node.state) {
            stats.cost = g_cost;
            stats.time_us = search_start_time.elapsed().as_micros() as usize;
            debug!("find solution with cost {g_cost}");
            return Ok(Some(construct_path(&nodes, current.node)));
        }

        let successors = problem.successors(&node.state);
        closed_list.insert(key);

        for successor in successors {
            if closed_list.contains(&problem.key(&successor)) {
                stats.pruned_nodes += 1;
                continue;
            }

            let h_open_cost = problem.heuristic(&successor);
            let id = nodes.len();
            nodes.push(SearchNode::child(successor, current.node, g_cost));
            open_list.insert(OpenNode {
                f_open_cost: g_cost + 1 + h_open_cost,
                node: id,
            });
            stats.generated_nodes += 1;
        }
        stats.max_frontier = stats.max_frontier.max(open_list.len());
    }

    stats.time_us = search_start_time.elapsed().as_micros() as usize;
    debug!("cannot find solution");
    Ok(None)
}
