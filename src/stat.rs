use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub cost: usize,
    pub time_us: usize,
    pub expanded_nodes: usize,
    pub generated_nodes: usize,
    // Successors dropped because their state was already explored.
    pub pruned_nodes: usize,
    // Open list entries popped after their state had been explored.
    pub stale_nodes: usize,
    pub max_frontier: usize,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Cost {:?} Time(microseconds) {:?} Expanded nodes: {:?} Generated nodes: {:?} Pruned nodes: {:?} Stale nodes: {:?} Max frontier: {:?}",
            self.cost,
            self.time_us,
            self.expanded_nodes,
            self.generated_nodes,
            self.pruned_nodes,
            self.stale_nodes,
            self.max_frontier
        );
    }
}
