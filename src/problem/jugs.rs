use super::Problem;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fmt;

/// Fill level of every jug, in jug order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JugState {
    levels: Vec<usize>,
}

impl JugState {
    pub fn new(levels: Vec<usize>) -> Self {
        JugState { levels }
    }

    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    pub fn total(&self) -> usize {
        self.levels.iter().sum()
    }
}

impl fmt::Display for JugState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let levels: Vec<String> = self.levels.iter().map(|level| level.to_string()).collect();
        write!(f, "({})", levels.join(", "))
    }
}

/// Moves allowed besides pouring between jugs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JugRules {
    /// Only pour from one jug into another. Total volume never changes.
    #[default]
    PourOnly,
    /// Also fill a jug to capacity from a tap, or empty it onto the ground.
    WithTap,
}

/// Jug-pouring puzzle towards an exact target configuration.
///
/// The heuristic is the summed distance of every jug from its target level.
/// It is not admissible in general: one pour changes two jugs at once, so the
/// paths found are valid but not guaranteed to be shortest.
#[derive(Debug, Clone)]
pub struct WaterJugs {
    capacities: Vec<usize>,
    target: JugState,
    rules: JugRules,
}

impl WaterJugs {
    pub fn new(capacities: Vec<usize>, target: JugState) -> Result<Self> {
        ensure!(!capacities.is_empty(), "jug puzzle needs at least one jug");
        let puzzle = WaterJugs {
            capacities,
            target,
            rules: JugRules::PourOnly,
        };
        puzzle
            .check_levels(&puzzle.target)
            .context("invalid target")?;
        Ok(puzzle)
    }

    pub fn with_rules(mut self, rules: JugRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn capacities(&self) -> &[usize] {
        &self.capacities
    }

    pub fn target(&self) -> &JugState {
        &self.target
    }

    pub fn rules(&self) -> JugRules {
        self.rules
    }

    fn check_levels(&self, state: &JugState) -> Result<()> {
        ensure!(
            state.levels.len() == self.capacities.len(),
            "expected {} jug levels, got {}",
            self.capacities.len(),
            state.levels.len()
        );
        for (jug, (&level, &capacity)) in state.levels.iter().zip(&self.capacities).enumerate() {
            ensure!(
                level <= capacity,
                "jug {jug} holds {level} but its capacity is {capacity}"
            );
        }
        Ok(())
    }

    fn pour(&self, state: &JugState, from: usize, to: usize) -> JugState {
        let amount = state.levels[from].min(self.capacities[to] - state.levels[to]);
        let mut levels = state.levels.clone();
        levels[from] -= amount;
        levels[to] += amount;
        JugState { levels }
    }

    fn set_level(state: &JugState, jug: usize, level: usize) -> JugState {
        let mut levels = state.levels.clone();
        levels[jug] = level;
        JugState { levels }
    }
}

impl Problem for WaterJugs {
    type State = JugState;
    type Key = Vec<usize>;

    fn key(&self, state: &JugState) -> Vec<usize> {
        state.levels.clone()
    }

    fn check(&self, state: &JugState) -> Result<()> {
        self.check_levels(state)
    }

    fn is_goal(&self, state: &JugState) -> bool {
        *state == self.target
    }

    // Zero-amount pours (and fills or empties) are kept; they reproduce the
    // current state, which the explored set filters out.
    fn successors(&self, state: &JugState) -> Vec<JugState> {
        let jugs = self.capacities.len();
        let mut successors = Vec::with_capacity(jugs * (jugs + 1));

        for from in 0..jugs {
            for to in 0..jugs {
                if from != to {
                    successors.push(self.pour(state, from, to));
                }
            }
        }

        if self.rules == JugRules::WithTap {
            for (jug, &capacity) in self.capacities.iter().enumerate() {
                successors.push(Self::set_level(state, jug, capacity));
                successors.push(Self::set_level(state, jug, 0));
            }
        }

        successors
    }

    fn heuristic(&self, state: &JugState) -> usize {
        state
            .levels
            .iter()
            .zip(&self.target.levels)
            .map(|(level, target)| level.abs_diff(*target))
            .sum()
    }
}
