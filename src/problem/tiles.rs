use super::Problem;

use anyhow::{ensure, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Direction the blank cell moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Square sliding-tile board stored row-major, `0` marks the blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileBoard {
    size: usize,
    cells: Vec<usize>,
    blank: usize, // index of the blank in `cells`
}

impl TileBoard {
    pub const BLANK: usize = 0;

    /// Build a board from rows. The board must be square and hold every value
    /// in `0..size * size` exactly once.
    pub fn new(rows: Vec<Vec<usize>>) -> Result<Self> {
        let size = rows.len();
        ensure!(size > 0, "tile board must have at least one row");
        for (index, row) in rows.iter().enumerate() {
            ensure!(
                row.len() == size,
                "tile board must be square: row {index} has {} cells, expected {size}",
                row.len()
            );
        }

        let cells: Vec<usize> = rows.into_iter().flatten().collect();
        ensure!(
            cells.contains(&Self::BLANK),
            "tile board has no blank cell ({})",
            Self::BLANK
        );

        let mut seen = vec![false; cells.len()];
        for &tile in &cells {
            ensure!(
                tile < cells.len(),
                "tile {tile} is out of range for a {size}x{size} board"
            );
            ensure!(!seen[tile], "tile {tile} appears more than once");
            seen[tile] = true;
        }

        let blank = cells
            .iter()
            .position(|&tile| tile == Self::BLANK)
            .unwrap_or_default();
        Ok(TileBoard { size, cells, blank })
    }

    /// The solved board: tiles `0..size * size` in row-major order, blank in
    /// the top left corner.
    pub fn canonical(size: usize) -> Result<Self> {
        ensure!(size > 0, "tile board size must be positive");
        Ok(TileBoard {
            size,
            cells: (0..size * size).collect(),
            blank: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> usize {
        self.cells[row * self.size + col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.cells.chunks(self.size)
    }

    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    /// Board after moving the blank one cell in `direction`, or `None` when the
    /// blank would leave the grid.
    pub fn slide(&self, direction: Direction) -> Option<TileBoard> {
        let (row, col) = self.blank_position();
        let (new_row, new_col) = match direction {
            Direction::Up if row > 0 => (row - 1, col),
            Direction::Down if row + 1 < self.size => (row + 1, col),
            Direction::Left if col > 0 => (row, col - 1),
            Direction::Right if col + 1 < self.size => (row, col + 1),
            _ => return None,
        };

        let target = new_row * self.size + new_col;
        let mut cells = self.cells.clone();
        cells.swap(self.blank, target);
        Some(TileBoard {
            size: self.size,
            cells,
            blank: target,
        })
    }

    /// Random walk of `moves` blank slides starting from this board. The walk
    /// never immediately undoes its previous slide, and the result is always
    /// reachable from (and so solvable towards) the starting board.
    pub fn scramble<R: Rng + ?Sized>(&self, moves: usize, rng: &mut R) -> TileBoard {
        let mut board = self.clone();
        let mut previous: Option<Direction> = None;

        for _ in 0..moves {
            let options: Vec<(Direction, TileBoard)> = Direction::ALL
                .iter()
                .filter(|direction| previous != Some(direction.opposite()))
                .filter_map(|&direction| board.slide(direction).map(|next| (direction, next)))
                .collect();

            match options.choose(rng) {
                Some((direction, next)) => {
                    previous = Some(*direction);
                    board = next.clone();
                }
                None => break,
            }
        }

        board
    }
}

impl fmt::Display for TileBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|tile| tile.to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Sliding-tile puzzle towards a fixed goal board.
#[derive(Debug, Clone)]
pub struct SlidingTiles {
    goal: TileBoard,
    goal_positions: Vec<(usize, usize)>, // indexed by tile
}

impl SlidingTiles {
    /// Puzzle of the given size towards the canonical goal.
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self::with_goal(TileBoard::canonical(size)?))
    }

    pub fn with_goal(goal: TileBoard) -> Self {
        let mut goal_positions = vec![(0, 0); goal.cells.len()];
        for (index, &tile) in goal.cells.iter().enumerate() {
            goal_positions[tile] = (index / goal.size, index % goal.size);
        }
        SlidingTiles {
            goal,
            goal_positions,
        }
    }

    pub fn goal(&self) -> &TileBoard {
        &self.goal
    }

    pub fn size(&self) -> usize {
        self.goal.size
    }

    /// Every move swaps the blank with a neighbour, flipping both the parity of
    /// the board-to-goal permutation and the parity of the blank's distance to
    /// its goal cell. A board is solvable iff those two parities agree.
    pub fn is_solvable(&self, board: &TileBoard) -> bool {
        if board.size != self.goal.size {
            return false;
        }

        let len = board.cells.len();
        let mut visited = vec![false; len];
        let mut transpositions: usize = 0;
        for start in 0..len {
            let mut cycle_len: usize = 0;
            let mut index = start;
            while !visited[index] {
                visited[index] = true;
                let (row, col) = self.goal_positions[board.cells[index]];
                index = row * board.size + col;
                cycle_len += 1;
            }
            transpositions += cycle_len.saturating_sub(1);
        }

        let (row, col) = board.blank_position();
        let (goal_row, goal_col) = self.goal_positions[TileBoard::BLANK];
        let blank_distance = row.abs_diff(goal_row) + col.abs_diff(goal_col);

        transpositions % 2 == blank_distance % 2
    }
}

impl Problem for SlidingTiles {
    type State = TileBoard;
    type Key = Vec<usize>;

    fn key(&self, state: &TileBoard) -> Vec<usize> {
        state.cells.clone()
    }

    fn check(&self, board: &TileBoard) -> Result<()> {
        ensure!(
            board.size == self.goal.size,
            "board is {0}x{0} but the goal is {1}x{1}",
            board.size,
            self.goal.size
        );
        Ok(())
    }

    fn is_goal(&self, state: &TileBoard) -> bool {
        state.cells == self.goal.cells
    }

    fn successors(&self, state: &TileBoard) -> Vec<TileBoard> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| state.slide(direction))
            .collect()
    }

    // Sum of Manhattan distances of the non-blank tiles.
    fn heuristic(&self, state: &TileBoard) -> usize {
        state
            .cells
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != TileBoard::BLANK)
            .map(|(index, &tile)| {
                let (goal_row, goal_col) = self.goal_positions[tile];
                (index / state.size).abs_diff(goal_row) + (index % state.size).abs_diff(goal_col)
            })
            .sum()
    }
}
