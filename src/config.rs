use crate::problem::{JugRules, JugState, Problem, SlidingTiles, TileBoard, WaterJugs};

use anyhow::{bail, ensure, Context};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(
    name = "Puzzle A*",
    about = "A* search over sliding-tile and water-jug puzzles.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to the YAML puzzle config file")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub puzzle: Option<PuzzleCommand>,
}

#[derive(Subcommand, Debug)]
pub enum PuzzleCommand {
    /// Solve a sliding-tile puzzle.
    Tiles {
        #[arg(long, help = "Start board, rows separated by '/', e.g. 1,2,3/4,0,5/6,7,8")]
        board: Option<String>,

        #[arg(long, help = "Goal board, defaults to 0..n*n in row-major order")]
        goal: Option<String>,

        #[arg(
            long,
            conflicts_with = "board",
            help = "Start from the goal scrambled by this many random moves"
        )]
        scramble: Option<usize>,

        #[arg(long, help = "Board size for a scrambled canonical goal")]
        size: Option<usize>,

        #[arg(long, help = "Seed for the random number generator")]
        seed: Option<u64>,
    },
    /// Solve a water-jug puzzle.
    Jugs {
        #[arg(long, value_delimiter = ',', help = "Jug capacities, e.g. 4,3")]
        capacities: Option<Vec<usize>>,

        #[arg(long, value_delimiter = ',', help = "Start fill levels")]
        start: Option<Vec<usize>>,

        #[arg(long, value_delimiter = ',', help = "Target fill levels")]
        target: Option<Vec<usize>>,

        #[arg(
            long,
            help = "Also allow filling a jug from the tap and emptying it",
            default_value_t = false
        )]
        tap: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TilesConfig {
    pub board: Option<Vec<Vec<usize>>>,
    pub goal: Option<Vec<Vec<usize>>>,
    pub scramble: Option<usize>,
    pub size: usize,
    pub seed: u64,
}

impl Default for TilesConfig {
    fn default() -> Self {
        TilesConfig {
            board: None,
            goal: None,
            scramble: None,
            size: 3,
            seed: 0,
        }
    }
}

impl TilesConfig {
    pub fn build(&self) -> anyhow::Result<(SlidingTiles, TileBoard)> {
        let goal = match (&self.goal, &self.board) {
            (Some(rows), _) => TileBoard::new(rows.clone()).context("invalid goal board")?,
            (None, Some(rows)) => TileBoard::canonical(rows.len())?,
            (None, None) => TileBoard::canonical(self.size)?,
        };

        let start = match (&self.board, self.scramble) {
            (Some(rows), _) => TileBoard::new(rows.clone()).context("invalid start board")?,
            (None, Some(moves)) => goal.scramble(moves, &mut StdRng::seed_from_u64(self.seed)),
            (None, None) => bail!("tiles config needs either a board or a scramble count"),
        };

        let puzzle = SlidingTiles::with_goal(goal);
        puzzle.check(&start)?;
        Ok((puzzle, start))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct JugsConfig {
    pub capacities: Vec<usize>,
    pub start: Vec<usize>,
    pub target: Vec<usize>,
    pub rules: JugRules,
}

impl Default for JugsConfig {
    fn default() -> Self {
        JugsConfig {
            capacities: vec![4, 3],
            start: vec![0, 0],
            target: vec![2, 0],
            rules: JugRules::PourOnly,
        }
    }
}

impl JugsConfig {
    pub fn build(&self) -> anyhow::Result<(WaterJugs, JugState)> {
        let puzzle = WaterJugs::new(self.capacities.clone(), JugState::new(self.target.clone()))?
            .with_rules(self.rules);
        let start = JugState::new(self.start.clone());
        puzzle.check(&start).context("invalid start")?;
        Ok((puzzle, start))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PuzzleConfig {
    Tiles(TilesConfig),
    Jugs(JugsConfig),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub puzzle: PuzzleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            puzzle: PuzzleConfig::Tiles(TilesConfig {
                board: Some(vec![vec![1, 2, 3], vec![4, 0, 5], vec![6, 7, 8]]),
                ..TilesConfig::default()
            }),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("failed to parse YAML config")
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        match &cli.puzzle {
            None => {}
            Some(PuzzleCommand::Tiles {
                board,
                goal,
                scramble,
                size,
                seed,
            }) => {
                let mut tiles = match self.puzzle {
                    PuzzleConfig::Tiles(tiles) => tiles,
                    PuzzleConfig::Jugs(_) => TilesConfig::default(),
                };
                if let Some(board) = board {
                    tiles.board = Some(parse_grid(board).context("invalid --board")?);
                    tiles.scramble = None;
                }
                if let Some(goal) = goal {
                    tiles.goal = Some(parse_grid(goal).context("invalid --goal")?);
                }
                if let Some(scramble) = scramble {
                    tiles.scramble = Some(*scramble);
                    tiles.board = None;
                }
                if let Some(size) = size {
                    tiles.size = *size;
                }
                if let Some(seed) = seed {
                    tiles.seed = *seed;
                }
                self.puzzle = PuzzleConfig::Tiles(tiles);
            }
            Some(PuzzleCommand::Jugs {
                capacities,
                start,
                target,
                tap,
            }) => {
                let mut jugs = match self.puzzle {
                    PuzzleConfig::Jugs(jugs) => jugs,
                    PuzzleConfig::Tiles(_) => JugsConfig::default(),
                };
                if let Some(capacities) = capacities {
                    jugs.capacities = capacities.clone();
                }
                if let Some(start) = start {
                    jugs.start = start.clone();
                }
                if let Some(target) = target {
                    jugs.target = target.clone();
                }
                if *tap {
                    jugs.rules = JugRules::WithTap;
                }
                self.puzzle = PuzzleConfig::Jugs(jugs);
            }
        }
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match &self.puzzle {
            PuzzleConfig::Tiles(tiles) => {
                ensure!(
                    tiles.board.is_some() != tiles.scramble.is_some(),
                    "tiles config needs exactly one of `board` or `scramble`"
                );
                ensure!(tiles.size > 0, "board size must be positive");
            }
            PuzzleConfig::Jugs(jugs) => {
                ensure!(!jugs.capacities.is_empty(), "jug capacities must not be empty");
                ensure!(
                    jugs.start.len() == jugs.capacities.len(),
                    "start has {} levels but there are {} jugs",
                    jugs.start.len(),
                    jugs.capacities.len()
                );
                ensure!(
                    jugs.target.len() == jugs.capacities.len(),
                    "target has {} levels but there are {} jugs",
                    jugs.target.len(),
                    jugs.capacities.len()
                );
            }
        }
        Ok(())
    }
}

/// Parse a grid written as `1,2,3/4,0,5/6,7,8`.
pub fn parse_grid(text: &str) -> anyhow::Result<Vec<Vec<usize>>> {
    text.split('/')
        .map(|row| {
            row.split(',')
                .map(|cell| {
                    cell.trim()
                        .parse::<usize>()
                        .with_context(|| format!("invalid tile {:?}", cell.trim()))
                })
                .collect::<anyhow::Result<Vec<usize>>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("puzzle_astar").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_grid() {
        assert_eq!(
            parse_grid("1,2,3/4,0,5/6,7,8").unwrap(),
            vec![vec![1, 2, 3], vec![4, 0, 5], vec![6, 7, 8]]
        );
        assert_eq!(parse_grid(" 1, 0 / 2, 3 ").unwrap(), vec![vec![1, 0], vec![2, 3]]);
        assert!(parse_grid("1,-2/0,3").is_err());
        assert!(parse_grid("1,x").is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        let PuzzleConfig::Tiles(tiles) = &config.puzzle else {
            panic!("default config should be a tiles puzzle");
        };
        let (puzzle, start) = tiles.build().unwrap();
        assert_eq!(puzzle.goal(), &TileBoard::canonical(3).unwrap());
        assert_eq!(start.get(1, 1), 0);
    }

    #[test]
    fn test_tiles_from_yaml() {
        let config = Config::from_yaml_str(
            "puzzle:\n  kind: tiles\n  board: [[1, 0], [2, 3]]\n  goal: [[0, 1], [2, 3]]\n",
        )
        .unwrap();
        config.validate().unwrap();
        let PuzzleConfig::Tiles(tiles) = &config.puzzle else {
            panic!("expected a tiles puzzle");
        };
        assert_eq!(tiles.size, 3);
        let (puzzle, start) = tiles.build().unwrap();
        assert_eq!(puzzle.size(), 2);
        assert_eq!(start.blank_position(), (0, 1));
    }

    #[test]
    fn test_jugs_from_yaml() {
        let config = Config::from_yaml_str(
            "puzzle:\n  kind: jugs\n  capacities: [8, 5, 3]\n  start: [8, 0, 0]\n  target: [4, 4, 0]\n  rules: with_tap\n",
        )
        .unwrap();
        config.validate().unwrap();
        assert_eq!(
            config.puzzle,
            PuzzleConfig::Jugs(JugsConfig {
                capacities: vec![8, 5, 3],
                start: vec![8, 0, 0],
                target: vec![4, 4, 0],
                rules: JugRules::WithTap,
            })
        );
    }

    #[test]
    fn test_bad_yaml() {
        assert!(Config::from_yaml_str("puzzle:\n  kind: sokoban\n").is_err());
        assert!(Config::from_yaml_str("puzzle:\n  kind: jugs\n  start: [-1, 0]\n").is_err());
    }

    #[test]
    fn test_override_tiles_scramble() {
        let config = Config::default()
            .override_from_command_line(&cli(&["tiles", "--scramble", "12", "--seed", "5"]))
            .unwrap();
        config.validate().unwrap();
        let PuzzleConfig::Tiles(tiles) = &config.puzzle else {
            panic!("expected a tiles puzzle");
        };
        assert_eq!(tiles.board, None);
        assert_eq!(tiles.scramble, Some(12));
        assert_eq!(tiles.seed, 5);

        let (puzzle, start) = tiles.build().unwrap();
        assert!(puzzle.is_solvable(&start));
        assert_eq!(tiles.build().unwrap().1, start);
    }

    #[test]
    fn test_board_conflicts_with_scramble() {
        let parsed = Cli::try_parse_from([
            "puzzle_astar",
            "tiles",
            "--board",
            "1,0/2,3",
            "--scramble",
            "3",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_override_switches_to_jugs() {
        let config = Config::default()
            .override_from_command_line(&cli(&["jugs", "--target", "1,3", "--tap"]))
            .unwrap();
        config.validate().unwrap();
        assert_eq!(
            config.puzzle,
            PuzzleConfig::Jugs(JugsConfig {
                target: vec![1, 3],
                rules: JugRules::WithTap,
                ..JugsConfig::default()
            })
        );
    }

    #[test]
    fn test_validate_rejects_mismatched_jugs() {
        let config = Config::default()
            .override_from_command_line(&cli(&["jugs", "--start", "0,0,0"]))
            .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("start has 3 levels but there are 2 jugs"));
    }

    #[test]
    fn test_build_rejects_bad_boards() {
        let tiles = TilesConfig {
            board: Some(vec![vec![1, 2], vec![3, 4]]),
            ..TilesConfig::default()
        };
        assert!(format!("{:#}", tiles.build().unwrap_err()).contains("invalid start board"));

        let mismatched = TilesConfig {
            board: Some(vec![vec![1, 0], vec![2, 3]]),
            goal: Some(vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]),
            ..TilesConfig::default()
        };
        assert!(mismatched.build().is_err());

        let overfull = JugsConfig {
            start: vec![5, 0],
            ..JugsConfig::default()
        };
        assert!(format!("{:#}", overfull.build().unwrap_err()).contains("invalid start"));
    }
}
