use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use pacai_minimax::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// A cell on the board, with `y` growing upwards
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn euclidean_distance(&self, other: &Position) -> f64 {
        f64::from(self.x - other.x).hypot(f64::from(self.y - other.y))
    }

    /// The position one step in the given direction. Stopping stays put
    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.vector();

        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;

    /// Parses `x,y`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("expected a position like 3,4 but got '{}'", s))?;

        Ok(Position {
            x: x.trim().parse()?,
            y: y.trim().parse()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// The four directions that actually move, in the order successors are generated
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Stop => Direction::Stop,
        }
    }
}

impl Action for Direction {
    fn noop() -> Self {
        Direction::Stop
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Stop => "Stop",
        };

        f.write_str(s)
    }
}

/// Games where we can find where Pacman (agent 0) is
pub trait PacmanPositionGettableGame {
    fn get_pacman_position(&self) -> Position;
}

/// Games with food left to eat. No food left means Pacman has won
pub trait FoodGettableGame {
    fn get_food(&self) -> &[Position];
}

/// Games with power capsules that scare the ghosts
pub trait CapsuleGettableGame {
    fn get_capsules(&self) -> &[Position];
}

/// Games where we can find every ghost, in agent order starting at agent 1
pub trait GhostPositionGettableGame {
    fn get_ghost_positions(&self) -> Vec<Position>;
}
