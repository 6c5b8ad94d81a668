//! Parses the classic text layout format
//!
//! ```text
//! %%%%%%%
//! %P . G%
//! %o%%%.%
//! %%%%%%%
//! ```
//!
//! `%` is a wall, `.` is food, `o` is a power capsule, `P` is Pacman and `G` (or a digit from
//! `1` to `4`) is a ghost. The first line of text is the top of the board.

use std::str::FromStr;

use anyhow::{bail, Result};

use crate::{grid::Walls, types::Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub walls: Walls,
    pub food: Vec<Position>,
    pub capsules: Vec<Position>,
    pub pacman: Position,
    /// In reading order, which is also agent order
    pub ghosts: Vec<Position>,
}

impl Layout {
    pub fn width(&self) -> i32 {
        self.walls.width()
    }

    pub fn height(&self) -> i32 {
        self.walls.height()
    }
}

impl FromStr for Layout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect();

        let Some(first_row) = rows.first() else {
            bail!("layout is empty");
        };

        let width = first_row.chars().count();
        let height = rows.len();

        let mut wall_cells = Vec::with_capacity(width * height);
        let mut food = vec![];
        let mut capsules = vec![];
        let mut pacman = None;
        let mut ghosts = vec![];

        for (row_index, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                bail!(
                    "layout row {} is {} wide but the first row is {} wide",
                    row_index + 1,
                    row.chars().count(),
                    width
                );
            }

            let y = (height - 1 - row_index) as i32;

            for (x, c) in row.chars().enumerate() {
                let position = Position::new(x as i32, y);

                wall_cells.push(c == '%');

                match c {
                    '%' | ' ' => {}
                    '.' => food.push(position),
                    'o' => capsules.push(position),
                    'P' => {
                        if pacman.replace(position).is_some() {
                            bail!("layout has more than one Pacman");
                        }
                    }
                    'G' | '1'..='4' => ghosts.push(position),
                    other => bail!("unknown layout character '{}' at {}", other, position),
                }
            }
        }

        let Some(pacman) = pacman else {
            bail!("layout has no Pacman");
        };

        // Rows were pushed top down, walls are stored bottom up
        let walls = Walls::from_rows_top_down(width as i32, height as i32, wall_cells);

        food.sort();
        capsules.sort();

        Ok(Layout {
            walls,
            food,
            capsules,
            pacman,
            ghosts,
        })
    }
}
