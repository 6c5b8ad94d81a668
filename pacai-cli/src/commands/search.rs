use std::{path::PathBuf, sync::Arc};

use color_eyre::eyre::{eyre, Result};
use itertools::Itertools;
use pacai_rs::{
    search::{
        null_heuristic,
        problems::{euclidean_heuristic, manhattan_heuristic, PositionSearchProblem},
        search, SearchStrategy,
    },
    Direction, Heuristic, Position,
};
use serde::Serialize;

use super::load_layout;

#[derive(clap::Args, Debug)]
pub struct Search {
    /// Layout file to search
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    /// One of dfs, bfs, ucs or astar
    #[clap(short, long, value_parser, default_value_t = SearchStrategy::AStar)]
    strategy: SearchStrategy,

    /// Heuristic for astar, one of null, manhattan or euclidean
    #[clap(long, value_parser, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Goal as x,y. Uses the first food in the layout if not specified
    #[clap(short, long, value_parser)]
    goal: Option<Position>,

    /// Print the result as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct SearchOutput {
    strategy: SearchStrategy,
    start: Position,
    goal: Position,
    path: Option<Vec<Direction>>,
    expanded: usize,
}

impl Search {
    pub fn run(self) -> Result<()> {
        let layout = load_layout(&self.layout)?;

        let problem = match self.goal {
            Some(goal) => {
                PositionSearchProblem::new(Arc::new(layout.walls.clone()), layout.pacman, goal)
            }
            None => PositionSearchProblem::from_layout(&layout).map_err(|e| eyre!("{:#}", e))?,
        };

        let heuristic: &dyn Fn(&Position, &PositionSearchProblem) -> f64 = match self.heuristic {
            Heuristic::Null => &null_heuristic::<Position, PositionSearchProblem>,
            Heuristic::Manhattan => &manhattan_heuristic,
            Heuristic::Euclidean => &euclidean_heuristic,
        };

        let path = search(&problem, self.strategy, Some(heuristic));

        let output = SearchOutput {
            strategy: self.strategy,
            start: problem.start(),
            goal: problem.goal(),
            path,
            expanded: problem.expanded(),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        match &output.path {
            Some(path) => {
                println!(
                    "{} found a path from {} to {} with {} moves, expanding {} states",
                    output.strategy,
                    output.start,
                    output.goal,
                    path.len(),
                    output.expanded
                );
                println!("{}", path.iter().join(", "));
            }
            None => println!(
                "{} found no path from {} to {} after expanding {} states",
                output.strategy, output.start, output.goal, output.expanded
            ),
        }

        Ok(())
    }
}
