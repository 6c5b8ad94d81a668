use std::{cell::Cell, sync::Arc};

use anyhow::{anyhow, Result};
use derivative::Derivative;
use tracing::debug;

use super::{SearchProblem, Successor};
use crate::{
    grid::Walls,
    layout::Layout,
    types::{Direction, Position},
};

type CostFn = Box<dyn Fn(Position) -> f64>;

#[derive(Derivative)]
#[derivative(Debug)]
/// Walk from one cell of the board to another
///
/// Each step costs 1 unless a cost function is given, in which case stepping onto a cell costs
/// whatever it says. Counts how many states have been expanded, which is handy for comparing
/// heuristics.
pub struct PositionSearchProblem {
    walls: Arc<Walls>,
    start: Position,
    goal: Position,
    #[derivative(Debug = "ignore")]
    cost_fn: Option<CostFn>,
    expanded: Cell<usize>,
}

impl PositionSearchProblem {
    pub fn new(walls: Arc<Walls>, start: Position, goal: Position) -> Self {
        Self {
            walls,
            start,
            goal,
            cost_fn: None,
            expanded: Cell::new(0),
        }
    }

    /// Start at Pacman and head for the first piece of food
    pub fn from_layout(layout: &Layout) -> Result<Self> {
        let goal = layout
            .food
            .first()
            .copied()
            .ok_or_else(|| anyhow!("layout has no food to use as a goal"))?;

        Ok(Self::new(
            Arc::new(layout.walls.clone()),
            layout.pacman,
            goal,
        ))
    }

    pub fn with_goal(self, goal: Position) -> Self {
        Self { goal, ..self }
    }

    pub fn with_cost_fn(self, cost_fn: impl Fn(Position) -> f64 + 'static) -> Self {
        Self {
            cost_fn: Some(Box::new(cost_fn)),
            ..self
        }
    }

    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    /// How many states have had their successors generated so far
    pub fn expanded(&self) -> usize {
        self.expanded.get()
    }

    fn step_cost(&self, position: Position) -> f64 {
        self.cost_fn.as_ref().map_or(1.0, |cost_fn| cost_fn(position))
    }
}

impl SearchProblem for PositionSearchProblem {
    type State = Position;
    type Action = Direction;

    fn starting_state(&self) -> Position {
        self.start
    }

    fn is_goal(&self, state: &Position) -> bool {
        let is_goal = *state == self.goal;

        if is_goal {
            debug!(expanded = self.expanded(), goal = %self.goal, "Reached the goal");
        }

        is_goal
    }

    fn successor_states(&self, state: &Position) -> Vec<Successor<Position, Direction>> {
        self.expanded.set(self.expanded.get() + 1);

        self.walls
            .open_neighbors(*state)
            .map(|(action, next)| Successor {
                state: next,
                action,
                cost: self.step_cost(next),
            })
            .collect()
    }
}

pub fn manhattan_heuristic(state: &Position, problem: &PositionSearchProblem) -> f64 {
    f64::from(state.manhattan_distance(&problem.goal()))
}

pub fn euclidean_heuristic(state: &Position, problem: &PositionSearchProblem) -> f64 {
    state.euclidean_distance(&problem.goal())
}
