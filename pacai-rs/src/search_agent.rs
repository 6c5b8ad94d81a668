use std::collections::VecDeque;

use tracing::{info, warn};

use crate::{
    search::{
        null_heuristic,
        problems::{euclidean_heuristic, manhattan_heuristic, PositionSearchProblem},
        search, SearchStrategy,
    },
    types::{FoodGettableGame, PacmanPositionGettableGame},
    *,
};

/// Plans a route to a single goal once, then follows it move by move
///
/// The goal is fixed when the plan is made, so ghosts are ignored entirely.
#[derive(Debug)]
pub struct SearchAgent {
    strategy: SearchStrategy,
    heuristic: Heuristic,
    goal: Option<Position>,
    plan: Option<VecDeque<Direction>>,
}

impl SearchAgent {
    pub fn new(strategy: SearchStrategy, heuristic: Heuristic, goal: Option<Position>) -> Self {
        Self {
            strategy,
            heuristic,
            goal,
            plan: None,
        }
    }

    /// The configured goal, or else the food closest to Pacman
    fn goal_for(&self, game: &PacmanGameState) -> Option<Position> {
        self.goal.or_else(|| {
            let pacman = game.get_pacman_position();

            game.get_food()
                .iter()
                .min_by_key(|food| pacman.manhattan_distance(food))
                .copied()
        })
    }

    fn make_plan(&self, game: &PacmanGameState) -> VecDeque<Direction> {
        let Some(goal) = self.goal_for(game) else {
            warn!("No goal to plan a route to");
            return VecDeque::new();
        };

        let problem =
            PositionSearchProblem::new(game.walls().clone(), game.get_pacman_position(), goal);

        let heuristic: &dyn Fn(&Position, &PositionSearchProblem) -> f64 = match self.heuristic {
            Heuristic::Null => &null_heuristic::<Position, PositionSearchProblem>,
            Heuristic::Manhattan => &manhattan_heuristic,
            Heuristic::Euclidean => &euclidean_heuristic,
        };

        match search(&problem, self.strategy, Some(heuristic)) {
            Some(path) => {
                info!(
                    strategy = %self.strategy,
                    %goal,
                    length = path.len(),
                    expanded = problem.expanded(),
                    "Planned a route"
                );
                path.into()
            }
            None => {
                warn!(strategy = %self.strategy, %goal, "No route to the goal");
                VecDeque::new()
            }
        }
    }
}

impl Agent for SearchAgent {
    fn register_initial_state(&mut self, game: &PacmanGameState) {
        self.plan = Some(self.make_plan(game));
    }

    fn get_action(&mut self, game: &PacmanGameState) -> Direction {
        if self.plan.is_none() {
            self.plan = Some(self.make_plan(game));
        }

        self.plan
            .as_mut()
            .and_then(|plan| plan.pop_front())
            .unwrap_or(Direction::Stop)
    }
}

pub struct SearchAgentFactory;

impl AgentFactory for SearchAgentFactory {
    fn name(&self) -> String {
        "search".to_owned()
    }

    fn create(&self, _index: AgentIndex, options: &AgentOptions) -> BoxedAgent {
        Box::new(SearchAgent::new(
            options.search_strategy,
            options.heuristic,
            options.goal,
        ))
    }
}
