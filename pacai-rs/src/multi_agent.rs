use pacai_minimax::multiagent::{MinMaxReturn, MultiAgentSearcher, SearchOptions, Strategy};

use crate::{eval::composite_evaluation, *};

type LeafEvaluation = fn(&PacmanGameState) -> f64;

fn game_score(game: &PacmanGameState) -> f64 {
    game.get_score()
}

/// Pacman driven by one of the depth limited multi agent searches
#[derive(Debug)]
pub struct MultiAgentPacman {
    searcher: MultiAgentSearcher<LeafEvaluation>,
}

impl MultiAgentPacman {
    pub fn new(strategy: Strategy, depth: usize, evaluation: Evaluation) -> Self {
        let score_function: LeafEvaluation = match evaluation {
            Evaluation::Score => game_score,
            Evaluation::Composite => composite_evaluation::<PacmanGameState>,
        };

        Self {
            searcher: MultiAgentSearcher::new(
                score_function,
                strategy.name(),
                SearchOptions {
                    max_depth: depth,
                    strategy,
                },
            ),
        }
    }

    pub fn searcher(&self) -> &MultiAgentSearcher<LeafEvaluation> {
        &self.searcher
    }

    /// The whole explored tree for `game`, for when the chosen action needs explaining
    pub fn explain(&self, game: &PacmanGameState) -> MinMaxReturn<Direction> {
        self.searcher.search(game)
    }
}

impl Agent for MultiAgentPacman {
    fn get_action(&mut self, game: &PacmanGameState) -> Direction {
        self.searcher.choose_action(game)
    }
}

pub struct MultiAgentFactory {
    strategy: Strategy,
}

impl MultiAgentFactory {
    pub fn minimax() -> Self {
        Self {
            strategy: Strategy::Minimax,
        }
    }

    pub fn alpha_beta() -> Self {
        Self {
            strategy: Strategy::AlphaBeta,
        }
    }

    pub fn expectimax() -> Self {
        Self {
            strategy: Strategy::Expectimax,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl AgentFactory for MultiAgentFactory {
    fn name(&self) -> String {
        self.strategy.name().to_owned()
    }

    fn create(&self, _index: AgentIndex, options: &AgentOptions) -> BoxedAgent {
        Box::new(MultiAgentPacman::new(
            self.strategy,
            options.depth,
            options.evaluation,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::GHOST_SENTINEL;

    fn small_classic() -> PacmanGameState {
        let layout: Layout = include_str!("../fixtures/small_classic.lay").parse().unwrap();
        PacmanGameState::from_layout(&layout)
    }

    #[test]
    fn test_strategies_agree_on_the_opening() {
        let game = small_classic();

        let minimax = MultiAgentPacman::new(Strategy::Minimax, 2, Evaluation::Composite);
        let alpha_beta = MultiAgentPacman::new(Strategy::AlphaBeta, 2, Evaluation::Composite);

        let minimax_tree = minimax.explain(&game);
        let alpha_beta_tree = alpha_beta.explain(&game);

        assert_eq!(minimax_tree.score(), alpha_beta_tree.score());
        assert!(alpha_beta_tree.leaf_count() <= minimax_tree.leaf_count());
    }

    #[test]
    fn test_never_walks_into_a_ghost() {
        // Pacman is boxed in with the ghost to the east and food to the west
        let layout: Layout = "%%%%%%%\n%.%%%%%\n%  PG %\n%%%%%%%".parse().unwrap();
        let game = PacmanGameState::from_layout(&layout);

        for strategy in Strategy::ALL {
            let mut agent = MultiAgentPacman::new(strategy, 2, Evaluation::Composite);
            let action = agent.get_action(&game);

            assert_eq!(action, Direction::West, "{} walked the wrong way", strategy);
        }
    }

    #[test]
    fn test_game_score_evaluation_prefers_food() {
        let layout: Layout = "%%%%%%\n%P.  %\n%   .%\n%%%%%%".parse().unwrap();
        let game = PacmanGameState::from_layout(&layout);

        let mut agent = MultiAgentPacman::new(Strategy::Expectimax, 1, Evaluation::Score);

        assert_eq!(agent.get_action(&game), Direction::East);
    }

    #[test]
    fn test_finished_game_stops() {
        let layout: Layout = "%%%%\n%P.%\n%%%%".parse().unwrap();
        let game = PacmanGameState::from_layout(&layout).generate_successor(0, Direction::East);

        let mut agent = MultiAgentFactory::alpha_beta().create(0, &Default::default());

        assert!(game.is_win());
        assert_eq!(agent.get_action(&game), Direction::Stop);
    }

    #[test]
    fn test_sentinel_leaves_are_avoided() {
        let game = small_classic();
        let agent = MultiAgentPacman::new(Strategy::AlphaBeta, 1, Evaluation::Composite);

        let tree = agent.explain(&game);

        assert!(tree.score() > GHOST_SENTINEL);
    }
}
