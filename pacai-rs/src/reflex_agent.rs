use pacai_minimax::reflex::ReflexAgent;
use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

use crate::{eval::reflex_evaluation, *};

type ReflexEvaluation = fn(&PacmanGameState, Direction) -> f64;

/// Looks one move ahead with [reflex_evaluation] and breaks ties at random
#[derive(Debug)]
pub struct ReflexPacman {
    agent: ReflexAgent<ReflexEvaluation, StdRng>,
}

impl ReflexPacman {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let evaluation: ReflexEvaluation = reflex_evaluation::<PacmanGameState>;

        Self {
            agent: ReflexAgent::with_rng(evaluation, rng),
        }
    }
}

impl Agent for ReflexPacman {
    fn get_action(&mut self, game: &PacmanGameState) -> Direction {
        let action = self.agent.choose_action(game);
        debug!(%action, "Reflex agent moved");

        action
    }
}

pub struct ReflexAgentFactory;

impl AgentFactory for ReflexAgentFactory {
    fn name(&self) -> String {
        "reflex".to_owned()
    }

    fn create(&self, _index: AgentIndex, options: &AgentOptions) -> BoxedAgent {
        Box::new(ReflexPacman::new(options.seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(layout: &str) -> PacmanGameState {
        let layout: Layout = layout.parse().unwrap();
        PacmanGameState::from_layout(&layout)
    }

    #[test]
    fn test_heads_for_food() {
        let game = state("%%%%%%%\n%.P   %\n%%%%%%%");
        let mut agent = ReflexPacman::new(Some(3));

        assert_eq!(agent.get_action(&game), Direction::West);
    }

    #[test]
    fn test_steps_away_from_a_ghost() {
        let game = state("%%%%%%%\n%. PG %\n%%%%%%%");
        let mut agent = ReflexPacman::new(Some(3));

        assert_eq!(agent.get_action(&game), Direction::West);
    }

    #[test]
    fn test_same_seed_same_game() {
        // Both directions are equally far from the food, so every move is a coin flip
        let game = state("%%%%%\n%   %\n% P %\n%   %\n%.%.%\n%%%%%");

        let play = |seed| {
            let mut agent = ReflexPacman::new(Some(seed));
            (0..10).map(|_| agent.get_action(&game)).collect::<Vec<_>>()
        };

        assert_eq!(play(11), play(11));
    }
}
