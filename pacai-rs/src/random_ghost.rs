use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::*;

/// A ghost that picks uniformly at random from its legal moves
///
/// This is the ghost expectimax assumes it is playing against.
#[derive(Debug)]
pub struct RandomGhost {
    index: AgentIndex,
    rng: StdRng,
}

impl RandomGhost {
    pub fn new(index: AgentIndex, seed: Option<u64>) -> Self {
        let rng = match seed {
            // Offset by the index so ghosts sharing a seed don't move in lockstep
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_entropy(),
        };

        Self { index, rng }
    }

    pub fn index(&self) -> AgentIndex {
        self.index
    }
}

impl Agent for RandomGhost {
    fn get_action(&mut self, game: &PacmanGameState) -> Direction {
        game.legal_actions(self.index)
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Direction::Stop)
    }
}

pub struct RandomGhostFactory;

impl AgentFactory for RandomGhostFactory {
    fn name(&self) -> String {
        "random-ghost".to_owned()
    }

    fn create(&self, index: AgentIndex, options: &AgentOptions) -> BoxedAgent {
        Box::new(RandomGhost::new(index, options.seed))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn small_classic() -> PacmanGameState {
        let layout: Layout = include_str!("../fixtures/small_classic.lay").parse().unwrap();
        PacmanGameState::from_layout(&layout)
    }

    #[test]
    fn test_only_picks_legal_moves() {
        let game = small_classic();
        let mut ghost = RandomGhost::new(1, Some(5));

        let moves = (0..50).map(|_| ghost.get_action(&game)).collect_vec();

        assert!(moves
            .iter()
            .all(|m| *m == Direction::South || *m == Direction::West));
        assert!(moves.contains(&Direction::South));
        assert!(moves.contains(&Direction::West));
    }

    #[test]
    fn test_seeded_ghosts_repeat() {
        let game = small_classic();

        let mut first = RandomGhostFactory {}.create(
            1,
            &AgentOptions {
                seed: Some(9),
                ..Default::default()
            },
        );
        let mut second = RandomGhost::new(1, Some(9));

        let first_moves = (0..20).map(|_| first.get_action(&game)).collect_vec();
        let second_moves = (0..20).map(|_| second.get_action(&game)).collect_vec();

        assert_eq!(first_moves, second_moves);
    }

    #[test]
    fn test_finished_game_stops() {
        let layout: Layout = "%%%%%\n%P.G%\n%%%%%".parse().unwrap();
        let game = PacmanGameState::from_layout(&layout).generate_successor(0, Direction::East);
        let mut ghost = RandomGhost::new(1, None);

        assert!(game.is_win());
        assert_eq!(ghost.get_action(&game), Direction::Stop);
    }
}
