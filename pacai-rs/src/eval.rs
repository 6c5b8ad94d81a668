//! Evaluation functions for Pacman states
//!
//! [composite_evaluation] is the leaf evaluation for the multi agent searchers and
//! [reflex_evaluation] scores a single Pacman action for the reflex agent. Both chase the nearest
//! objective and treat a ghost within one step as something to avoid at any cost.

use pacai_minimax::{AdversarialGame, MAXIMIZING_AGENT};

use crate::types::{
    CapsuleGettableGame, Direction, FoodGettableGame, GhostPositionGettableGame,
    PacmanPositionGettableGame, Position,
};

/// Replaces the distance term whenever a ghost is too close
pub const GHOST_SENTINEL: f64 = -999_999.0;

/// Ghosts closer than this (in Manhattan distance) trigger [GHOST_SENTINEL]. This covers both a
/// ghost on the same cell and one right next to Pacman
pub const GHOST_DANGER_DISTANCE: i32 = 2;

fn ghost_is_near(position: Position, ghosts: &[Position]) -> bool {
    ghosts
        .iter()
        .any(|ghost| position.manhattan_distance(ghost) < GHOST_DANGER_DISTANCE)
}

fn closest_distance(position: Position, targets: &[Position]) -> Option<i32> {
    targets
        .iter()
        .map(|target| position.manhattan_distance(target))
        .min()
}

/// Score a state by the game score plus how close Pacman is to the next thing worth eating
///
/// Capsules are preferred over food while any remain. Once all the food is gone the game is won
/// and the raw score is returned as is.
pub fn composite_evaluation<GameType>(game: &GameType) -> f64
where
    GameType: AdversarialGame
        + PacmanPositionGettableGame
        + FoodGettableGame
        + CapsuleGettableGame
        + GhostPositionGettableGame,
{
    let score = game.get_score();

    let food = game.get_food();
    if food.is_empty() {
        return score;
    }

    let position = game.get_pacman_position();
    let capsules = game.get_capsules();
    let objectives = if capsules.is_empty() { food } else { capsules };

    let term = if ghost_is_near(position, &game.get_ghost_positions()) {
        GHOST_SENTINEL
    } else {
        closest_distance(position, objectives).map_or(0.0, |d| -f64::from(d))
    };

    score + term
}

/// Score Pacman taking `action` from `game`
///
/// The distance is measured from where Pacman ends up to the food of the *current* state, so a
/// move that eats a pellet scores zero. The game score itself is not included, unless there was
/// no food to begin with, in which case the successor's score is returned.
pub fn reflex_evaluation<GameType>(game: &GameType, action: Direction) -> f64
where
    GameType: AdversarialGame<Action = Direction>
        + PacmanPositionGettableGame
        + FoodGettableGame
        + GhostPositionGettableGame,
{
    let successor = game.generate_successor(MAXIMIZING_AGENT, action);

    let old_food = game.get_food();
    if old_food.is_empty() {
        return successor.get_score();
    }

    let new_position = successor.get_pacman_position();

    if ghost_is_near(new_position, &successor.get_ghost_positions()) {
        return GHOST_SENTINEL;
    }

    closest_distance(new_position, old_food).map_or(0.0, |d| -f64::from(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid::PacmanGameState, layout::Layout};

    fn state(layout: &str) -> PacmanGameState {
        let layout: Layout = layout.parse().unwrap();
        PacmanGameState::from_layout(&layout)
    }

    #[test]
    fn test_no_food_is_the_raw_score() {
        let game = state("%%%%\n%P.%\n%%%%").generate_successor(0, Direction::East);

        assert!(game.get_food().is_empty());
        assert_eq!(composite_evaluation(&game), game.get_score());
    }

    #[test]
    fn test_closest_food_distance() {
        let game = state("%%%%%%%\n%P  . %\n%    .%\n%%%%%%%");

        assert_eq!(composite_evaluation(&game), -3.0);
    }

    #[test]
    fn test_capsules_are_preferred_over_food() {
        let game = state("%%%%%%%\n%P.  o%\n%%%%%%%");

        assert_eq!(composite_evaluation(&game), -4.0);
    }

    #[test]
    fn test_adjacent_ghost_is_the_sentinel() {
        let near_ghost = state("%%%%%%\n%PG .%\n%%%%%%");
        let near_food = state("%%%%%%\n%P.  %\n%%%%%%");

        assert_eq!(
            composite_evaluation(&near_ghost),
            near_ghost.get_score() + GHOST_SENTINEL
        );
        assert!(composite_evaluation(&near_ghost) < composite_evaluation(&near_food));
    }

    #[test]
    fn test_ghost_two_steps_away_is_fine() {
        let game = state("%%%%%%\n%P G.%\n%%%%%%");

        assert_eq!(composite_evaluation(&game), -3.0);
    }

    #[test]
    fn test_reflex_prefers_eating() {
        let game = state("%%%%%%\n%.P  %\n%%%%%%");

        assert_eq!(reflex_evaluation(&game, Direction::West), 0.0);
        assert_eq!(reflex_evaluation(&game, Direction::East), -2.0);
        assert_eq!(reflex_evaluation(&game, Direction::Stop), -1.0);
    }

    #[test]
    fn test_reflex_avoids_ghosts() {
        let game = state("%%%%%%\n%.P G%\n%%%%%%");

        assert_eq!(reflex_evaluation(&game, Direction::East), GHOST_SENTINEL);
        assert_eq!(reflex_evaluation(&game, Direction::West), 0.0);
    }
}
