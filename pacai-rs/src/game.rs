use tracing::{debug, info, info_span, warn};

use crate::{grid::Outcome, *};

/// What happened in a game played by [play_game]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    /// Every move in order, with the agent that made it
    pub moves: Vec<(AgentIndex, Direction)>,
    /// Full rounds played, one move per agent each
    pub rounds: usize,
    pub score: f64,
    /// `None` when the round limit ran out first
    pub outcome: Option<Outcome>,
}

/// Play `game` to the end, or until `max_rounds` rounds have been played
///
/// `agents[i]` plays as agent `i`, so there must be exactly one agent per agent in the game.
pub fn play_game(
    mut game: PacmanGameState,
    agents: &mut [BoxedAgent],
    max_rounds: usize,
) -> anyhow::Result<GameRecord> {
    if agents.len() != game.num_agents() {
        anyhow::bail!(
            "the layout has {} agents but {} were given",
            game.num_agents(),
            agents.len()
        );
    }

    for agent in agents.iter_mut() {
        agent.register_initial_state(&game);
    }

    let mut moves = vec![];
    let mut rounds = 0;

    while !game.is_over() && rounds < max_rounds {
        info_span!("round", round = rounds).in_scope(|| {
            for (index, agent) in agents.iter_mut().enumerate() {
                if game.is_over() {
                    break;
                }

                let mut action = agent.get_action(&game);

                if !game.legal_actions(index).contains(&action) {
                    warn!(index, %action, "Agent chose an illegal action");
                    action = game
                        .legal_actions(index)
                        .first()
                        .copied()
                        .unwrap_or(Direction::Stop);
                }

                game = game.generate_successor(index, action);
                moves.push((index, action));

                debug!(index, %action, score = game.get_score(), "Agent moved");
            }
        });

        rounds += 1;
    }

    info!(
        rounds,
        score = game.get_score(),
        outcome = ?game.outcome(),
        "Game finished"
    );

    Ok(GameRecord {
        moves,
        rounds,
        score: game.get_score(),
        outcome: game.outcome(),
    })
}
