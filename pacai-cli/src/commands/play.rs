use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result};
use pacai_rs::{
    factory_named, game::play_game, random_ghost::RandomGhostFactory, AdversarialGame,
    AgentFactory, BoxedAgent, Evaluation, PacmanGameState,
};
use tracing::info;

use super::{load_layout, load_options};

#[derive(clap::Args, Debug)]
pub struct Play {
    /// Layout file to play on
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    /// Name of the agent playing Pacman. Every ghost is a random-ghost
    #[clap(short, long, value_parser, default_value = "alpha-beta")]
    agent: String,

    /// JSON file of agent options, flags below override it
    #[clap(short, long, value_parser)]
    options: Option<PathBuf>,

    /// Plies to search for minimax, alpha-beta and expectimax
    #[clap(short, long, value_parser)]
    depth: Option<usize>,

    /// Leaf evaluation, either score or composite
    #[clap(short, long, value_parser)]
    evaluation: Option<Evaluation>,

    /// Seed for Pacman's tie breaks and the ghosts' moves
    #[clap(long, value_parser)]
    seed: Option<u64>,

    /// Stop after this many rounds even if nobody has won
    #[clap(short, long, value_parser, default_value_t = 500)]
    max_rounds: usize,

    /// Print the result as JSON
    #[clap(long)]
    json: bool,
}

impl Play {
    pub fn run(self) -> Result<()> {
        let layout = load_layout(&self.layout)?;
        let game = PacmanGameState::from_layout(&layout);

        let mut options = load_options(self.options.as_deref())?;
        if let Some(depth) = self.depth {
            options.depth = depth;
        }
        if let Some(evaluation) = self.evaluation {
            options.evaluation = evaluation;
        }
        if self.seed.is_some() {
            options.seed = self.seed;
        }

        let pacman = factory_named(&self.agent).map_err(|e| eyre!("{:#}", e))?;

        info!(
            agent = %pacman.name(),
            ghosts = game.num_agents() - 1,
            seed = ?options.seed,
            "Starting game"
        );

        let mut agents: Vec<BoxedAgent> = vec![pacman.create(0, &options)];
        for index in 1..game.num_agents() {
            agents.push(RandomGhostFactory {}.create(index, &options));
        }

        let record =
            play_game(game.clone(), &mut agents, self.max_rounds).map_err(|e| eyre!("{:#}", e))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&record)?);
            return Ok(());
        }

        let final_state = record
            .moves
            .iter()
            .fold(game, |state, &(index, action)| {
                state.generate_successor(index, action)
            });

        print!("{}", final_state);
        match record.outcome {
            Some(outcome) => println!(
                "{:?} after {} rounds with a score of {}",
                outcome, record.rounds, record.score
            ),
            None => println!(
                "Stopped after {} rounds with a score of {}",
                record.rounds, record.score
            ),
        }

        Ok(())
    }
}
