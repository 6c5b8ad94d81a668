use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result, WrapErr};
use itertools::Itertools;
use pacai_minimax::multiagent::Strategy;
use pacai_rs::{
    factory_named, multi_agent::MultiAgentPacman, AgentIndex, Direction, Evaluation,
    PacmanGameState,
};
use serde::Serialize;

use super::{load_layout, load_options};

#[derive(clap::Args, Debug)]
pub struct Decide {
    /// Layout file to decide a move for
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    /// Name of the agent to ask
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

    /// Seed for agents that break ties at random
    #[clap(long, value_parser)]
    seed: Option<u64>,

    /// Print the explored game tree. Only works for the multi agent searchers
    #[clap(long)]
    tree: bool,

    /// Print the result as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct DecideOutput {
    agent: String,
    action: Direction,
    /// Root value and the line of play it expects, only filled in with `--tree`
    value: Option<f64>,
    route: Option<Vec<(AgentIndex, Direction)>>,
}

impl Decide {
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

        let factory = factory_named(&self.agent).map_err(|e| eyre!("{:#}", e))?;
        let mut agent = factory.create(0, &options);
        agent.register_initial_state(&game);
        let action = agent.get_action(&game);

        let mut output = DecideOutput {
            agent: factory.name(),
            action,
            value: None,
            route: None,
        };

        if self.tree {
            let strategy: Strategy = self
                .agent
                .parse()
                .wrap_err("--tree only works for minimax, alpha-beta and expectimax")?;

            let explained = MultiAgentPacman::new(strategy, options.depth, options.evaluation)
                .explain(&game);

            if !self.json {
                println!("{}", explained.to_text_tree());
            }

            output.value = Some(explained.score());
            output.route = Some(explained.chosen_route());
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("{} chose {}", output.agent, output.action);

        if let (Some(value), Some(route)) = (output.value, &output.route) {
            println!("Expected value {value}");
            println!(
                "Expected line: {}",
                route
                    .iter()
                    .map(|(agent, action)| format!("{agent}:{action}"))
                    .join(", ")
            );
        }

        Ok(())
    }
}
