#[macro_use]
extern crate serde_derive;

use std::{fmt::Display, str::FromStr};

use anyhow::{anyhow, bail};
use itertools::Itertools;

pub use pacai_minimax::{AdversarialGame, AgentIndex, MAXIMIZING_AGENT};

pub mod eval;
pub mod game;
pub mod grid;
pub mod layout;
pub mod search;
pub mod types;

pub mod multi_agent;
pub mod random_ghost;
pub mod reflex_agent;
pub mod search_agent;

pub use grid::PacmanGameState;
pub use layout::Layout;
pub use types::{Direction, Position};

use crate::{
    multi_agent::MultiAgentFactory, random_ghost::RandomGhostFactory,
    reflex_agent::ReflexAgentFactory, search::SearchStrategy, search_agent::SearchAgentFactory,
};

pub type BoxedAgent = Box<dyn Agent>;
pub type BoxedFactory = Box<dyn AgentFactory>;

/// Something that can play one side of a Pacman game
pub trait Agent {
    /// Called once with the starting state before the first move
    fn register_initial_state(&mut self, _game: &PacmanGameState) {}

    fn get_action(&mut self, game: &PacmanGameState) -> Direction;
}

pub trait AgentFactory {
    fn name(&self) -> String;

    /// Build an agent that will play as `index`
    fn create(&self, index: AgentIndex, options: &AgentOptions) -> BoxedAgent;
}

/// Which evaluation the multi agent searchers use at their leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Evaluation {
    /// Just the game score
    Score,
    /// [eval::composite_evaluation]
    Composite,
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Evaluation::Score => f.write_str("score"),
            Evaluation::Composite => f.write_str("composite"),
        }
    }
}

impl FromStr for Evaluation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "score" => Ok(Evaluation::Score),
            "composite" => Ok(Evaluation::Composite),
            other => bail!(
                "unknown evaluation '{}', expected score or composite",
                other
            ),
        }
    }
}

/// Which heuristic a search agent hands to A*
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    Null,
    Manhattan,
    Euclidean,
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heuristic::Null => f.write_str("null"),
            Heuristic::Manhattan => f.write_str("manhattan"),
            Heuristic::Euclidean => f.write_str("euclidean"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "null" | "none" => Ok(Heuristic::Null),
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            other => bail!(
                "unknown heuristic '{}', expected null, manhattan or euclidean",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Knobs shared by every agent. Each agent only looks at the ones that make sense for it
///
/// Missing fields take their default when deserializing, so a partial JSON object is fine.
///
/// ```
/// use pacai_rs::{AgentOptions, Evaluation, Heuristic};
/// use pacai_rs::search::SearchStrategy;
///
/// let defaults = AgentOptions::default();
///
/// assert_eq!(defaults.depth, 2);
/// assert_eq!(defaults.evaluation, Evaluation::Composite);
/// assert_eq!(defaults.search_strategy, SearchStrategy::AStar);
/// assert_eq!(defaults.heuristic, Heuristic::Manhattan);
/// assert_eq!(defaults.seed, None);
/// ```
pub struct AgentOptions {
    /// Plies for the multi agent searchers
    pub depth: usize,
    pub evaluation: Evaluation,
    pub search_strategy: SearchStrategy,
    pub heuristic: Heuristic,
    /// Where the search agent heads. Defaults to the closest food by Manhattan distance
    pub goal: Option<Position>,
    /// Seeds the agents that make random choices. Without one they are seeded from entropy
    pub seed: Option<u64>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            evaluation: Evaluation::Composite,
            search_strategy: SearchStrategy::AStar,
            heuristic: Heuristic::Manhattan,
            goal: None,
            seed: None,
        }
    }
}

pub fn all_factories() -> Vec<BoxedFactory> {
    vec![
        Box::new(SearchAgentFactory {}),
        Box::new(ReflexAgentFactory {}),
        Box::new(MultiAgentFactory::minimax()),
        Box::new(MultiAgentFactory::alpha_beta()),
        Box::new(MultiAgentFactory::expectimax()),
        Box::new(RandomGhostFactory {}),
    ]
}

pub fn factory_named(name: &str) -> anyhow::Result<BoxedFactory> {
    let mut factories = all_factories();
    let known = factories.iter().map(|f| f.name()).join(", ");

    let index = factories
        .iter()
        .position(|f| f.name() == name)
        .ok_or_else(|| anyhow!("no agent named '{}', expected one of {}", name, known))?;

    Ok(factories.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_names_are_unique() {
        let names = all_factories().iter().map(|f| f.name()).collect_vec();

        assert_eq!(
            names,
            vec![
                "search",
                "reflex",
                "minimax",
                "alpha-beta",
                "expectimax",
                "random-ghost"
            ]
        );
        assert_eq!(names.iter().unique().count(), names.len());
    }

    #[test]
    fn test_factory_named() {
        assert_eq!(factory_named("expectimax").unwrap().name(), "expectimax");

        let error = factory_named("greedy").err().unwrap();
        assert!(error.to_string().contains("no agent named 'greedy'"));
    }

    #[test]
    fn test_parse_options() {
        assert_eq!(
            "Composite".parse::<Evaluation>().unwrap(),
            Evaluation::Composite
        );
        assert!("best".parse::<Evaluation>().is_err());
        assert_eq!(
            "euclidean".parse::<Heuristic>().unwrap(),
            Heuristic::Euclidean
        );
        assert!("chebyshev".parse::<Heuristic>().is_err());
    }

    #[test]
    fn test_partial_options_from_json() {
        let json = r#"{ "depth": 3, "evaluation": "score", "goal": { "x": 1, "y": 2 } }"#;
        let options: AgentOptions = serde_json::from_str(json).unwrap();

        assert_eq!(
            options,
            AgentOptions {
                depth: 3,
                evaluation: Evaluation::Score,
                goal: Some(Position::new(1, 2)),
                ..Default::default()
            }
        );
    }
}
