#![warn(missing_debug_implementations, missing_docs)]
//! This crate implements adversarial search for Pacman style games. You provide a 'scoring'
//! function that turns a game state into an `f64`, where higher is better for agent 0.
//!
//! The crate doesn't know anything about the rules of any particular game. We lean on the
//! [AdversarialGame] trait for the legal actions of each agent and for generating successor
//! states, which are always new values and never mutate the state they were generated from.
//!
//! There are two kinds of agents in here:
//!
//! - [multiagent::MultiAgentSearcher] looks a fixed number of plies ahead, using minimax,
//!   alpha-beta or expectimax
//! - [reflex::ReflexAgent] only looks at its own immediate actions and breaks ties randomly

use std::fmt::Debug;

pub mod multiagent;
pub mod reflex;

mod score;
pub use score::{CountedScore, Scorable};

/// Index of an agent in turn order
///
/// Agent 0 is always the agent we are choosing actions for. Every other index is an adversary
/// (or at least not on our side), and agents always move in increasing index order
pub type AgentIndex = usize;

/// The agent that every search is run on behalf of
pub const MAXIMIZING_AGENT: AgentIndex = 0;

/// Something an agent can do on its turn
///
/// Every action vocabulary has a distinguished 'no-op', the action that doesn't move the game
/// forward. The search engines never branch on it.
pub trait Action: Copy + Eq + Debug {
    /// The action that does nothing
    fn noop() -> Self;

    /// Is this the no-op action?
    fn is_noop(&self) -> bool {
        *self == Self::noop()
    }
}

/// The capabilities a game state needs to expose to be searched
pub trait AdversarialGame {
    /// The action vocabulary of this game
    type Action: Action;

    /// The actions the given agent is allowed to take from this state
    ///
    /// An empty list means the agent can't move, which the engines treat as a leaf
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// The state after `agent` takes `action`
    fn generate_successor(&self, agent: AgentIndex, action: Self::Action) -> Self
    where
        Self: Sized;

    /// How many agents are taking turns, including agent 0
    fn num_agents(&self) -> usize;

    /// The raw score of the game at this state
    fn get_score(&self) -> f64;
}
