//! Depth limited search for games with more than one agent
//!
//! Agent 0 is always the one we are searching for, and it always maximizes. What the other
//! agents do depends on the [Strategy]:
//!
//! - [Strategy::Minimax] assumes every other agent is working to minimize agent 0's score
//! - [Strategy::AlphaBeta] gets the same answers as minimax, but carries alpha and beta bounds
//!   down the tree so it can skip branches that can't change the result
//! - [Strategy::Expectimax] assumes every other agent picks uniformly at random from its legal
//!   actions, so their nodes are worth the mean of their children
//!
//! All three share a single recursive function, which looks up each agent's [Role] in a
//! [RoleTable]. Depth is counted in plies, where a ply is one move for every agent.
//!
//! ```rust
//! use pacai_minimax::{Action, AdversarialGame, AgentIndex};
//! use pacai_minimax::multiagent::{MultiAgentSearcher, SearchOptions, Strategy};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Move { Stay, Up, Down }
//!
//! impl Action for Move {
//!     fn noop() -> Self { Move::Stay }
//! }
//!
//! // A counter that agent 0 wants high and agent 1 wants low
//! #[derive(Debug, Clone)]
//! struct Counter(i32);
//!
//! impl AdversarialGame for Counter {
//!     type Action = Move;
//!
//!     fn legal_actions(&self, _agent: AgentIndex) -> Vec<Move> {
//!         vec![Move::Stay, Move::Up, Move::Down]
//!     }
//!
//!     fn generate_successor(&self, _agent: AgentIndex, action: Move) -> Self {
//!         match action {
//!             Move::Stay => Counter(self.0),
//!             Move::Up => Counter(self.0 + 1),
//!             Move::Down => Counter(self.0 - 1),
//!         }
//!     }
//!
//!     fn num_agents(&self) -> usize { 2 }
//!
//!     fn get_score(&self) -> f64 { f64::from(self.0) }
//! }
//!
//! let searcher = MultiAgentSearcher::new(
//!     |game: &Counter| game.get_score(),
//!     "counter",
//!     SearchOptions { max_depth: 1, strategy: Strategy::AlphaBeta },
//! );
//!
//! assert_eq!(searcher.choose_action(&Counter(0)), Move::Up);
//! ```

mod role;
pub use role::{next_turn, Role, RoleTable, Strategy, UnknownStrategy};

mod minimax_return;
pub use minimax_return::MinMaxReturn;

mod eval;
pub use eval::{branch_actions, MultiAgentSearcher, SearchOptions};
