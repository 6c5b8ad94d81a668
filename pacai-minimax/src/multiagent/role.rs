use std::{fmt::Display, str::FromStr};

use crate::{AgentIndex, MAXIMIZING_AGENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How a node in the game tree combines the values of its children
pub enum Role {
    /// Take the highest child value
    Max,
    /// Take the lowest child value
    Min,
    /// Take the mean of all the child values, modelling an agent that moves uniformly at random
    Expectation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// The adversarial search strategies we support
pub enum Strategy {
    /// Adversaries minimize agent 0's score
    #[default]
    Minimax,
    /// Same values as [Strategy::Minimax], but skips branches that can't change the result
    AlphaBeta,
    /// Adversaries pick uniformly at random from their legal actions
    Expectimax,
}

impl Strategy {
    /// Every strategy we know about
    pub const ALL: [Strategy; 3] = [Strategy::Minimax, Strategy::AlphaBeta, Strategy::Expectimax];

    /// The role every agent other than agent 0 plays under this strategy
    pub fn adversary_role(self) -> Role {
        match self {
            Strategy::Minimax | Strategy::AlphaBeta => Role::Min,
            Strategy::Expectimax => Role::Expectation,
        }
    }

    /// Whether the search carries alpha and beta bounds and cuts off branches
    pub fn prunes(self) -> bool {
        matches!(self, Strategy::AlphaBeta)
    }

    /// The name used for this strategy on the command line and in traces
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alpha-beta",
            Strategy::Expectimax => "expectimax",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Returned when parsing a [Strategy] from a name we don't recognize
pub struct UnknownStrategy(pub String);

impl Display for UnknownStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown adversarial strategy '{}', expected one of: minimax, alpha-beta, expectimax",
            self.0
        )
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alpha-beta" | "alphabeta" | "alpha_beta" => Ok(Strategy::AlphaBeta),
            "expectimax" => Ok(Strategy::Expectimax),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Looks up the [Role] each agent plays during a search
///
/// Agents with an explicit entry use it, everyone else falls back to the adversary role. This
/// makes it possible to mix adversary models, say one ghost that hunts you and one that wanders
/// around randomly.
pub struct RoleTable {
    roles: Vec<Role>,
    adversary: Role,
}

impl RoleTable {
    /// Agent 0 maximizes and everyone else plays the adversary role of the strategy
    pub fn for_strategy(strategy: Strategy) -> Self {
        Self {
            roles: vec![Role::Max],
            adversary: strategy.adversary_role(),
        }
    }

    /// Explicit roles by agent index, with `adversary` used for agents past the end of `roles`
    ///
    /// `roles` should start with [Role::Max] for agent 0, the searchers always read the best
    /// action for agent 0 off the root of the tree
    pub fn new(roles: Vec<Role>, adversary: Role) -> Self {
        Self { roles, adversary }
    }

    /// The role the given agent plays
    pub fn role(&self, agent: AgentIndex) -> Role {
        self.roles.get(agent).copied().unwrap_or(self.adversary)
    }

    /// True if no agent averages its children, which is when pruning is sound everywhere
    pub fn is_adversarial(&self) -> bool {
        self.adversary != Role::Expectation && !self.roles.contains(&Role::Expectation)
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::for_strategy(Strategy::default())
    }
}

impl From<Strategy> for RoleTable {
    fn from(strategy: Strategy) -> Self {
        Self::for_strategy(strategy)
    }
}

/// The agent whose turn follows `agent`, and the ply depth that turn happens at
///
/// The ply only advances once every agent has moved, so when we wrap back around to agent 0
pub fn next_turn(agent: AgentIndex, ply: usize, num_agents: usize) -> (AgentIndex, usize) {
    let next_agent = (agent + 1) % num_agents;

    if next_agent == MAXIMIZING_AGENT {
        (next_agent, ply + 1)
    } else {
        (next_agent, ply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_roles() {
        let minimax = RoleTable::for_strategy(Strategy::Minimax);
        assert_eq!(minimax.role(0), Role::Max);
        assert_eq!(minimax.role(1), Role::Min);
        assert_eq!(minimax.role(3), Role::Min);

        let expectimax = RoleTable::for_strategy(Strategy::Expectimax);
        assert_eq!(expectimax.role(0), Role::Max);
        assert_eq!(expectimax.role(2), Role::Expectation);
        assert!(!expectimax.is_adversarial());
    }

    #[test]
    fn test_mixed_role_table() {
        let table = RoleTable::new(vec![Role::Max, Role::Min], Role::Expectation);

        assert_eq!(table.role(1), Role::Min);
        assert_eq!(table.role(2), Role::Expectation);
        assert!(!table.is_adversarial());
    }

    #[test]
    fn test_only_alpha_beta_prunes() {
        let pruning: Vec<_> = Strategy::ALL.iter().filter(|s| s.prunes()).collect();

        assert_eq!(pruning, vec![&Strategy::AlphaBeta]);
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("minimax".parse::<Strategy>(), Ok(Strategy::Minimax));
        assert_eq!("AlphaBeta".parse::<Strategy>(), Ok(Strategy::AlphaBeta));
        assert_eq!("expectimax".parse::<Strategy>(), Ok(Strategy::Expectimax));
        assert_eq!(
            "negamax".parse::<Strategy>(),
            Err(UnknownStrategy("negamax".to_owned()))
        );
    }

    #[test]
    fn test_ply_advances_after_a_full_round() {
        assert_eq!(next_turn(0, 0, 3), (1, 0));
        assert_eq!(next_turn(1, 0, 3), (2, 0));
        assert_eq!(next_turn(2, 0, 3), (0, 1));
        assert_eq!(next_turn(0, 4, 1), (0, 5));
    }
}
