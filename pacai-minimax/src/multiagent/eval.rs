use derivative::Derivative;
use itertools::Itertools;
use tracing::{info_span, warn};

use crate::{Action, AdversarialGame, AgentIndex, Scorable, MAXIMIZING_AGENT};

use super::{next_turn, MinMaxReturn, Role, RoleTable, Strategy};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// This is the struct that wraps a scoring function and can be used to run a multi-agent search
/// for agent 0
///
/// It also outputs traces using the [tracing] crate.
pub struct MultiAgentSearcher<ScorableType> {
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    /// Shows up in the traces for each decision
    pub name: &'static str,
    options: SearchOptions,
    roles: RoleTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Optional properties that can be defined for a [MultiAgentSearcher]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use pacai_minimax::multiagent::{SearchOptions, Strategy};
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.max_depth, 2);
/// assert_eq!(defaults.strategy, Strategy::Minimax);
/// ```
pub struct SearchOptions {
    /// How many full rounds of moves (one per agent) to look ahead before scoring
    ///
    /// Defaults to 2
    pub max_depth: usize,
    /// Which search strategy to run
    pub strategy: Strategy,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_depth: 2,
            strategy: Strategy::Minimax,
        }
    }
}

/// The actions `agent` can branch on, which is every legal action except the no-op
pub fn branch_actions<GameType: AdversarialGame>(
    node: &GameType,
    agent: AgentIndex,
) -> Vec<GameType::Action> {
    node.legal_actions(agent)
        .into_iter()
        .filter(|action| !action.is_noop())
        .collect_vec()
}

impl<ScorableType> MultiAgentSearcher<ScorableType> {
    /// Construct a new `MultiAgentSearcher`
    ///
    /// ```rust
    /// use pacai_minimax::multiagent::{MultiAgentSearcher, SearchOptions, Strategy};
    ///
    /// // Scores would normally come from looking at the game state
    /// fn score_function(state: &u32) -> f64 { f64::from(*state) }
    ///
    /// let searcher = MultiAgentSearcher::new(
    ///    score_function,
    ///    "alpha_beta_agent",
    ///    SearchOptions {
    ///        strategy: Strategy::AlphaBeta,
    ///        ..Default::default()
    ///    },
    /// );
    ///
    /// assert_eq!(searcher.options().max_depth, 2);
    /// ```
    pub fn new(score_function: ScorableType, name: &'static str, options: SearchOptions) -> Self {
        Self {
            score_function,
            name,
            roles: RoleTable::for_strategy(options.strategy),
            options,
        }
    }

    /// Replace the roles derived from the strategy with an explicit table
    ///
    /// Pruning is still controlled by the strategy, and is switched off underneath any
    /// [Role::Expectation] node
    pub fn with_roles(mut self, roles: RoleTable) -> Self {
        self.roles = roles;
        self
    }

    /// The options this searcher was built with
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// The role table used to decide how each agent's node is valued
    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    /// The scoring function used at the leaves
    pub fn score_function(&self) -> &ScorableType {
        &self.score_function
    }

    /// Pick the action agent 0 should take from `game`
    ///
    /// This runs [MultiAgentSearcher::search] and returns the root's best action. If agent 0
    /// doesn't have any actions to branch on we return the no-op.
    pub fn choose_action<GameType>(&self, game: &GameType) -> GameType::Action
    where
        GameType: AdversarialGame,
        ScorableType: Scorable<GameType>,
    {
        info_span!(
            "multiagent_search",
            searcher = self.name,
            strategy = %self.options.strategy,
            max_depth = self.options.max_depth,
            num_agents = game.num_agents(),
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
            leaves = tracing::field::Empty,
        )
        .in_scope(|| {
            let result = self.search(game);

            let current_span = tracing::Span::current();
            current_span.record("chosen_score", result.score());
            current_span.record("leaves", result.leaf_count());

            match result.best_action() {
                Some(action) => {
                    current_span.record("chosen_action", format!("{:?}", action).as_str());
                    action
                }
                None => {
                    warn!("Agent 0 has no actions to search, choosing the no-op");
                    <GameType::Action as Action>::noop()
                }
            }
        })
    }

    /// This runs the search to the configured depth, returning a struct that contains all the
    /// information about the 'tree' we searched.
    ///
    /// The return value is a recursive struct that tells you the score of the current node, and
    /// the score of all its explored children.
    pub fn search<GameType>(&self, game: &GameType) -> MinMaxReturn<GameType::Action>
    where
        GameType: AdversarialGame,
        ScorableType: Scorable<GameType>,
    {
        self.value(
            game,
            MAXIMIZING_AGENT,
            0,
            f64::NEG_INFINITY,
            f64::INFINITY,
        )
    }

    fn value<GameType>(
        &self,
        node: &GameType,
        agent: AgentIndex,
        ply: usize,
        alpha: f64,
        beta: f64,
    ) -> MinMaxReturn<GameType::Action>
    where
        GameType: AdversarialGame,
        ScorableType: Scorable<GameType>,
    {
        let actions = branch_actions(node, agent);

        if ply >= self.options.max_depth || actions.is_empty() {
            return MinMaxReturn::Leaf {
                score: self.score_function.score(node),
            };
        }

        let role = self.roles.role(agent);
        let (next_agent, next_ply) = next_turn(agent, ply, node.num_agents());

        // Bounds from above an averaging node don't say anything about its children
        let (mut alpha, mut beta) = match role {
            Role::Expectation => (f64::NEG_INFINITY, f64::INFINITY),
            Role::Max | Role::Min => (alpha, beta),
        };
        let prune = self.options.strategy.prunes();

        let mut options = Vec::with_capacity(actions.len());
        let mut best_action = None;
        let mut best_score = match role {
            Role::Min => f64::INFINITY,
            Role::Max | Role::Expectation => f64::NEG_INFINITY,
        };
        let mut alpha_beta_cutoff = false;

        for action in actions {
            let successor = node.generate_successor(agent, action);
            let next_return = self.value(&successor, next_agent, next_ply, alpha, beta);
            let value = next_return.score();
            options.push((action, next_return));

            match role {
                Role::Max => {
                    if best_action.is_none() || value > best_score {
                        best_score = value;
                        best_action = Some(action);
                        alpha = alpha.max(value);
                    }

                    if prune && value >= beta {
                        alpha_beta_cutoff = true;
                        break;
                    }
                }
                Role::Min => {
                    if best_action.is_none() || value < best_score {
                        best_score = value;
                        best_action = Some(action);
                        beta = beta.min(value);
                    }

                    if prune && value <= alpha {
                        alpha_beta_cutoff = true;
                        break;
                    }
                }
                Role::Expectation => {}
            }
        }

        let score = match role {
            Role::Expectation => {
                let total: f64 = options.iter().map(|(_, r)| r.score()).sum();
                total / options.len() as f64
            }
            Role::Max | Role::Min => best_score,
        };

        MinMaxReturn::Node {
            agent,
            role,
            options,
            best_action,
            score,
            alpha_beta_cutoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CountedScore;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Branch {
        Stop,
        Left,
        Right,
    }

    impl Action for Branch {
        fn noop() -> Self {
            Branch::Stop
        }
    }

    /// A game where every agent picks Left or Right (or Stop), so the state is the path taken
    /// and a leaf's value can be looked up by reading the path as a binary number
    #[derive(Debug, Clone)]
    struct TreeGame {
        path: Vec<Branch>,
        num_agents: usize,
        stuck: bool,
    }

    impl TreeGame {
        fn new(num_agents: usize) -> Self {
            Self {
                path: vec![],
                num_agents,
                stuck: false,
            }
        }

        fn leaf_index(&self) -> usize {
            self.path.iter().fold(0, |index, branch| match branch {
                Branch::Right => index * 2 + 1,
                _ => index * 2,
            })
        }
    }

    impl AdversarialGame for TreeGame {
        type Action = Branch;

        fn legal_actions(&self, _agent: AgentIndex) -> Vec<Branch> {
            if self.stuck {
                vec![Branch::Stop]
            } else {
                vec![Branch::Stop, Branch::Left, Branch::Right]
            }
        }

        fn generate_successor(&self, _agent: AgentIndex, action: Branch) -> Self {
            let mut path = self.path.clone();
            path.push(action);

            Self {
                path,
                num_agents: self.num_agents,
                stuck: self.stuck,
            }
        }

        fn num_agents(&self) -> usize {
            self.num_agents
        }

        fn get_score(&self) -> f64 {
            0.0
        }
    }

    fn leaves(values: Vec<f64>) -> impl Fn(&TreeGame) -> f64 {
        move |game: &TreeGame| values[game.leaf_index()]
    }

    fn searcher<S>(score: S, strategy: Strategy, max_depth: usize) -> MultiAgentSearcher<S> {
        MultiAgentSearcher::new(
            score,
            "test",
            SearchOptions {
                max_depth,
                strategy,
            },
        )
    }

    #[test]
    fn test_minimax_picks_the_better_action() {
        let minimax = searcher(leaves(vec![5.0, 5.0, 10.0, 10.0]), Strategy::Minimax, 1);

        assert_eq!(minimax.choose_action(&TreeGame::new(2)), Branch::Right);
        assert_eq!(minimax.search(&TreeGame::new(2)).score(), 10.0);
    }

    #[test]
    fn test_minimax_assumes_the_ghost_minimizes() {
        // Left is 3 or 12, Right is 2 or 8, so the ghost holds Left to 3 and Right to 2
        let minimax = searcher(leaves(vec![3.0, 12.0, 2.0, 8.0]), Strategy::Minimax, 1);
        let result = minimax.search(&TreeGame::new(2));

        assert_eq!(result.score(), 3.0);
        assert_eq!(result.best_action(), Some(Branch::Left));
        assert_eq!(
            result.chosen_route(),
            vec![(0, Branch::Left), (1, Branch::Left)]
        );
    }

    #[test]
    fn test_alpha_beta_matches_minimax_with_fewer_evaluations() {
        let values = vec![3.0, 12.0, 2.0, 8.0];
        let game = TreeGame::new(2);

        let minimax = searcher(CountedScore::new(leaves(values.clone())), Strategy::Minimax, 1);
        let alpha_beta = searcher(CountedScore::new(leaves(values)), Strategy::AlphaBeta, 1);

        let minimax_result = minimax.search(&game);
        let alpha_beta_result = alpha_beta.search(&game);

        assert_eq!(minimax_result.score(), alpha_beta_result.score());
        assert_eq!(minimax_result.best_action(), alpha_beta_result.best_action());

        assert_eq!(minimax.score_function().count(), 4);
        assert_eq!(alpha_beta.score_function().count(), 3);
        assert_eq!(alpha_beta_result.leaf_count(), 3);
    }

    #[test]
    fn test_alpha_beta_agrees_with_minimax_on_deeper_trees() {
        let values: Vec<f64> = (0..64).map(|i| f64::from((i * 37 + 11) % 23)).collect();

        for num_agents in [2, 3] {
            for max_depth in [1, 2] {
                let game = TreeGame::new(num_agents);
                let minimax = searcher(
                    CountedScore::new(leaves(values.clone())),
                    Strategy::Minimax,
                    max_depth,
                );
                let alpha_beta = searcher(
                    CountedScore::new(leaves(values.clone())),
                    Strategy::AlphaBeta,
                    max_depth,
                );

                assert_eq!(
                    minimax.search(&game).score(),
                    alpha_beta.search(&game).score()
                );
                assert!(alpha_beta.score_function().count() <= minimax.score_function().count());
            }
        }
    }

    #[test]
    fn test_expectimax_averages_the_ghost() {
        let expectimax = searcher(leaves(vec![3.0, 12.0, 2.0, 8.0]), Strategy::Expectimax, 1);
        let result = expectimax.search(&TreeGame::new(2));

        // Left averages to 7.5 and Right to 5
        assert_eq!(result.score(), 7.5);
        assert_eq!(result.best_action(), Some(Branch::Left));

        let (_, ghost_node) = &result.options()[0];
        assert_eq!(ghost_node.best_action(), None);
        assert_eq!(ghost_node.options().len(), 2);
    }

    #[test]
    fn test_ties_keep_the_first_action() {
        let minimax = searcher(leaves(vec![4.0, 4.0, 4.0, 4.0]), Strategy::Minimax, 1);

        assert_eq!(minimax.choose_action(&TreeGame::new(2)), Branch::Left);
    }

    #[test]
    fn test_no_op_is_never_explored() {
        fn assert_no_stop(result: &MinMaxReturn<Branch>) {
            for (action, child) in result.options() {
                assert_ne!(*action, Branch::Stop);
                assert_no_stop(child);
            }
        }

        for strategy in Strategy::ALL {
            let search = searcher(leaves(vec![1.0; 64]), strategy, 2);
            assert_no_stop(&search.search(&TreeGame::new(3)));
        }
    }

    #[test]
    fn test_no_actions_chooses_the_no_op() {
        let game = TreeGame {
            stuck: true,
            ..TreeGame::new(2)
        };
        let counted = CountedScore::new(|_: &TreeGame| 1.0);
        let minimax = searcher(counted, Strategy::Minimax, 2);

        assert_eq!(minimax.choose_action(&game), Branch::Stop);
        assert_eq!(minimax.score_function().count(), 1);
    }

    #[test]
    fn test_depth_counts_full_rounds() {
        let values = vec![0.0; 64];

        let three_agents = searcher(CountedScore::new(leaves(values.clone())), Strategy::Minimax, 1);
        three_agents.search(&TreeGame::new(3));
        assert_eq!(three_agents.score_function().count(), 8);

        let two_plies = searcher(CountedScore::new(leaves(values)), Strategy::Minimax, 2);
        two_plies.search(&TreeGame::new(2));
        assert_eq!(two_plies.score_function().count(), 16);
    }

    #[test]
    fn test_mixed_roles_prune_soundly() {
        let values: Vec<f64> = (0..8).map(|i| f64::from((i * 5 + 3) % 7)).collect();
        let roles = RoleTable::new(vec![Role::Max, Role::Min], Role::Expectation);
        let game = TreeGame::new(3);

        let plain = searcher(leaves(values.clone()), Strategy::Minimax, 1).with_roles(roles.clone());
        let pruned = searcher(leaves(values), Strategy::AlphaBeta, 1).with_roles(roles);

        assert_eq!(plain.search(&game).score(), pruned.search(&game).score());
    }

    #[test]
    fn test_text_tree_shows_every_explored_node() {
        let minimax = searcher(leaves(vec![3.0, 12.0, 2.0, 8.0]), Strategy::AlphaBeta, 1);
        let tree = minimax.search(&TreeGame::new(2)).to_text_tree();

        assert!(tree.contains("agent 0 Max 3"));
        assert!(tree.contains("(cutoff)"));
        assert!(tree.contains("Right 12"));
        assert!(tree.contains("Right agent 1 Min 2 (cutoff)"));
    }
}
