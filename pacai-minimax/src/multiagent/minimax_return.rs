use text_trees::StringTreeNode;

use crate::{Action, AgentIndex};

use super::Role;

#[derive(Debug, Clone)]
/// This is returned from a multi-agent search
/// It contains all the information we generated about the part of the game tree we explored
pub enum MinMaxReturn<ActionType: Action> {
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen score
    Node {
        /// Which agent was moving at this node
        agent: AgentIndex,
        /// How this node combined the values of its children
        role: Role,
        /// A 'recursive' look at all the actions we explored under us
        /// This is in the order the game enumerated them. Branches that were cut off by
        /// alpha-beta pruning are not in here
        options: Vec<(ActionType, Self)>,
        /// The first action that achieved the chosen score
        /// Always `None` for [Role::Expectation] nodes, which don't choose
        best_action: Option<ActionType>,
        /// The chosen score
        score: f64,
        /// Whether we stopped exploring this node's children early
        alpha_beta_cutoff: bool,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach the maximum depth or the moving agent has no legal actions
    Leaf {
        #[allow(missing_docs)]
        score: f64,
    },
}

impl<ActionType: Action> MinMaxReturn<ActionType> {
    /// Returns the score for this node
    pub fn score(&self) -> f64 {
        match self {
            MinMaxReturn::Node { score, .. } => *score,
            MinMaxReturn::Leaf { score } => *score,
        }
    }

    /// Returns the action the moving agent chose at this node
    /// If we are a leaf node or an expectation node, this will return None
    pub fn best_action(&self) -> Option<ActionType> {
        match self {
            MinMaxReturn::Node { best_action, .. } => *best_action,
            MinMaxReturn::Leaf { .. } => None,
        }
    }

    /// The explored options under this node, empty for leaves
    pub fn options(&self) -> &[(ActionType, Self)] {
        match self {
            MinMaxReturn::Node { options, .. } => options,
            MinMaxReturn::Leaf { .. } => &[],
        }
    }

    /// Returns all the actions in the 'route' through the game tree that the search chose
    /// This is useful for debugging as it shows each of the moves we and our opponents made
    /// during the search. The route stops at the first leaf or expectation node
    pub fn chosen_route(&self) -> Vec<(AgentIndex, ActionType)> {
        match self {
            MinMaxReturn::Leaf { .. } => vec![],
            MinMaxReturn::Node {
                agent,
                options,
                best_action,
                ..
            } => {
                let Some(best_action) = best_action else {
                    return vec![];
                };

                let chosen = options.iter().find(|(a, _)| a == best_action);

                let mut tail = chosen.map(|(_, r)| r.chosen_route()).unwrap_or_default();
                tail.insert(0, (*agent, *best_action));
                tail
            }
        }
    }

    /// How many leaves we explored, which is how many times the scoring function was called
    pub fn leaf_count(&self) -> usize {
        match self {
            MinMaxReturn::Leaf { .. } => 1,
            MinMaxReturn::Node { options, .. } => options.iter().map(|(_, r)| r.leaf_count()).sum(),
        }
    }

    /// This returns a visual representation of the game tree that the search generated
    /// It shows the score, the moving agent and its role at each level
    pub fn to_text_tree(&self) -> String {
        format!("{}", self.to_text_tree_node("root".to_owned()))
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            MinMaxReturn::Leaf { score } => StringTreeNode::new(format!("{} {}", label, score)),
            MinMaxReturn::Node {
                agent,
                role,
                options,
                score,
                alpha_beta_cutoff,
                ..
            } => {
                let cutoff = if *alpha_beta_cutoff { " (cutoff)" } else { "" };
                let mut node = StringTreeNode::new(format!(
                    "{} agent {} {:?} {}{}",
                    label, agent, role, score, cutoff
                ));
                for (action, result) in options {
                    node.push_node(result.to_text_tree_node(format!("{:?}", action)));
                }

                node
            }
        }
    }
}
