//! Graph search over anything that implements [SearchProblem]
//!
//! Every strategy is a graph search: a state is expanded at most once, unless a strictly cheaper
//! path to it turns up later during a best first search. Depth first and breadth first search
//! differ only in their [Frontier]. Uniform cost and A* share one best first search over an
//! [IndexedPriorityQueue] keyed by state, so finding a cheaper path to a queued state lowers its
//! priority instead of queueing it twice.
//!
//! A* trusts its heuristic. An inadmissible heuristic isn't detected and can return a path that
//! costs more than the best one.

use std::{fmt::Debug, fmt::Display, hash::Hash, str::FromStr};

use anyhow::bail;
use decorum::N64;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info_span};

mod frontier;
pub use frontier::{Frontier, Queue, Stack};

mod priority_queue;
pub use priority_queue::IndexedPriorityQueue;

pub mod problems;

/// One step out of a state
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<State, Action> {
    pub state: State,
    pub action: Action,
    pub cost: f64,
}

pub trait SearchProblem {
    type State: Clone + Eq + Hash + Debug;
    type Action: Clone + Debug;

    fn starting_state(&self) -> Self::State;
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Successors in a fixed order. Searches are only deterministic if this is
    fn successor_states(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;
}

/// A state along with how we got there
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode<State, Action> {
    pub state: State,
    pub path: Vec<Action>,
    pub cost: f64,
}

impl<State, Action: Clone> SearchNode<State, Action> {
    pub fn root(state: State) -> Self {
        Self {
            state,
            path: vec![],
            cost: 0.0,
        }
    }

    pub fn child(&self, successor: Successor<State, Action>) -> Self {
        let mut path = self.path.clone();
        path.push(successor.action);

        Self {
            state: successor.state,
            path,
            cost: self.cost + successor.cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    DepthFirst,
    BreadthFirst,
    UniformCost,
    AStar,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 4] = [
        SearchStrategy::DepthFirst,
        SearchStrategy::BreadthFirst,
        SearchStrategy::UniformCost,
        SearchStrategy::AStar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::DepthFirst => "dfs",
            SearchStrategy::BreadthFirst => "bfs",
            SearchStrategy::UniformCost => "ucs",
            SearchStrategy::AStar => "astar",
        }
    }
}

impl Default for SearchStrategy {
    fn default() -> Self {
        SearchStrategy::AStar
    }
}

impl Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let strategy = match s.to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" | "depthfirst" => SearchStrategy::DepthFirst,
            "bfs" | "breadth-first" | "breadthfirst" => SearchStrategy::BreadthFirst,
            "ucs" | "uniform-cost" | "uniformcost" => SearchStrategy::UniformCost,
            "astar" | "a-star" | "a*" => SearchStrategy::AStar,
            other => bail!(
                "unknown search strategy '{}', expected one of dfs, bfs, ucs or astar",
                other
            ),
        };

        Ok(strategy)
    }
}

/// The heuristic that knows nothing. A* with this is uniform cost search
pub fn null_heuristic<State, Problem>(_state: &State, _problem: &Problem) -> f64 {
    0.0
}

/// Run `strategy` on `problem`. `heuristic` is only used by A*, which falls back to
/// [null_heuristic] without one
///
/// Returns the actions from the starting state to a goal, which is empty when the start is
/// already a goal, or `None` when no goal is reachable.
pub fn search<P: SearchProblem>(
    problem: &P,
    strategy: SearchStrategy,
    heuristic: Option<&dyn Fn(&P::State, &P) -> f64>,
) -> Option<Vec<P::Action>> {
    info_span!("graph_search", %strategy).in_scope(|| match strategy {
        SearchStrategy::DepthFirst => depth_first_search(problem),
        SearchStrategy::BreadthFirst => breadth_first_search(problem),
        SearchStrategy::UniformCost => uniform_cost_search(problem),
        SearchStrategy::AStar => match heuristic {
            Some(heuristic) => a_star_search(problem, heuristic),
            None => a_star_search(problem, null_heuristic::<P::State, P>),
        },
    })
}

pub fn depth_first_search<P: SearchProblem>(problem: &P) -> Option<Vec<P::Action>> {
    graph_search(problem, Stack::default())
}

/// Finds a path with the fewest actions, whatever they cost
pub fn breadth_first_search<P: SearchProblem>(problem: &P) -> Option<Vec<P::Action>> {
    graph_search(problem, Queue::default())
}

/// Finds a cheapest path
pub fn uniform_cost_search<P: SearchProblem>(problem: &P) -> Option<Vec<P::Action>> {
    best_first_search(problem, null_heuristic::<P::State, P>)
}

/// Finds a cheapest path, provided `heuristic` never overestimates the remaining cost
pub fn a_star_search<P, H>(problem: &P, heuristic: H) -> Option<Vec<P::Action>>
where
    P: SearchProblem,
    H: Fn(&P::State, &P) -> f64,
{
    best_first_search(problem, heuristic)
}

fn graph_search<P, F>(problem: &P, mut frontier: F) -> Option<Vec<P::Action>>
where
    P: SearchProblem,
    F: Frontier<SearchNode<P::State, P::Action>>,
{
    let start = problem.starting_state();
    if problem.is_goal(&start) {
        return Some(vec![]);
    }

    let mut reached: FxHashSet<P::State> = FxHashSet::default();
    let mut expanded = 0;

    frontier.push(SearchNode::root(start));

    while let Some(node) = frontier.pop() {
        if reached.contains(&node.state) {
            continue;
        }

        if problem.is_goal(&node.state) {
            debug!(expanded, length = node.path.len(), "Found a path");
            return Some(node.path);
        }

        reached.insert(node.state.clone());
        expanded += 1;

        for successor in problem.successor_states(&node.state) {
            if !reached.contains(&successor.state) {
                frontier.push(node.child(successor));
            }
        }
    }

    debug!(expanded, "Ran out of states without reaching a goal");
    None
}

fn best_first_search<P, H>(problem: &P, heuristic: H) -> Option<Vec<P::Action>>
where
    P: SearchProblem,
    H: Fn(&P::State, &P) -> f64,
{
    let start = problem.starting_state();
    if problem.is_goal(&start) {
        return Some(vec![]);
    }

    let mut frontier: IndexedPriorityQueue<P::State, N64, SearchNode<P::State, P::Action>> =
        IndexedPriorityQueue::new();
    // The cheapest cost we have found to each state so far
    let mut reached: FxHashMap<P::State, f64> = FxHashMap::default();
    let mut expanded = 0;

    reached.insert(start.clone(), 0.0);
    frontier.push_or_decrease(
        start.clone(),
        N64::from(heuristic(&start, problem)),
        SearchNode::root(start),
    );

    while let Some((state, _, node)) = frontier.pop() {
        if problem.is_goal(&state) {
            debug!(expanded, length = node.path.len(), cost = node.cost, "Found a path");
            return Some(node.path);
        }

        expanded += 1;

        for successor in problem.successor_states(&state) {
            let cost = node.cost + successor.cost;

            if let Some(&known) = reached.get(&successor.state) {
                if known <= cost {
                    continue;
                }
            }

            reached.insert(successor.state.clone(), cost);

            let priority = N64::from(cost + heuristic(&successor.state, problem));
            let child = node.child(successor);
            frontier.push_or_decrease(child.state.clone(), priority, child);
        }
    }

    debug!(expanded, "Ran out of states without reaching a goal");
    None
}
