//! A one-ply agent that scores each of its own legal actions and picks the best
//!
//! Unlike the searchers in [crate::multiagent], ties between equally good actions are broken at
//! random. The random source is injectable so tests can use a seeded generator.

use derivative::Derivative;
use itertools::Itertools;
use rand::{rngs::ThreadRng, seq::SliceRandom, Rng};

use crate::{Action, AdversarialGame, MAXIMIZING_AGENT};

#[derive(Derivative)]
#[derivative(Debug)]
/// Chooses among the best immediate actions according to an action-aware evaluation function
pub struct ReflexAgent<EvalFn, R = ThreadRng> {
    #[derivative(Debug = "ignore")]
    evaluation_function: EvalFn,
    #[derivative(Debug = "ignore")]
    rng: R,
}

impl<EvalFn> ReflexAgent<EvalFn, ThreadRng> {
    /// A reflex agent that breaks ties with the thread local generator
    pub fn new(evaluation_function: EvalFn) -> Self {
        Self::with_rng(evaluation_function, rand::thread_rng())
    }
}

impl<EvalFn, R: Rng> ReflexAgent<EvalFn, R> {
    /// A reflex agent that breaks ties with the given generator
    pub fn with_rng(evaluation_function: EvalFn, rng: R) -> Self {
        Self {
            evaluation_function,
            rng,
        }
    }

    /// Every legal action of agent 0 that achieves the best evaluation, in enumeration order
    pub fn best_actions<GameType>(&self, game: &GameType) -> Vec<GameType::Action>
    where
        GameType: AdversarialGame,
        EvalFn: Fn(&GameType, GameType::Action) -> f64,
    {
        let scored = game
            .legal_actions(MAXIMIZING_AGENT)
            .into_iter()
            .map(|action| (action, (self.evaluation_function)(game, action)))
            .collect_vec();

        let best_score = scored
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max);

        scored
            .into_iter()
            .filter(|(_, score)| *score == best_score)
            .map(|(action, _)| action)
            .collect_vec()
    }

    /// Pick uniformly at random among the best actions, or the no-op if there are no actions
    pub fn choose_action<GameType>(&mut self, game: &GameType) -> GameType::Action
    where
        GameType: AdversarialGame,
        EvalFn: Fn(&GameType, GameType::Action) -> f64,
    {
        let best = self.best_actions(game);

        best.choose(&mut self.rng)
            .copied()
            .unwrap_or_else(<GameType::Action as Action>::noop)
    }
}
