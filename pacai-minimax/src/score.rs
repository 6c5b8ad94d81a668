use std::cell::Cell;

use derivative::Derivative;

/// This trait is used to control something that can return a score from a game state
///
/// We use this trait to be able to layer in different scoring approaches, such as counting how
/// often the scoring function was called
pub trait Scorable<GameType> {
    /// Convert the given GameType into a score, higher is better for agent 0
    fn score(&self, game: &GameType) -> f64;
}

impl<GameType, FnLike: Fn(&GameType) -> f64> Scorable<GameType> for FnLike {
    fn score(&self, game: &GameType) -> f64 {
        (self)(game)
    }
}

#[derive(Derivative)]
#[derivative(Debug)]
/// Wraps another [Scorable] and counts the number of times it was asked for a score
///
/// Handy for checking how much of the tree a search actually evaluated
pub struct CountedScore<ScorableType> {
    #[derivative(Debug = "ignore")]
    scorable: ScorableType,
    count: Cell<usize>,
}

impl<ScorableType> CountedScore<ScorableType> {
    /// Wrap the given scorable, starting the count at zero
    pub fn new(scorable: ScorableType) -> Self {
        Self {
            scorable,
            count: Cell::new(0),
        }
    }

    /// How many scores have been produced so far
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Reset the count back to zero
    pub fn reset(&self) {
        self.count.set(0);
    }
}

impl<GameType, ScorableType> Scorable<GameType> for CountedScore<ScorableType>
where
    ScorableType: Scorable<GameType>,
{
    fn score(&self, game: &GameType) -> f64 {
        self.count.set(self.count.get() + 1);
        self.scorable.score(game)
    }
}
