//! A small Pacman game on a grid, enough to drive the search engines
//!
//! States are immutable. Generating a successor clones the state (the walls are shared) and
//! applies one agent's move to the clone.

use std::{fmt::Display, sync::Arc};

use pacai_minimax::{AdversarialGame, AgentIndex, MAXIMIZING_AGENT};

use crate::{
    layout::Layout,
    types::{
        CapsuleGettableGame, Direction, FoodGettableGame, GhostPositionGettableGame,
        PacmanPositionGettableGame, Position,
    },
};

/// Points lost for every Pacman move, including stopping
pub const TIME_PENALTY: i32 = 1;
pub const FOOD_POINTS: i32 = 10;
pub const WIN_POINTS: i32 = 500;
pub const LOSE_POINTS: i32 = 500;
pub const SCARED_GHOST_POINTS: i32 = 200;
/// How many of its own moves a ghost stays scared for after Pacman eats a capsule
pub const SCARED_TIME: u32 = 40;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Walls {
    width: i32,
    height: i32,
    /// Row major, top row first
    cells: Vec<bool>,
}

impl Walls {
    /// A board with no walls at all
    pub fn open(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
        }
    }

    /// `cells` is row major with the top row (the highest `y`) first
    pub fn from_rows_top_down(width: i32, height: i32, cells: Vec<bool>) -> Self {
        assert_eq!(cells.len(), (width * height) as usize);

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    /// Anything off the board counts as a wall
    pub fn is_wall(&self, position: Position) -> bool {
        if !self.in_bounds(position) {
            return true;
        }

        let row = self.height - 1 - position.y;
        self.cells[(row * self.width + position.x) as usize]
    }

    /// The cardinal directions that don't walk into a wall, with where they lead
    pub fn open_neighbors(
        &self,
        position: Position,
    ) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::CARDINAL
            .into_iter()
            .map(move |direction| (direction, position.step(direction)))
            .filter(|(_, next)| !self.is_wall(*next))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GhostState {
    pub position: Position,
    pub start: Position,
    pub scared_timer: u32,
}

impl GhostState {
    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PacmanGameState {
    walls: Arc<Walls>,
    food: Vec<Position>,
    capsules: Vec<Position>,
    pacman: Position,
    ghosts: Vec<GhostState>,
    score: i32,
    outcome: Option<Outcome>,
}

impl PacmanGameState {
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            walls: Arc::new(layout.walls.clone()),
            food: layout.food.clone(),
            capsules: layout.capsules.clone(),
            pacman: layout.pacman,
            ghosts: layout
                .ghosts
                .iter()
                .map(|&position| GhostState {
                    position,
                    start: position,
                    scared_timer: 0,
                })
                .collect(),
            score: 0,
            outcome: None,
        }
    }

    pub fn walls(&self) -> &Arc<Walls> {
        &self.walls
    }

    pub fn ghosts(&self) -> &[GhostState] {
        &self.ghosts
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_win(&self) -> bool {
        self.outcome == Some(Outcome::Win)
    }

    pub fn is_lose(&self) -> bool {
        self.outcome == Some(Outcome::Lose)
    }

    fn move_pacman(&mut self, direction: Direction) {
        let next = self.pacman.step(direction);
        if !self.walls.is_wall(next) {
            self.pacman = next;
        }

        self.score -= TIME_PENALTY;

        if let Some(index) = self.food.iter().position(|f| *f == self.pacman) {
            self.food.remove(index);
            self.score += FOOD_POINTS;

            if self.food.is_empty() {
                self.score += WIN_POINTS;
                self.outcome = Some(Outcome::Win);
                return;
            }
        }

        if let Some(index) = self.capsules.iter().position(|c| *c == self.pacman) {
            self.capsules.remove(index);
            for ghost in self.ghosts.iter_mut() {
                ghost.scared_timer = SCARED_TIME;
            }
        }

        for ghost_index in 0..self.ghosts.len() {
            self.check_collision(ghost_index);
        }
    }

    fn move_ghost(&mut self, ghost_index: usize, direction: Direction) {
        let Some(ghost) = self.ghosts.get_mut(ghost_index) else {
            return;
        };

        let next = ghost.position.step(direction);
        if !self.walls.is_wall(next) {
            ghost.position = next;
        }
        ghost.scared_timer = ghost.scared_timer.saturating_sub(1);

        self.check_collision(ghost_index);
    }

    fn check_collision(&mut self, ghost_index: usize) {
        if self.outcome.is_some() {
            return;
        }

        let ghost = &mut self.ghosts[ghost_index];
        if ghost.position != self.pacman {
            return;
        }

        if ghost.is_scared() {
            self.score += SCARED_GHOST_POINTS;
            ghost.position = ghost.start;
            ghost.scared_timer = 0;
        } else {
            self.score -= LOSE_POINTS;
            self.outcome = Some(Outcome::Lose);
        }
    }
}

/// Draws the board in the layout format, with scared ghosts drawn as `g`
impl Display for PacmanGameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..self.walls.height()).rev() {
            for x in 0..self.walls.width() {
                let position = Position::new(x, y);

                let c = if let Some(ghost) = self.ghosts.iter().find(|g| g.position == position) {
                    if ghost.is_scared() {
                        'g'
                    } else {
                        'G'
                    }
                } else if position == self.pacman {
                    'P'
                } else if self.walls.is_wall(position) {
                    '%'
                } else if self.food.contains(&position) {
                    '.'
                } else if self.capsules.contains(&position) {
                    'o'
                } else {
                    ' '
                };

                write!(f, "{}", c)?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

impl AdversarialGame for PacmanGameState {
    type Action = Direction;

    /// Pacman can always stop, ghosts have to keep moving. Nobody can move once the game is over
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.is_over() {
            return vec![];
        }

        let position = if agent == MAXIMIZING_AGENT {
            self.pacman
        } else {
            match self.ghosts.get(agent - 1) {
                Some(ghost) => ghost.position,
                None => return vec![],
            }
        };

        let mut actions: Vec<Direction> = self
            .walls
            .open_neighbors(position)
            .map(|(direction, _)| direction)
            .collect();

        if agent == MAXIMIZING_AGENT {
            actions.push(Direction::Stop);
        }

        actions
    }

    fn generate_successor(&self, agent: AgentIndex, action: Direction) -> Self {
        let mut next = self.clone();

        if next.is_over() {
            return next;
        }

        if agent == MAXIMIZING_AGENT {
            next.move_pacman(action);
        } else {
            next.move_ghost(agent - 1, action);
        }

        next
    }

    fn num_agents(&self) -> usize {
        self.ghosts.len() + 1
    }

    fn get_score(&self) -> f64 {
        f64::from(self.score)
    }
}

impl PacmanPositionGettableGame for PacmanGameState {
    fn get_pacman_position(&self) -> Position {
        self.pacman
    }
}

impl FoodGettableGame for PacmanGameState {
    fn get_food(&self) -> &[Position] {
        &self.food
    }
}

impl CapsuleGettableGame for PacmanGameState {
    fn get_capsules(&self) -> &[Position] {
        &self.capsules
    }
}

impl GhostPositionGettableGame for PacmanGameState {
    fn get_ghost_positions(&self) -> Vec<Position> {
        self.ghosts.iter().map(|g| g.position).collect()
    }
}
