use std::collections::HashSet;

use super::difficulty::Difficulty;
use super::food::FoodManager;
use super::grid::{Cell, Direction};
use super::rival::{RivalId, RivalSnake};
use super::snake::Player;

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Running,
    Paused,
    /// Terminal until an explicit restart
    GameOver,
}

/// Complete simulation state for one round.
///
/// An explicit context struct: every operation takes it as a parameter, so
/// independent game instances and deterministic tests are possible.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid_width: usize,
    pub grid_height: usize,
    pub player: Player,
    pub rivals: Vec<RivalSnake>,
    pub food: FoodManager,
    pub score: u32,
    pub round: RoundState,
    /// Unpaused whole seconds since the round started
    pub elapsed_secs: u64,
    /// Identities already used this round; each spawns at most once
    pub spawned_identities: HashSet<RivalId>,
    pub difficulty: Difficulty,
}

impl GameState {
    pub fn new(
        grid_width: usize,
        grid_height: usize,
        player: Player,
        food: FoodManager,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            grid_width,
            grid_height,
            player,
            rivals: Vec::new(),
            food,
            score: 0,
            round: RoundState::Running,
            elapsed_secs: 0,
            spawned_identities: HashSet::new(),
            difficulty,
        }
    }

    /// Forward a direction-change request to the player snake
    pub fn request_direction(&mut self, direction: Direction) {
        self.player.request_direction(direction);
    }

    /// Toggle between Running and Paused; ignored once the round is over
    pub fn toggle_pause(&mut self) {
        self.round = match self.round {
            RoundState::Running => RoundState::Paused,
            RoundState::Paused => RoundState::Running,
            RoundState::GameOver => RoundState::GameOver,
        };
    }

    /// Pause without toggling, used when the terminal loses focus
    pub fn pause(&mut self) {
        if self.round == RoundState::Running {
            self.round = RoundState::Paused;
        }
    }

    /// Whether any snake body (player or rival) occupies the cell
    pub fn occupied_by_snake(&self, cell: Cell) -> bool {
        self.player.snake.contains(cell) || self.rivals.iter().any(|r| r.snake.contains(cell))
    }
}
