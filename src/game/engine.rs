use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::ai;
use super::config::GameConfig;
use super::difficulty::Difficulty;
use super::food::{sample_free_cell, scan_free_cell, FoodManager};
use super::grid::{Cell, Direction};
use super::rival::{RivalId, RivalRoster, RivalSnake};
use super::snake::Player;
use super::state::{GameState, RoundState};

/// What happened during one simulation tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The player ate primary or bonus food this tick
    pub ate_food: bool,
    /// The round ended this tick
    pub game_over: bool,
    /// Rivals removed from play this tick
    pub rivals_died: usize,
}

/// The simulation engine: configuration, the rival identity roster, and a
/// seedable random source. All round state lives in [`GameState`], so one
/// engine can drive any number of independent rounds.
pub struct GameEngine {
    config: GameConfig,
    roster: RivalRoster,
    rng: StdRng,
}

impl GameEngine {
    pub fn new(config: GameConfig, roster: RivalRoster) -> Self {
        Self {
            config,
            roster,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a fixed seed, for reproducible rounds and tests
    pub fn with_seed(config: GameConfig, roster: RivalRoster, seed: u64) -> Self {
        Self {
            config,
            roster,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn roster(&self) -> &RivalRoster {
        &self.roster
    }

    /// Build a fresh round: player at the grid center, primary food placed,
    /// and one rival already in play when the roster allows it.
    pub fn reset(&mut self) -> GameState {
        let width = self.config.grid_width;
        let height = self.config.grid_height;
        let center = Cell::new((width / 2) as i32, (height / 2) as i32);
        let player = Player::new(center, Direction::Right);

        let free_of_player = |c: Cell| !player.snake.contains(c);
        let primary = sample_free_cell(
            &mut self.rng,
            width,
            height,
            self.config.food_spawn_attempts,
            free_of_player,
        )
        .or_else(|| scan_free_cell(width, height, free_of_player))
        .unwrap_or(Cell::new(0, 0));

        let mut state = GameState::new(
            width,
            height,
            player,
            FoodManager::new(primary),
            Difficulty::initial(&self.config),
        );
        self.spawn_rival(&mut state);
        state
    }

    /// Restart after a game over. Ignored in any other round state.
    pub fn request_restart(&mut self, state: &mut GameState) -> bool {
        if state.round != RoundState::GameOver {
            return false;
        }
        *state = self.reset();
        info!("round restarted");
        true
    }

    /// Advance the simulation by one tick.
    ///
    /// The player fully resolves (movement, death, eating, difficulty)
    /// before any rival moves; rivals then move one at a time against the
    /// sequentially updated grid. No-op unless the round is Running.
    pub fn step(&mut self, state: &mut GameState) -> TickOutcome {
        if state.round != RoundState::Running {
            return TickOutcome::default();
        }

        let width = state.grid_width as i32;
        let height = state.grid_height as i32;

        let direction = state.player.commit_direction();
        let new_head = state.player.head().stepped(direction, width, height);

        if state.occupied_by_snake(new_head) {
            state.round = RoundState::GameOver;
            info!(score = state.score, "player crashed, game over");
            return TickOutcome {
                ate_food: false,
                game_over: true,
                rivals_died: 0,
            };
        }

        state.player.snake.push_head(new_head);

        let ate_food = if new_head == state.food.primary {
            state.score += 1;
            self.respawn_primary(state);
            true
        } else if state.food.take_bonus(new_head) {
            state.score += 1;
            true
        } else {
            false
        };
        if !ate_food {
            state.player.snake.pop_tail();
        }

        state.difficulty.update(state.score, &self.config);

        let mut dead = Vec::new();
        for i in 0..state.rivals.len() {
            let chosen = ai::choose_move(state, i, &mut self.rng);
            let head = state.rivals[i].head();
            let rival_head = match chosen {
                Some(dir) => head.stepped(dir, width, height),
                // Holding position duplicates the head; the duplicate is
                // caught by the self-collision check below.
                None => head,
            };
            state.rivals[i].snake.push_head(rival_head);

            let self_hit = state.rivals[i].snake.body[1..].contains(&rival_head);
            if state.player.snake.contains(rival_head) || self_hit {
                let remains = state.rivals[i].snake.body[1..].to_vec();
                state.food.add_bonus(remains);
                dead.push(i);
            } else if rival_head == state.food.primary {
                // The rival grows; no score for anyone
                self.respawn_primary(state);
            } else {
                state.rivals[i].snake.pop_tail();
            }
        }

        for &i in dead.iter().rev() {
            let rival = state.rivals.remove(i);
            debug!(rival = rival.id.0, "rival died");
        }

        TickOutcome {
            ate_food,
            game_over: false,
            rivals_died: dead.len(),
        }
    }

    /// Advance the spawn scheduler by one unpaused wall-clock second.
    ///
    /// Runs on its own fixed one-second cadence, uncoupled from the
    /// simulation tick rate. Every `spawn_interval_secs` accumulated seconds
    /// a not-yet-used rival identity enters play; returns the identity when
    /// one spawned.
    pub fn on_second(&mut self, state: &mut GameState) -> Option<RivalId> {
        if state.round != RoundState::Running {
            return None;
        }
        state.elapsed_secs += 1;
        if state.elapsed_secs % self.config.spawn_interval_secs != 0 {
            return None;
        }
        self.spawn_rival(state)
    }

    /// Activate a random unused rival identity at a validated position
    fn spawn_rival(&mut self, state: &mut GameState) -> Option<RivalId> {
        let available: Vec<RivalId> = self
            .roster
            .ids()
            .filter(|id| !state.spawned_identities.contains(id))
            .collect();
        let id = *available.choose(&mut self.rng)?;

        let spawn = self.find_rival_spawn(state);
        state.spawned_identities.insert(id);
        state.rivals.push(RivalSnake::new(id, spawn));
        info!(rival = id.0, x = spawn.x, y = spawn.y, "rival spawned");
        Some(id)
    }

    /// Sample a cell free of snakes and food, falling back to (0, 0) when
    /// the attempts run out. A collision at the fallback cell is resolved by
    /// normal lethality rules on the next tick.
    fn find_rival_spawn(&mut self, state: &GameState) -> Cell {
        let is_free = |c: Cell| !state.occupied_by_snake(c) && !state.food.is_food(c);
        sample_free_cell(
            &mut self.rng,
            state.grid_width,
            state.grid_height,
            self.config.rival_spawn_attempts,
            is_free,
        )
        .unwrap_or(Cell::new(0, 0))
    }

    /// Reassign the primary food to a free cell.
    ///
    /// Bounded sampling first, then a deterministic scan; on a completely
    /// saturated grid the food stays where it is.
    fn respawn_primary(&mut self, state: &mut GameState) {
        let is_free = |c: Cell| !state.occupied_by_snake(c) && !state.food.bonus.contains(&c);
        let cell = sample_free_cell(
            &mut self.rng,
            state.grid_width,
            state.grid_height,
            self.config.food_spawn_attempts,
            is_free,
        )
        .or_else(|| scan_free_cell(state.grid_width, state.grid_height, is_free));

        match cell {
            Some(cell) => state.food.primary = cell,
            None => warn!("grid saturated, leaving primary food in place"),
        }
    }
}
