use serde::{Deserialize, Serialize};

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,

    /// Base simulation tick interval in milliseconds
    pub base_tick_ms: u64,
    /// Lower bound for the tick interval
    pub min_tick_ms: u64,
    /// Interval reduction per speed level
    pub speedup_per_level_ms: u64,
    /// Points needed per speed level
    pub points_per_level: u32,

    /// Score at which rival AI loses its hesitation handicap
    pub competence_threshold: u32,

    /// Seconds between rival spawn opportunities
    pub spawn_interval_secs: u64,
    /// Sampling attempts for a rival spawn position before the fallback
    pub rival_spawn_attempts: usize,
    /// Sampling attempts for a food respawn before scanning for a free cell
    pub food_spawn_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 24,
            base_tick_ms: 100,
            min_tick_ms: 30,
            speedup_per_level_ms: 10,
            points_per_level: 5,
            competence_threshold: 15,
            spawn_interval_secs: 60,
            rival_spawn_attempts: 50,
            food_spawn_attempts: 200,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }
}
