use std::time::Duration;

use super::config::GameConfig;

/// How capable the rival AI currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Competence {
    /// Rivals hesitate near the player
    Delayed,
    /// No handicap
    Full,
}

/// Tick interval and AI competence derived from the cumulative score
#[derive(Debug, Clone, PartialEq)]
pub struct Difficulty {
    pub tick_interval: Duration,
    pub speed_level: u32,
    pub competence: Competence,
}

impl Difficulty {
    pub fn initial(config: &GameConfig) -> Self {
        Self {
            tick_interval: Duration::from_millis(config.base_tick_ms),
            speed_level: 0,
            competence: Competence::Delayed,
        }
    }

    /// Recompute from the current score.
    ///
    /// The interval shrinks one step per `points_per_level` points and floors
    /// at `min_tick_ms`. The competence flag flips to `Full` the first time
    /// the score reaches the threshold and never reverts.
    pub fn update(&mut self, score: u32, config: &GameConfig) {
        let level = score / config.points_per_level;
        let reduction = config.speedup_per_level_ms * u64::from(level);
        let interval_ms = config.base_tick_ms.saturating_sub(reduction);
        self.tick_interval = Duration::from_millis(interval_ms.max(config.min_tick_ms));
        self.speed_level = level;

        if self.competence == Competence::Delayed && score >= config.competence_threshold {
            self.competence = Competence::Full;
        }
    }
}
