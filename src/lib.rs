//! Snake Arena - terminal snake against AI rival snakes
//!
//! This library provides:
//! - Core simulation: grid, snakes, food, rival AI, difficulty, tick engine (game module)
//! - Rival identity discovery and colors (assets module)
//! - TUI rendering (render module)
//! - Keyboard input translation (input module)
//! - Persistent high scores (score module)
//! - The async game loop tying it together (app module)

pub mod app;
pub mod assets;
pub mod game;
pub mod input;
pub mod render;
pub mod score;
