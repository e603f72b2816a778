//! Apple Catch - a falling-apple basket game
//!
//! Core modules:
//! - `sim`: Deterministic session simulation (controller, physics, countdown)
//! - `renderer`: WebGPU rendering pipeline
//! - `ui`: Localized HUD and end-panel labels
//! - `settings`: Player preferences
//! - `highscores`: Local leaderboard

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::PlatformError;
pub use highscores::HighScores;
pub use settings::{Locale, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions (pixels, origin top-left, y down)
    pub const FIELD_WIDTH: f32 = 500.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Gravity on the falling item and its terminal fall speed (pixels/s)
    pub const FALL_SPEED: f32 = 300.0;
    /// Basket horizontal speed
    pub const PLAYER_SPEED: f32 = FALL_SPEED + 50.0;

    /// Session length
    pub const SESSION_SECONDS: f32 = 30.0;
    /// Catches needed to win
    pub const WIN_SCORE: u32 = 10;
    /// Item respawn x is drawn from [0, ITEM_SPAWN_RANGE)
    pub const ITEM_SPAWN_RANGE: u32 = 400;

    /// Basket sprite size
    pub const BASKET_WIDTH: f32 = 100.0;
    pub const BASKET_HEIGHT: f32 = 80.0;
    /// Basket rests this far above the bottom edge
    pub const BASKET_BOTTOM_OFFSET: f32 = 100.0;

    /// Apple sprite size
    pub const APPLE_SIZE: f32 = 40.0;

    /// Coin burst parameters
    pub const BURST_DURATION: f32 = 0.1;
    pub const BURST_RATE: f32 = 240.0;
    pub const PARTICLE_SPEED: f32 = 100.0;
    pub const PARTICLE_GRAVITY: f32 = FALL_SPEED - 200.0;
    pub const PARTICLE_LIFETIME: f32 = 0.8;
    pub const PARTICLE_SIZE: f32 = 6.0;
    pub const MAX_PARTICLES: usize = 128;
}
