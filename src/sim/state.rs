//! Session state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::countdown::Countdown;
use super::input::Controls;
use super::physics::Body;
use crate::consts::*;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn from_score(score: u32) -> Self {
        if score >= WIN_SCORE {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Scene built, waiting for the start button
    NotStarted,
    /// Active gameplay
    Playing,
    /// Terminal; nothing mutates after this
    GameOver(Outcome),
}

/// Final report handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub score: u32,
    pub outcome: Outcome,
}

/// Everything one play session owns
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Catches so far
    pub score: u32,
    pub countdown: Countdown,
    pub controls: Controls,
    pub basket: Body,
    /// The falling apple
    pub item: Body,
    rng: Pcg32,
}

impl SessionState {
    /// Fresh session: basket bottom-left, apple at the top at a random x
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::NotStarted,
            score: 0,
            countdown: Countdown::new(SESSION_SECONDS),
            controls: Controls::default(),
            basket: Body::basket(),
            item: Body::apple(Vec2::ZERO),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.item.pos.x = state.spawn_x();
        state
    }

    /// Random respawn column in [0, ITEM_SPAWN_RANGE)
    pub fn spawn_x(&mut self) -> f32 {
        self.rng.random_range(0..ITEM_SPAWN_RANGE) as f32
    }

    /// Send the apple back to the top at a new column. Its fall speed is kept.
    pub fn respawn_item(&mut self) {
        let x = self.spawn_x();
        self.item.pos = Vec2::new(x, 0.0);
    }

    pub fn remaining_seconds(&self) -> f32 {
        self.countdown.remaining()
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    /// Where the coin burst is emitted from
    pub fn basket_anchor(&self) -> Vec2 {
        self.basket.center()
    }

    pub fn result(&self) -> Option<SessionResult> {
        match self.phase {
            GamePhase::GameOver(outcome) => Some(SessionResult {
                score: self.score,
                outcome,
            }),
            _ => None,
        }
    }
}
