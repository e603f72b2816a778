//! Host capabilities the controller depends on
//!
//! The browser build backs these with Web Audio, the particle system and the
//! DOM; tests and the headless runner supply their own.

use glam::Vec2;

use super::state::SessionResult;

/// Sound cues fired by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// An apple landed in the basket
    Coin,
}

/// Fire-and-forget audio
pub trait AudioPlayer {
    fn play(&mut self, cue: SoundCue);
    /// Begin the looping background track
    fn start_music(&mut self);
    /// Silence everything, music included
    fn stop_all(&mut self);
}

/// Particle emitter that follows an anchor point
pub trait ParticleEmitter {
    /// Move the emission point
    fn set_anchor(&mut self, anchor: Vec2);
    /// Begin a short burst at the anchor
    fn start(&mut self);
    /// Stop emitting and drop live particles
    fn stop(&mut self);
    /// Advance live particles
    fn advance(&mut self, _dt: f32) {}
}

/// Text and panels shown to the player
pub trait Presenter {
    fn show_score(&mut self, score: u32);
    fn show_remaining(&mut self, seconds: u32);
    /// Final score and outcome; reveals the end-of-game panel
    fn show_result(&mut self, result: &SessionResult);
}

/// Audio sink that drops everything
#[derive(Debug, Default)]
pub struct Silent;

impl AudioPlayer for Silent {
    fn play(&mut self, _cue: SoundCue) {}
    fn start_music(&mut self) {}
    fn stop_all(&mut self) {}
}

/// Presenter that reports through the log
#[derive(Debug, Default)]
pub struct LogPresenter {
    last_remaining: Option<u32>,
}

impl Presenter for LogPresenter {
    fn show_score(&mut self, score: u32) {
        log::info!("Score: {}", score);
    }

    fn show_remaining(&mut self, seconds: u32) {
        if self.last_remaining != Some(seconds) {
            log::debug!("Time left: {}s", seconds);
            self.last_remaining = Some(seconds);
        }
    }

    fn show_result(&mut self, result: &SessionResult) {
        log::info!("Session over: {:?} with {} catches", result.outcome, result.score);
    }
}
