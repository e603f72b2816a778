//! Deterministic session simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Host effects (audio, particles, HUD) only through the traits in `hooks`

pub mod autopilot;
pub mod controller;
pub mod countdown;
pub mod hooks;
pub mod input;
pub mod particles;
pub mod physics;
pub mod state;

pub use autopilot::steer;
pub use controller::GameController;
pub use countdown::Countdown;
pub use hooks::{AudioPlayer, LogPresenter, ParticleEmitter, Presenter, Silent, SoundCue};
pub use input::{Controls, Direction, KeyState, horizontal_velocity};
pub use particles::{CoinFountain, Particle};
pub use physics::{Body, overlaps};
pub use state::{GamePhase, Outcome, SessionResult, SessionState};
