//! Coin burst particle system
//!
//! Emits small coins around an anchor for a short window after `start`.
//! Purely visual; gameplay never reads particle state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::hooks::ParticleEmitter;
use crate::consts::*;

/// A single coin
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 at spawn, 0 when dead
    pub life: f32,
    pub size: f32,
}

/// Emitter backing the catch burst
#[derive(Debug, Clone)]
pub struct CoinFountain {
    anchor: Vec2,
    /// Seconds of emission left in the current burst
    emit_timer: f32,
    /// Fractional particles carried between steps
    emit_carry: f32,
    max_particles: usize,
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl CoinFountain {
    pub fn new(seed: u64) -> Self {
        Self::with_capacity(seed, MAX_PARTICLES)
    }

    /// Emitter with a custom particle cap (0 disables particles)
    pub fn with_capacity(seed: u64, max_particles: usize) -> Self {
        Self {
            anchor: Vec2::ZERO,
            emit_timer: 0.0,
            emit_carry: 0.0,
            max_particles,
            particles: Vec::with_capacity(max_particles),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_emitting(&self) -> bool {
        self.emit_timer > 0.0
    }

    fn spawn(&mut self) {
        if self.particles.len() >= self.max_particles {
            return;
        }
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        self.particles.push(Particle {
            pos: self.anchor,
            vel: Vec2::from_angle(angle) * PARTICLE_SPEED,
            life: 1.0,
            size: PARTICLE_SIZE,
        });
    }
}

impl ParticleEmitter for CoinFountain {
    fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor = anchor;
    }

    fn start(&mut self) {
        self.emit_timer = BURST_DURATION;
    }

    fn stop(&mut self) {
        self.emit_timer = 0.0;
        self.emit_carry = 0.0;
        self.particles.clear();
    }

    fn advance(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.vel.y += PARTICLE_GRAVITY * dt;
            p.pos += p.vel * dt;
            p.life -= dt / PARTICLE_LIFETIME;
        }
        self.particles.retain(|p| p.life > 0.0);

        if self.emit_timer > 0.0 {
            let window = dt.min(self.emit_timer);
            self.emit_timer -= window;
            self.emit_carry += window * BURST_RATE;
            while self.emit_carry >= 1.0 {
                self.emit_carry -= 1.0;
                self.spawn();
            }
        }
    }
}
