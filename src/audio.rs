//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and music - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{AudioPlayer, SoundCue};

/// Background melody (Hz); 0 is a rest
const MELODY: [f32; 16] = [
    523.25, 659.25, 783.99, 659.25, 587.33, 698.46, 880.0, 698.46, 523.25, 659.25, 783.99,
    1046.5, 987.77, 783.99, 659.25, 0.0,
];
/// Seconds per melody note
const NOTE_LENGTH: f64 = 0.25;
/// How far ahead the loop is scheduled. Longer than any session.
const MUSIC_SCHEDULE_SECONDS: f64 = 60.0;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_gain: f32,
    music_gain: f32,
    /// Live music voices, stopped on `stop_all`
    music: Vec<OscillatorNode>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_gain: settings.sfx_gain(),
            music_gain: settings.music_gain(),
            music: Vec::new(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Re-read volumes after settings change. Muting pauses the music.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_gain = settings.sfx_gain();
        self.music_gain = settings.music_gain();
        if let Some(ctx) = &self.ctx {
            if settings.muted {
                let _ = ctx.suspend();
            } else {
                let _ = ctx.resume();
            }
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Coin - two quick rising square blips
    fn play_coin(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 987.77, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain().set_value_at_time(vol * 0.2, t + 0.08).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok();
        osc.frequency().set_value_at_time(987.77, t).ok();
        osc.frequency().set_value_at_time(1318.51, t + 0.08).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }

    /// Schedule the melody loop on one triangle voice
    fn play_music(&mut self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, MELODY[0], OscillatorType::Triangle) else {
            return;
        };
        let start = ctx.current_time();
        let notes = (MUSIC_SCHEDULE_SECONDS / NOTE_LENGTH) as usize;

        for i in 0..notes {
            let t = start + i as f64 * NOTE_LENGTH;
            let freq = MELODY[i % MELODY.len()];
            if freq > 0.0 {
                osc.frequency().set_value_at_time(freq, t).ok();
                gain.gain().set_value_at_time(vol * 0.12, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * 0.04, t + NOTE_LENGTH * 0.9)
                    .ok();
            } else {
                gain.gain().set_value_at_time(0.0, t).ok();
            }
        }

        osc.start().ok();
        osc.stop_with_when(start + MUSIC_SCHEDULE_SECONDS).ok();
        self.music.push(osc);
    }
}

impl AudioPlayer for AudioManager {
    fn play(&mut self, cue: SoundCue) {
        let vol = self.sfx_gain;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.ctx.clone() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Coin => self.play_coin(&ctx, vol),
        }
    }

    fn start_music(&mut self) {
        let vol = self.music_gain;
        if vol <= 0.0 || !self.music.is_empty() {
            return;
        }
        let Some(ctx) = self.ctx.clone() else { return };
        self.resume();
        self.play_music(&ctx, vol);
    }

    fn stop_all(&mut self) {
        for osc in self.music.drain(..) {
            osc.stop().ok();
        }
        if let Some(ctx) = &self.ctx {
            let _ = ctx.suspend();
        }
    }
}
