//! Session controller
//!
//! Owns the `SessionState` and reacts to the three event sources of a
//! session: the frame tick, the basket/apple overlap, and player input.

use super::hooks::{AudioPlayer, ParticleEmitter, Presenter, SoundCue};
use super::input::{Direction, KeyState, horizontal_velocity};
use super::physics::{integrate_basket, integrate_falling, overlaps};
use super::state::{GamePhase, Outcome, SessionResult, SessionState};
use crate::consts::*;

pub struct GameController<A, E, P> {
    state: SessionState,
    audio: A,
    particles: E,
    presenter: P,
}

impl<A, E, P> GameController<A, E, P>
where
    A: AudioPlayer,
    E: ParticleEmitter,
    P: Presenter,
{
    /// Build a session in the `NotStarted` phase and draw the initial HUD
    pub fn new(seed: u64, audio: A, mut particles: E, mut presenter: P) -> Self {
        let state = SessionState::new(seed);
        particles.set_anchor(state.basket_anchor());
        presenter.show_score(state.score);
        presenter.show_remaining(state.countdown.rounded_remaining());
        Self {
            state,
            audio,
            particles,
            presenter,
        }
    }

    /// Resume the paused scene. Only the first call has an effect.
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::NotStarted {
            return;
        }
        self.state.phase = GamePhase::Playing;
        self.audio.start_music();
        log::info!("Session started (seed {})", self.state.seed);
    }

    /// On-screen control pressed
    pub fn press(&mut self, dir: Direction) {
        if !self.state.is_game_over() {
            self.state.controls.press(dir);
        }
    }

    /// On-screen control released
    pub fn release(&mut self, dir: Direction) {
        if !self.state.is_game_over() {
            self.state.controls.release(dir);
        }
    }

    /// Advance one fixed timestep: countdown, physics, overlap, then `update`
    pub fn step(&mut self, dt: f32, keys: KeyState) {
        if self.state.phase != GamePhase::Playing {
            return;
        }

        if self.state.countdown.advance(dt) {
            self.resolve_game_over();
            return;
        }

        integrate_falling(&mut self.state.item, dt);
        integrate_basket(&mut self.state.basket, dt);
        self.particles.set_anchor(self.state.basket_anchor());
        self.particles.advance(dt);

        if overlaps(&self.state.item, &self.state.basket) {
            self.on_overlap();
            if self.state.phase != GamePhase::Playing {
                return;
            }
        }

        self.update(keys);
    }

    /// Per-frame update. Safe to call more than once in the same frame.
    pub fn update(&mut self, keys: KeyState) {
        if self.state.phase != GamePhase::Playing {
            return;
        }

        if self.state.countdown.is_expired() {
            self.resolve_game_over();
            return;
        }

        // Missed apple: back to the top, no penalty
        if self.state.item.pos.y >= FIELD_HEIGHT {
            self.state.respawn_item();
        }

        self.state.basket.vel.x = horizontal_velocity(keys, self.state.controls);

        self.presenter
            .show_remaining(self.state.countdown.rounded_remaining());
    }

    /// Basket caught the apple
    pub fn on_overlap(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }

        self.audio.play(SoundCue::Coin);
        self.particles.start();
        self.state.respawn_item();

        self.state.score += 1;
        self.presenter.show_score(self.state.score);
        log::debug!("Catch #{}", self.state.score);

        if self.state.score == WIN_SCORE {
            self.resolve_game_over();
        }
    }

    /// End the session. Returns false if it had already ended.
    pub fn resolve_game_over(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }

        self.state.countdown.cancel();
        self.audio.stop_all();
        self.particles.stop();
        self.state.controls.clear();
        self.state.basket.vel = glam::Vec2::ZERO;
        self.state.item.vel = glam::Vec2::ZERO;

        let outcome = Outcome::from_score(self.state.score);
        self.state.phase = GamePhase::GameOver(outcome);

        let result = SessionResult {
            score: self.state.score,
            outcome,
        };
        log::info!("Game over: {:?}, score {}", outcome, result.score);
        self.presenter.show_result(&result);
        true
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.state.result()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn particles(&self) -> &E {
        &self.particles
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hooks::Silent;
    use glam::Vec2;
    use proptest::prelude::*;

    #[derive(Debug, Default)]
    struct FakeAudio {
        played: Vec<SoundCue>,
        music_starts: u32,
        stops: u32,
    }

    impl AudioPlayer for FakeAudio {
        fn play(&mut self, cue: SoundCue) {
            self.played.push(cue);
        }
        fn start_music(&mut self) {
            self.music_starts += 1;
        }
        fn stop_all(&mut self) {
            self.stops += 1;
        }
    }

    #[derive(Debug, Default)]
    struct FakeEmitter {
        anchor: Vec2,
        starts: u32,
        stops: u32,
    }

    impl ParticleEmitter for FakeEmitter {
        fn set_anchor(&mut self, anchor: Vec2) {
            self.anchor = anchor;
        }
        fn start(&mut self) {
            self.starts += 1;
        }
        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    #[derive(Debug, Default)]
    struct FakePresenter {
        score_text: Option<u32>,
        time_text: Option<u32>,
        results: Vec<SessionResult>,
    }

    impl Presenter for FakePresenter {
        fn show_score(&mut self, score: u32) {
            self.score_text = Some(score);
        }
        fn show_remaining(&mut self, seconds: u32) {
            self.time_text = Some(seconds);
        }
        fn show_result(&mut self, result: &SessionResult) {
            self.results.push(*result);
        }
    }

    type TestController = GameController<FakeAudio, FakeEmitter, FakePresenter>;

    fn started(seed: u64) -> TestController {
        let mut game = GameController::new(
            seed,
            FakeAudio::default(),
            FakeEmitter::default(),
            FakePresenter::default(),
        );
        game.start();
        game
    }

    /// Park the apple far from the basket so physics never catches it
    fn park_apple(game: &mut TestController) {
        game.state.item.pos = Vec2::new(ITEM_SPAWN_RANGE as f32, 0.0);
        game.state.item.vel = Vec2::ZERO;
    }

    #[test]
    fn test_initial_hud_and_start() {
        let game = GameController::new(
            1,
            FakeAudio::default(),
            FakeEmitter::default(),
            FakePresenter::default(),
        );
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.presenter().score_text, Some(0));
        assert_eq!(game.presenter().time_text, Some(30));
        assert_eq!(game.audio().music_starts, 0);

        let mut game = game;
        game.start();
        game.start();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.audio().music_starts, 1);
    }

    #[test]
    fn test_not_started_does_not_tick() {
        let mut game = GameController::new(
            1,
            FakeAudio::default(),
            FakeEmitter::default(),
            FakePresenter::default(),
        );
        let before = game.state().item.pos;
        for _ in 0..120 {
            game.step(SIM_DT, KeyState::default());
        }
        assert_eq!(game.state().item.pos, before);
        assert_eq!(game.state().remaining_seconds(), SESSION_SECONDS);
    }

    #[test]
    fn test_timeout_without_catches_loses() {
        let mut game = started(11);
        // 30 s at 120 Hz plus slack
        for _ in 0..(31 * 120) {
            park_apple(&mut game);
            game.step(SIM_DT, KeyState::default());
        }
        assert_eq!(
            game.result(),
            Some(SessionResult {
                score: 0,
                outcome: Outcome::Lose
            })
        );
        assert_eq!(game.presenter().results.len(), 1);
        assert_eq!(game.state().remaining_seconds(), 0.0);
        assert_eq!(game.audio().stops, 1);
        assert_eq!(game.particles().stops, 1);
    }

    #[test]
    fn test_ten_catches_win_immediately() {
        let mut game = started(5);
        for _ in 0..(WIN_SCORE - 1) {
            game.on_overlap();
            assert_eq!(game.phase(), GamePhase::Playing);
        }
        game.step(1.0, KeyState::default());
        game.on_overlap();

        assert_eq!(game.phase(), GamePhase::GameOver(Outcome::Win));
        assert_eq!(game.score(), WIN_SCORE);
        assert_eq!(game.presenter().results.len(), 1);
        assert_eq!(game.presenter().score_text, Some(WIN_SCORE));
        assert!(game.state().remaining_seconds() > 0.0);
        assert_eq!(game.audio().played.len(), WIN_SCORE as usize);
        assert_eq!(game.particles().starts, WIN_SCORE);

        // The timer was cancelled: running past 30 s changes nothing
        for _ in 0..(31 * 120) {
            game.step(SIM_DT, KeyState::default());
        }
        assert_eq!(game.presenter().results.len(), 1);
        assert_eq!(game.result().map(|r| r.outcome), Some(Outcome::Win));
    }

    #[test]
    fn test_catch_through_physics() {
        let mut game = started(8);
        let (min, _) = game.state().basket.bounds();
        game.state.item.pos = Vec2::new(min.x, min.y - APPLE_SIZE - 1.0);
        game.state.item.vel = Vec2::new(0.0, FALL_SPEED);

        let mut steps = 0;
        while game.score() == 0 && steps < 120 {
            game.step(SIM_DT, KeyState::default());
            steps += 1;
        }
        assert_eq!(game.score(), 1);
        assert_eq!(game.audio().played, vec![SoundCue::Coin]);
        assert_eq!(game.state().item.pos.y, 0.0);
        assert_eq!(game.particles().anchor, game.state().basket_anchor());
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut game = started(2);
        game.on_overlap();
        assert!(game.resolve_game_over());
        assert!(!game.resolve_game_over());
        game.on_overlap();
        game.press(Direction::Left);
        game.update(KeyState { left: true, right: false });

        assert_eq!(game.score(), 1);
        assert_eq!(game.presenter().results.len(), 1);
        assert_eq!(game.audio().stops, 1);
        assert_eq!(game.result().map(|r| r.outcome), Some(Outcome::Lose));
        assert_eq!(game.state().basket.vel.x, 0.0);
        assert!(!game.state().controls.moving_left);
    }

    #[test]
    fn test_resolve_before_start_is_noop() {
        let mut game = GameController::new(3, Silent, FakeEmitter::default(), FakePresenter::default());
        assert!(!game.resolve_game_over());
        assert_eq!(game.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_missed_apple_respawns_without_penalty() {
        let mut game = started(21);
        game.on_overlap();
        game.state.item.pos = Vec2::new(ITEM_SPAWN_RANGE as f32, FIELD_HEIGHT);
        game.update(KeyState::default());
        assert_eq!(game.state().item.pos.y, 0.0);
        assert!(game.state().item.pos.x < ITEM_SPAWN_RANGE as f32);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_left_button_press_release() {
        let mut game = started(4);
        game.press(Direction::Left);
        game.update(KeyState::default());
        assert_eq!(game.state().basket.vel.x, -PLAYER_SPEED);
        game.update(KeyState::default());
        assert_eq!(game.state().basket.vel.x, -PLAYER_SPEED);

        game.release(Direction::Left);
        game.update(KeyState::default());
        assert_eq!(game.state().basket.vel.x, 0.0);
    }

    #[test]
    fn test_update_is_idempotent_within_frame() {
        let mut game = started(6);
        game.step(SIM_DT, KeyState::default());
        let keys = KeyState { left: false, right: true };
        game.update(keys);
        let snapshot = (game.state().item.clone(), game.state().basket.clone(), game.score());
        game.update(keys);
        assert_eq!(
            (game.state().item.clone(), game.state().basket.clone(), game.score()),
            snapshot
        );
    }

    #[test]
    fn test_hud_shows_rounded_seconds() {
        let mut game = started(12);
        park_apple(&mut game);
        game.step(0.6, KeyState::default());
        assert_eq!(game.presenter().time_text, Some(29));
    }

    proptest! {
        #[test]
        fn score_is_capped_and_win_reported_once(catches in 0u32..40) {
            let mut game = started(99);
            for _ in 0..catches {
                game.on_overlap();
            }
            prop_assert_eq!(game.score(), catches.min(WIN_SCORE));
            let expected_results = if catches >= WIN_SCORE { 1 } else { 0 };
            prop_assert_eq!(game.presenter().results.len(), expected_results);
        }

        #[test]
        fn respawned_apples_stay_in_range(seed in any::<u64>()) {
            let mut game = started(seed);
            for _ in 0..50 {
                game.state.item.pos.y = FIELD_HEIGHT;
                game.update(KeyState::default());
                let x = game.state().item.pos.x;
                prop_assert!((0.0..ITEM_SPAWN_RANGE as f32).contains(&x));
                prop_assert_eq!(game.state().item.pos.y, 0.0);
            }
        }
    }
}
