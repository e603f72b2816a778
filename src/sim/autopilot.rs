//! Demo-mode steering
//!
//! Produces the key presses a player would make to keep the basket under the
//! falling apple. Used by the idle demo in the browser and the headless run.

use super::input::KeyState;
use super::state::SessionState;

/// Horizontal slack before the autopilot bothers moving (pixels)
const DEADZONE: f32 = 6.0;

pub fn steer(state: &SessionState) -> KeyState {
    let target = state.item.center().x;
    let basket = state.basket.center().x;
    let delta = target - basket;

    KeyState {
        left: delta < -DEADZONE,
        right: delta > DEADZONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::hooks::{LogPresenter, Silent};
    use crate::sim::{CoinFountain, GameController, Outcome};

    #[test]
    fn test_steers_toward_apple() {
        let mut state = SessionState::new(1);
        state.item.pos.x = 300.0;
        assert_eq!(steer(&state), KeyState { left: false, right: true });

        state.basket.pos.x = 350.0;
        assert_eq!(steer(&state), KeyState { left: true, right: false });

        state.item.pos.x = state.basket.center().x - APPLE_SIZE / 2.0;
        assert_eq!(steer(&state), KeyState::default());
    }

    #[test]
    fn test_autopilot_wins_a_session() {
        let mut game = GameController::new(
            2024,
            Silent,
            CoinFountain::new(2024),
            LogPresenter::default(),
        );
        game.start();
        for _ in 0..(31 * 120) {
            let keys = steer(game.state());
            game.step(SIM_DT, keys);
        }
        let result = game.result().expect("session should have ended");
        assert_eq!(result.outcome, Outcome::Win);
        assert_eq!(result.score, WIN_SCORE);
    }
}
