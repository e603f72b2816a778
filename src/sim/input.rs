//! Player input: polled keyboard state and latched on-screen controls

use crate::consts::PLAYER_SPEED;

/// Horizontal direction of an on-screen control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Arrow key state, polled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
}

/// Latched intent from the on-screen buttons.
///
/// Set on press-start and cleared on press-release, so a held button keeps
/// the basket moving between input events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Controls {
    pub fn press(&mut self, dir: Direction) {
        match dir {
            Direction::Left => self.moving_left = true,
            Direction::Right => self.moving_right = true,
        }
    }

    pub fn release(&mut self, dir: Direction) {
        match dir {
            Direction::Left => self.moving_left = false,
            Direction::Right => self.moving_right = false,
        }
    }

    /// Drop both latches (e.g. pointer left the button)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Basket velocity for this frame. Left wins when both sides are held.
pub fn horizontal_velocity(keys: KeyState, controls: Controls) -> f32 {
    if keys.left || controls.moving_left {
        -PLAYER_SPEED
    } else if keys.right || controls.moving_right {
        PLAYER_SPEED
    } else {
        0.0
    }
}
