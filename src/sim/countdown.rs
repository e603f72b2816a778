//! One-shot session countdown

/// Lifecycle of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Armed,
    Fired,
    Cancelled,
}

/// Arm-once timer.
///
/// `advance` reports expiry exactly once. After `cancel` it never fires.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    state: TimerState,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
            state: TimerState::Armed,
        }
    }

    /// Advance by `dt` seconds. Returns true on the single call that expires it.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.state != TimerState::Armed {
            return false;
        }
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        if self.elapsed >= self.duration {
            self.state = TimerState::Fired;
            return true;
        }
        false
    }

    /// Seconds left, never negative. Frozen once cancelled.
    pub fn remaining(&self) -> f32 {
        match self.state {
            TimerState::Fired => 0.0,
            _ => (self.duration - self.elapsed).max(0.0),
        }
    }

    /// Remaining seconds rounded for display
    pub fn rounded_remaining(&self) -> u32 {
        self.remaining().round() as u32
    }

    pub fn is_expired(&self) -> bool {
        self.state == TimerState::Fired
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn cancel(&mut self) {
        if self.state == TimerState::Armed {
            self.state = TimerState::Cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fires_once() {
        let mut timer = Countdown::new(1.0);
        assert!(!timer.advance(0.5));
        assert!(timer.advance(0.5));
        assert!(!timer.advance(0.5));
        assert!(timer.is_expired());
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn test_cancel_prevents_expiry() {
        let mut timer = Countdown::new(1.0);
        timer.advance(0.25);
        timer.cancel();
        assert!(!timer.advance(10.0));
        assert_eq!(timer.state(), TimerState::Cancelled);
        assert!((timer.remaining() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_rounded_display() {
        let mut timer = Countdown::new(30.0);
        assert_eq!(timer.rounded_remaining(), 30);
        timer.advance(0.6);
        assert_eq!(timer.rounded_remaining(), 29);
        timer.advance(29.0);
        assert_eq!(timer.rounded_remaining(), 0);
    }

    proptest! {
        #[test]
        fn remaining_never_negative_and_fires_once(steps in prop::collection::vec(0.0f32..0.5, 1..200)) {
            let mut timer = Countdown::new(5.0);
            let mut fired = 0;
            let mut last = timer.remaining();
            for dt in steps {
                if timer.advance(dt) {
                    fired += 1;
                }
                let now = timer.remaining();
                prop_assert!(now >= 0.0);
                prop_assert!(now <= last);
                last = now;
            }
            prop_assert!(fired <= 1);
            prop_assert_eq!(fired == 1, timer.is_expired());
        }
    }
}
