//! Text cursor blinking.

use ::std::time::Duration;

/// Blink period of the text cursor.
pub const CURSOR_BLINK_PERIOD: Duration = Duration::from_millis(500);

/// A fixed-period visibility toggle for the text cursor.
///
/// The host advances it with the time elapsed between frames. It only affects
/// display and never interacts with keyboard state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorBlink {
    period: Duration,
    elapsed: Duration,
    visible: bool,
}

impl Default for CursorBlink {
    fn default() -> Self {
        Self::new(CURSOR_BLINK_PERIOD)
    }
}

impl CursorBlink {
    /// Starts visible. A zero period never toggles.
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time until the next toggle.
    pub fn until_next_toggle(&self) -> Duration {
        self.period.saturating_sub(self.elapsed)
    }

    /// Advances the timer, toggling once per whole period that passed.
    /// Returns `true` if visibility changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.period.is_zero() {
            return false;
        }

        let before = self.visible;
        self.elapsed += elapsed;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            self.visible = !self.visible;
        }
        before != self.visible
    }
}
