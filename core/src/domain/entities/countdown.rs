//! Resend countdown entity.

/// Result of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown decremented and is still above zero
    Running(u32),
    /// Countdown reached zero on this tick, resend is now available
    Expired,
    /// Countdown was already at zero, nothing changed
    Idle,
}

/// Seconds remaining before the user may request a new code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTimer {
    initial: u32,
    remaining: u32,
}

impl CountdownTimer {
    /// Create a countdown starting at `initial` seconds
    pub fn new(initial: u32) -> Self {
        Self {
            initial,
            remaining: initial,
        }
    }

    /// Seconds left
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the countdown has run out
    pub fn resend_available(&self) -> bool {
        self.remaining == 0
    }

    /// Advance by one second, saturating at zero
    pub fn tick(&mut self) -> TickOutcome {
        match self.remaining {
            0 => TickOutcome::Idle,
            1 => {
                self.remaining = 0;
                TickOutcome::Expired
            }
            n => {
                self.remaining = n - 1;
                TickOutcome::Running(self.remaining)
            }
        }
    }

    /// Restart from the initial value
    pub fn reset(&mut self) {
        self.remaining = self.initial;
    }

    /// Text shown under the code entry for `remaining` seconds
    pub fn label_for(remaining: u32) -> String {
        if remaining > 0 {
            format!("Time left: {} sec", remaining)
        } else {
            "Time is up!".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_to_zero() {
        let mut timer = CountdownTimer::new(3);
        assert!(!timer.resend_available());
        assert_eq!(timer.tick(), TickOutcome::Running(2));
        assert_eq!(timer.tick(), TickOutcome::Running(1));
        assert_eq!(timer.tick(), TickOutcome::Expired);
        assert!(timer.resend_available());
    }

    #[test]
    fn test_expires_exactly_once() {
        let mut timer = CountdownTimer::new(30);
        let outcomes: Vec<TickOutcome> = (0..40).map(|_| timer.tick()).collect();

        let expired = outcomes.iter().filter(|o| **o == TickOutcome::Expired).count();
        assert_eq!(expired, 1);
        assert_eq!(outcomes[29], TickOutcome::Expired);
        assert!(outcomes[30..].iter().all(|o| *o == TickOutcome::Idle));
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_strictly_decreasing() {
        let mut timer = CountdownTimer::new(30);
        let mut previous = timer.remaining();
        while let TickOutcome::Running(now) = timer.tick() {
            assert_eq!(now, previous - 1);
            previous = now;
        }
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_reset() {
        let mut timer = CountdownTimer::new(2);
        timer.tick();
        timer.tick();
        assert!(timer.resend_available());
        timer.reset();
        assert_eq!(timer.remaining(), 2);
        assert!(!timer.resend_available());
    }

    #[test]
    fn test_zero_initial_is_immediately_available() {
        let mut timer = CountdownTimer::new(0);
        assert!(timer.resend_available());
        assert_eq!(timer.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_label() {
        let mut timer = CountdownTimer::new(2);
        assert_eq!(CountdownTimer::label_for(timer.remaining()), "Time left: 2 sec");
        timer.tick();
        timer.tick();
        assert_eq!(CountdownTimer::label_for(timer.remaining()), "Time is up!");
    }
}
