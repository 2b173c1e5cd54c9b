use std::time::Duration;

/// `1 - (1 - p)^3`, with `p` clamped to `0.0..=1.0`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// A number that counts up from zero to `target` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountUp {
    target: u64,
    duration: Duration,
}

impl CountUp {
    pub fn new(target: u64, duration: Duration) -> Self {
        Self { target, duration }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Progress through the animation, from 0.0 to 1.0.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// Value to display `elapsed` after the count started.
    ///
    /// Exactly `target` once the duration has passed.
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.is_finished(elapsed) {
            return self.target;
        }
        let eased = ease_out_cubic(self.progress(elapsed));
        ((eased * self.target as f64).floor() as u64).min(self.target)
    }
}
