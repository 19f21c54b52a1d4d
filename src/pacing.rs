//! Soft frame-rate cap.

use std::time::{Duration, Instant};

/// Tracks the start of the current frame against a fixed budget. Overruns
/// are not compensated: the next frame simply starts late.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    budget: Duration,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(target_fps: u32) -> Self {
        Self {
            budget: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            frame_start: Instant::now(),
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Time left in the budget, measured from `now`.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.budget
            .saturating_sub(now.saturating_duration_since(self.frame_start))
    }

    pub fn remaining(&self) -> Duration {
        self.remaining_at(Instant::now())
    }
}
