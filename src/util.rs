//! Shared utilities

// ============================================================================
// FPS Counter
// ============================================================================

use std::time::{Duration, Instant};

/// Counts frames and reports a rounded FPS figure once per interval
pub struct FpsCounter {
    frames: u32,
    last_report: Instant,
    interval: Duration,
}

impl FpsCounter {
    /// Create a new FPS counter that reports after `interval` has elapsed
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, now: Instant) -> Self {
        Self {
            frames: 0,
            last_report: now,
            interval,
        }
    }

    /// Call once per presented frame
    /// Returns Some(fps) when a report is due, resetting the window
    pub fn tick(&mut self) -> Option<u32> {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.last_report);
        if elapsed <= self.interval {
            return None;
        }

        let fps = (f64::from(self.frames) / elapsed.as_secs_f64()).round() as u32;
        self.frames = 0;
        self.last_report = now;
        Some(fps)
    }
}
