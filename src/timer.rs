//! Elapsed-time timer

use std::time::{Duration, Instant};

/// Single start marker, overwritten on each start and kept after stop
#[derive(Debug, Clone, Default)]
pub struct Timer {
    started_at: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start marker, replacing any previous one
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Time since the last start, zero if the timer was never started
    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|started_at| started_at.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Elapsed seconds with two decimal places, e.g. "1.25"
    ///
    /// The marker is not cleared, so repeated calls measure from the same start.
    pub fn end(&self) -> String {
        format_seconds(self.elapsed())
    }
}

fn format_seconds(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64())
}
