//! Fixed-timestep frame loop.
//!
//! Playback advances in whole ticks at 60 Hz regardless of how often the
//! window redraws. Elapsed wall time accumulates and every full [`FIXED_DT`]
//! in it runs one tick. The caller renders once per frame afterwards.

use std::time::Instant;
use tracing::warn;

/// Fixed tick length: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time fed into the accumulator. A stall longer than this
/// (window drag, debugger pause) slows playback instead of replaying
/// dozens of ticks at once.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator state for the frame loop.
pub struct GameLoop {
    previous_time: Instant,
    accumulator: f64,
    frame_count: u64,
    tick_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Run the ticks due this frame against the wall clock.
    ///
    /// `tick_fn(tick)` runs zero or more times with the 1-based index of the
    /// tick being run. Returns how many ticks ran.
    pub fn frame(&mut self, tick_fn: impl FnMut(u64)) -> u32 {
        let now = Instant::now();
        let mut frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;

        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.advance(frame_time, tick_fn)
    }

    /// Run the ticks due after an explicit elapsed time in seconds.
    pub fn advance(&mut self, frame_time: f64, mut tick_fn: impl FnMut(u64)) -> u32 {
        self.accumulator += frame_time.clamp(0.0, MAX_FRAME_TIME);

        let mut ran = 0;
        while self.accumulator >= FIXED_DT {
            self.accumulator -= FIXED_DT;
            self.tick_count += 1;
            ran += 1;
            tick_fn(self.tick_count);
        }

        self.frame_count += 1;
        ran
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
