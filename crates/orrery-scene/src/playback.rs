//! Playback clock mapping ticks to trajectory rows.

/// Frame index plus the row cursor derived from it.
///
/// Each active tick adds the current step multiplier to the cursor, so a
/// speed change mid-run never moves the row backwards. With a constant
/// multiplier `S`, `cursor == raw_ticks * S`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    raw_ticks: u64,
    cursor: u64,
    step_multiplier: u32,
    speed_step: u32,
    paused: bool,
}

impl Playback {
    /// `step_multiplier` and `speed_step` are clamped to at least 1.
    pub fn new(step_multiplier: u32, speed_step: u32, paused: bool) -> Self {
        Self {
            raw_ticks: 0,
            cursor: 0,
            step_multiplier: step_multiplier.max(1),
            speed_step: speed_step.max(1),
            paused,
        }
    }

    /// Advance one tick unless paused.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.raw_ticks += 1;
        self.cursor = self.cursor.saturating_add(u64::from(self.step_multiplier));
    }

    /// Row to display for tables of `len` rows: the cursor clamped to the last row.
    pub fn row(&self, len: usize) -> usize {
        let last = len.saturating_sub(1);
        usize::try_from(self.cursor).map_or(last, |cursor| cursor.min(last))
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Rewind to the first row. Pause state and speed are unchanged.
    pub fn reset(&mut self) {
        self.raw_ticks = 0;
        self.cursor = 0;
    }

    /// Increase the step multiplier by the speed step.
    pub fn faster(&mut self) {
        self.step_multiplier = self.step_multiplier.saturating_add(self.speed_step);
    }

    /// Decrease the step multiplier by the speed step, never below 1.
    pub fn slower(&mut self) {
        self.step_multiplier = self.step_multiplier.saturating_sub(self.speed_step).max(1);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn raw_ticks(&self) -> u64 {
        self.raw_ticks
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn step_multiplier(&self) -> u32 {
        self.step_multiplier
    }
}
