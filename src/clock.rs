/// Frame timing: elapsed game time, the target spawn accumulator and the
/// shoot cooldown.  All values are milliseconds.

#[derive(Clone, Debug, Default)]
pub struct GameClock {
    /// Total time fed through `tick`.
    now_ms: u64,
    spawn_accumulator_ms: u64,
    /// Time of the last honoured shot; `None` means no cooldown pending.
    last_shot_ms: Option<u64>,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn spawn_accumulator_ms(&self) -> u64 {
        self.spawn_accumulator_ms
    }

    pub fn last_shot_ms(&self) -> Option<u64> {
        self.last_shot_ms
    }

    /// Advance time by one frame's delta.
    pub fn tick(&mut self, dt_ms: u64) {
        self.now_ms += dt_ms;
    }

    /// Add `dt_ms` to the spawn accumulator.  Once it exceeds `interval_ms`
    /// a spawn is due and the accumulator snaps back to zero; the overshoot
    /// is discarded.
    pub fn spawn_due(&mut self, dt_ms: u64, interval_ms: u64) -> bool {
        self.spawn_accumulator_ms += dt_ms;
        if self.spawn_accumulator_ms > interval_ms {
            self.spawn_accumulator_ms = 0;
            true
        } else {
            false
        }
    }

    /// Whether a shot would be honoured right now.
    pub fn can_shoot(&self, delay_ms: u64) -> bool {
        match self.last_shot_ms {
            None => true,
            Some(last) => self.now_ms.saturating_sub(last) > delay_ms,
        }
    }

    /// Consume the cooldown if it has elapsed.  Returns `true` when the shot
    /// is honoured.
    pub fn try_shoot(&mut self, delay_ms: u64) -> bool {
        if !self.can_shoot(delay_ms) {
            return false;
        }
        self.last_shot_ms = Some(self.now_ms);
        true
    }

    /// Zero the spawn accumulator and the shoot cooldown.  Elapsed time keeps
    /// running.
    pub fn reset(&mut self) {
        self.spawn_accumulator_ms = 0;
        self.last_shot_ms = None;
    }
}
