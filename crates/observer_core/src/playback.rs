//! Playback clock: fractional progress between rounds, speed and pause.
//!
//! The clock is the only mutable playback state. One `advance` call per
//! animation frame moves `fraction` toward the next round; everything the
//! renderer draws is recomputed from `(current_round, fraction)`.

use crate::record::MatchRecord;

/// Fixed step applied by [`PlaybackClock::speed_up`] / [`PlaybackClock::slow_down`].
pub const SPEED_STEP: f32 = 0.1;

/// What a single [`PlaybackClock::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Fraction moved (or stayed, when paused) without crossing a boundary.
    InProgress,
    /// A round boundary was crossed: `current_round` advanced by one and
    /// `fraction` reset to zero.
    RoundAdvanced,
    /// The current round is terminal. Re-emitted by every later call;
    /// the clock itself no longer changes.
    MatchEnded,
}

/// Mutable playback state, owned by the driving loop.
///
/// Invariants, upheld by every method:
/// - `fraction` is in `[0, 1)`
/// - `current_round` is monotonically non-decreasing and never passes the
///   terminal round of the record it is advanced against
/// - `saved_speed` is `Some` only while paused via [`Self::pause`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    current_round: usize,
    fraction: f32,
    speed: f32,
    saved_speed: Option<f32>,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PlaybackClock {
    /// Create a clock at round 0 with the given speed, clamped to `[0, 1]`.
    /// Non-finite speeds (`clamp` lets NaN through) fall back to full speed.
    #[must_use]
    pub fn new(speed: f32) -> Self {
        let speed = if speed.is_finite() {
            speed.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            current_round: 0,
            fraction: 0.0,
            speed,
            saved_speed: None,
        }
    }

    /// Index of the round currently being played.
    #[must_use]
    pub const fn current_round(&self) -> usize {
        self.current_round
    }

    /// Progress toward the next round, in `[0, 1)`.
    #[must_use]
    pub const fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Current advance rate multiplier, in `[0, 1]`. Zero means paused.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Whether the clock is paused via [`Self::pause`].
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.saved_speed.is_some()
    }

    /// Advance by an elapsed-time delta (seconds, negative treated as zero).
    ///
    /// `fraction` grows by `delta * speed`, clamped at 1.0: crossing N round
    /// boundaries always takes N calls, however large the delta. On reaching
    /// 1.0 the clock either steps to the next round (resetting `fraction`)
    /// or, when the current round is terminal, freezes and reports
    /// [`AdvanceOutcome::MatchEnded`] on this and every subsequent call.
    pub fn advance(&mut self, delta_secs: f32, record: &MatchRecord) -> AdvanceOutcome {
        if record.is_terminal_round(self.current_round) {
            return AdvanceOutcome::MatchEnded;
        }

        let delta = delta_secs.max(0.0);
        self.fraction = (self.fraction + delta * self.speed).min(1.0);
        if self.fraction >= 1.0 {
            self.fraction = 0.0;
            self.current_round += 1;
            return AdvanceOutcome::RoundAdvanced;
        }
        AdvanceOutcome::InProgress
    }

    /// Increase speed by [`SPEED_STEP`], clamped to `[0, 1]`.
    ///
    /// An explicit speed change discards a pending pause stash so a later
    /// resume never reverts it.
    pub fn speed_up(&mut self) {
        self.saved_speed = None;
        self.speed = (self.speed + SPEED_STEP).clamp(0.0, 1.0);
    }

    /// Decrease speed by [`SPEED_STEP`], clamped to `[0, 1]`.
    pub fn slow_down(&mut self) {
        self.saved_speed = None;
        self.speed = (self.speed - SPEED_STEP).clamp(0.0, 1.0);
    }

    /// Stash the current speed and stop. No-op when already paused or when
    /// speed is zero anyway.
    pub fn pause(&mut self) {
        if self.saved_speed.is_none() && self.speed > 0.0 {
            self.saved_speed = Some(self.speed);
            self.speed = 0.0;
        }
    }

    /// Restore the stashed speed. No-op without a prior [`Self::pause`].
    pub fn resume(&mut self) {
        if let Some(speed) = self.saved_speed.take() {
            self.speed = speed;
        }
    }

    /// Pause if running, resume if paused.
    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }
}
