//! A countdown which can be paused and resumed.
//!
//! Pausing records the predicted tick at which the pause began and freezes the remaining time there.  Resuming pushes
//! the target tick forward by however long the pause lasted, so the ticks spent paused never count against the
//! timer's duration.  Both transitions hand back a new value; nothing is mutated in place, so copies held in older
//! replicated snapshots are never affected.
use log::debug;

use crate::arithmetic;
use crate::{Tick, TimeSource};

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    derive_more::Display,
)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[display(
    fmt = "[PauseableTickTimer] From: {} To: {} Is Paused: {}",
    established_tick,
    target_tick,
    is_paused
)]
pub struct PausableTimer {
    established_tick: Tick,
    target_tick: Tick,
    is_paused: bool,
    /// Only meaningful while paused.
    last_paused_tick: Tick,
}

impl PausableTimer {
    /// The timer that isn't set.
    pub const NONE: PausableTimer = PausableTimer {
        established_tick: 0,
        target_tick: 0,
        is_paused: false,
        last_paused_tick: 0,
    };

    /// Rebuild a timer from replicated fields.
    pub const fn from_parts(
        established_tick: Tick,
        target_tick: Tick,
        is_paused: bool,
        last_paused_tick: Tick,
    ) -> PausableTimer {
        PausableTimer {
            established_tick,
            target_tick,
            is_paused,
            last_paused_tick,
        }
    }

    /// Start an unpaused timer which expires `tick_duration` predicted ticks from now.
    pub fn from_ticks<S: TimeSource + ?Sized>(source: &S, tick_duration: Tick) -> PausableTimer {
        let now = source.predicted_tick();
        PausableTimer {
            established_tick: now,
            target_tick: arithmetic::target_from(now, tick_duration),
            is_paused: false,
            last_paused_tick: 0,
        }
    }

    /// Start an unpaused timer which expires `seconds` from now, rounded to the nearest tick (ties to even).
    pub fn from_seconds<S: TimeSource + ?Sized>(source: &S, seconds: f64) -> PausableTimer {
        let ticks = arithmetic::ticks_from_seconds(seconds, source.fixed_step_duration());
        PausableTimer::from_ticks(source, ticks)
    }

    pub fn established_tick(&self) -> Tick {
        self.established_tick
    }

    pub fn target_tick(&self) -> Tick {
        self.target_tick
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn last_paused_tick(&self) -> Tick {
        self.last_paused_tick
    }

    /// Ticks between establishment and the current target.  Grows by the length of each pause once resumed.
    pub fn duration(&self) -> Tick {
        arithmetic::remaining(self.target_tick, self.established_tick)
    }

    pub fn is_running(&self) -> bool {
        arithmetic::is_running(self.target_tick)
    }

    /// Ticks until expiry.  While paused this stays at whatever it was when the pause began.
    pub fn remaining_ticks<S: TimeSource + ?Sized>(&self, source: &S) -> Tick {
        if self.is_paused {
            arithmetic::remaining(self.target_tick, self.last_paused_tick)
        } else {
            arithmetic::remaining(self.target_tick, source.predicted_tick())
        }
    }

    /// Seconds until expiry, never less than 0.
    pub fn remaining_seconds<S: TimeSource + ?Sized>(&self, source: &S) -> f64 {
        let remaining = self.remaining_ticks(source) as f64;
        arithmetic::seconds_from_ticks(remaining, source.fixed_step_duration()).max(0.0)
    }

    /// Seconds until expiry including progress through the current tick.  Not clamped.
    ///
    /// A paused timer has no sub-tick progress, so this is the frozen remaining time.
    pub fn remaining_seconds_smoothed<S: TimeSource + ?Sized>(&self, source: &S) -> f64 {
        let fraction = if self.is_paused {
            0.0
        } else {
            source.interpolation_fraction()
        };
        let remaining = self.remaining_ticks(source) as f64 - fraction;
        arithmetic::seconds_from_ticks(remaining, source.fixed_step_duration())
    }

    pub fn is_expired<S: TimeSource + ?Sized>(&self, source: &S) -> bool {
        self.remaining_ticks(source) <= 0 && self.is_running()
    }

    pub fn is_expired_or_not_running<S: TimeSource + ?Sized>(&self, source: &S) -> bool {
        self.remaining_ticks(source) <= 0
    }

    /// Progress against the live predicted tick.  Unclamped; zero-length timers report 1.
    ///
    /// This does not account for pauses.
    pub fn alpha<S: TimeSource + ?Sized>(&self, source: &S) -> f64 {
        arithmetic::alpha(
            self.established_tick,
            self.target_tick,
            source.predicted_tick(),
        )
    }

    pub fn alpha_clamped<S: TimeSource + ?Sized>(&self, source: &S) -> f64 {
        arithmetic::clamp_unit(self.alpha(source))
    }

    /// Pause at the current predicted tick.  Pausing a paused timer gives it back unchanged.
    #[must_use = "This function returns the paused timer rather than pausing in place"]
    pub fn pause<S: TimeSource + ?Sized>(self, source: &S) -> PausableTimer {
        pause(self, source)
    }

    /// Resume at the current predicted tick.  Resuming a running timer gives it back unchanged.
    #[must_use = "This function returns the resumed timer rather than resuming in place"]
    pub fn resume<S: TimeSource + ?Sized>(self, source: &S) -> PausableTimer {
        resume(self, source)
    }
}

/// Pause `timer` at the current predicted tick.  Idempotent.
pub fn pause<S: TimeSource + ?Sized>(timer: PausableTimer, source: &S) -> PausableTimer {
    if timer.is_paused {
        return timer;
    }

    let now = source.predicted_tick();
    debug!("Pausing {} at tick {}", timer, now);

    PausableTimer {
        is_paused: true,
        last_paused_tick: now,
        ..timer
    }
}

/// Resume `timer`, moving its target forward by the number of ticks it spent paused.  Idempotent.
pub fn resume<S: TimeSource + ?Sized>(timer: PausableTimer, source: &S) -> PausableTimer {
    if !timer.is_paused {
        return timer;
    }

    let now = source.predicted_tick();
    let paused_for = now.saturating_sub(timer.last_paused_tick);
    debug!(
        "Resuming {} at tick {} after {} paused ticks",
        timer, now, paused_for
    );

    PausableTimer {
        established_tick: timer.established_tick,
        target_tick: arithmetic::target_from(timer.target_tick, paused_for),
        is_paused: false,
        last_paused_tick: 0,
    }
}
