//! Countdowns anchored to either the predicted or the authoritative tick.
use std::marker::PhantomData;

use crate::arithmetic;
use crate::{Tick, TimeSource};

/// Chooses which tick of a [TimeSource] a [TickCountdown] counts against.
pub trait TickAnchor: Copy + Default + std::fmt::Debug {
    /// Name used when displaying timers of this kind.
    const LABEL: &'static str;

    fn current_tick<S: TimeSource + ?Sized>(source: &S) -> Tick;
}

/// Counts against the locally predicted tick.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Predicted;

/// Counts against the server-confirmed tick.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Authoritative;

impl TickAnchor for Predicted {
    const LABEL: &'static str = "TickTimer";

    fn current_tick<S: TimeSource + ?Sized>(source: &S) -> Tick {
        source.predicted_tick()
    }
}

impl TickAnchor for Authoritative {
    const LABEL: &'static str = "AuthTickTimer";

    fn current_tick<S: TimeSource + ?Sized>(source: &S) -> Tick {
        source.authoritative_tick()
    }
}

/// A countdown from the tick it was established at to the tick it expires at.
///
/// The default value is "no timer": it is never running, so it is never expired, but it is expired-or-not-running at
/// every non-negative tick.  Its target is 0, so at a negative tick it has time "remaining" and reports false.  Only the
/// two ticks are serialized.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(bound = "")]
pub struct TickCountdown<A> {
    established_tick: Tick,
    target_tick: Tick,
    #[serde(skip)]
    anchor: PhantomData<A>,
}

/// Countdown against the predicted tick.  What most gameplay wants.
pub type PlainTimer = TickCountdown<Predicted>;

/// Countdown against the authoritative tick, for logic which must not diverge when the client mispredicts.
pub type AuthorityTimer = TickCountdown<Authoritative>;

impl<A: TickAnchor> TickCountdown<A> {
    /// The timer that isn't set.
    pub const NONE: Self = TickCountdown {
        established_tick: 0,
        target_tick: 0,
        anchor: PhantomData,
    };

    /// Rebuild a timer from replicated ticks.
    pub const fn from_parts(established_tick: Tick, target_tick: Tick) -> Self {
        TickCountdown {
            established_tick,
            target_tick,
            anchor: PhantomData,
        }
    }

    /// Start a timer which expires `tick_duration` ticks from now.
    ///
    /// Negative durations are allowed and give a timer which has already expired.
    pub fn from_ticks<S: TimeSource + ?Sized>(source: &S, tick_duration: Tick) -> Self {
        let now = A::current_tick(source);
        Self::from_parts(now, arithmetic::target_from(now, tick_duration))
    }

    /// Start a timer which expires `seconds` from now, rounded to the nearest tick (ties to even).
    pub fn from_seconds<S: TimeSource + ?Sized>(source: &S, seconds: f64) -> Self {
        let ticks = arithmetic::ticks_from_seconds(seconds, source.fixed_step_duration());
        Self::from_ticks(source, ticks)
    }

    pub fn established_tick(&self) -> Tick {
        self.established_tick
    }

    pub fn target_tick(&self) -> Tick {
        self.target_tick
    }

    /// Length of the timer in ticks.
    pub fn duration(&self) -> Tick {
        arithmetic::remaining(self.target_tick, self.established_tick)
    }

    pub fn is_running(&self) -> bool {
        arithmetic::is_running(self.target_tick)
    }

    /// Ticks until expiry.  Zero or negative once expired.
    pub fn remaining_ticks<S: TimeSource + ?Sized>(&self, source: &S) -> Tick {
        arithmetic::remaining(self.target_tick, A::current_tick(source))
    }

    /// Seconds until expiry, never less than 0.
    pub fn remaining_seconds<S: TimeSource + ?Sized>(&self, source: &S) -> f64 {
        let remaining = self.remaining_ticks(source) as f64;
        arithmetic::seconds_from_ticks(remaining, source.fixed_step_duration()).max(0.0)
    }

    /// Has a timer which was actually set run out?
    pub fn is_expired<S: TimeSource + ?Sized>(&self, source: &S) -> bool {
        self.remaining_ticks(source) <= 0 && self.is_running()
    }

    /// Is it safe to proceed, either because the timer ran out or because it was never set?
    pub fn is_expired_or_not_running<S: TimeSource + ?Sized>(&self, source: &S) -> bool {
        self.remaining_ticks(source) <= 0
    }

    /// Progress through the timer: 0 when established, 1 at expiry.
    ///
    /// Unclamped, so this is negative before the timer starts and above 1 after it expires.  Zero-length timers report
    /// 1.  A timer built with a negative duration runs backwards: its alpha goes more negative as time passes, so its
    /// clamped alpha stays at 0 even though it is already expired.
    pub fn alpha<S: TimeSource + ?Sized>(&self, source: &S) -> f64 {
        arithmetic::alpha(
            self.established_tick,
            self.target_tick,
            A::current_tick(source),
        )
    }

    /// [Self::alpha], clamped to `[0, 1]`.  Use this for progress bars.
    pub fn alpha_clamped<S: TimeSource + ?Sized>(&self, source: &S) -> f64 {
        arithmetic::clamp_unit(self.alpha(source))
    }
}

impl TickCountdown<Predicted> {
    /// Seconds until expiry, including progress through the current tick.
    ///
    /// Decreases smoothly between ticks instead of stepping.  Not clamped, so it dips below 0 in the tick the timer
    /// expires on.
    pub fn remaining_seconds_smoothed<S: TimeSource + ?Sized>(&self, source: &S) -> f64 {
        let remaining = self.remaining_ticks(source) as f64 - source.interpolation_fraction();
        arithmetic::seconds_from_ticks(remaining, source.fixed_step_duration())
    }
}

impl<A: TickAnchor> std::fmt::Display for TickCountdown<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] From: {} To: {}",
            A::LABEL,
            self.established_tick,
            self.target_tick
        )
    }
}
