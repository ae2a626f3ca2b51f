/// A simulation tick.  Signed so that "already expired" is representable as a negative remaining count.
pub type Tick = i32;

/// Trait representing something which can tell timers what time it is.
///
/// There are 2 kinds of tick:
///
/// - The predicted tick, which the local simulation advances speculatively every step.
/// - The authoritative tick, which has been confirmed by the source of truth.  It lags or equals the predicted tick.
///
/// Ticks are turned into seconds using the fixed step duration, which is constant for a session.  Timers only ever
/// convert to seconds for display, never for expiry.
///
/// Implementations must not move either tick backwards within one simulation step.
pub trait TimeSource {
    /// Get the locally advancing tick.
    fn predicted_tick(&self) -> Tick;

    /// Get the server-confirmed tick.
    fn authoritative_tick(&self) -> Tick;

    /// Get the length of one tick, in seconds.
    fn fixed_step_duration(&self) -> f64;

    /// Get how far we are between the current predicted tick and the next one, in `[0, 1)`.
    ///
    /// Only used for smoothing what we show to the player.
    fn interpolation_fraction(&self) -> f64;
}

/// A frozen copy of what a [TimeSource] reported.
///
/// Useful for handing a consistent view of time to many timers in one step, and as a trivial source in tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TickSnapshot {
    pub predicted_tick: Tick,
    pub authoritative_tick: Tick,
    pub fixed_step_duration: f64,
    pub interpolation_fraction: f64,
}

impl TickSnapshot {
    /// A snapshot where the authoritative tick has caught up with the predicted one, with no sub-tick progress.
    pub fn at(tick: Tick, fixed_step_duration: f64) -> TickSnapshot {
        TickSnapshot {
            predicted_tick: tick,
            authoritative_tick: tick,
            fixed_step_duration,
            interpolation_fraction: 0.0,
        }
    }

    /// Capture whatever a time source currently reports.
    pub fn capture<S: TimeSource + ?Sized>(source: &S) -> TickSnapshot {
        TickSnapshot {
            predicted_tick: source.predicted_tick(),
            authoritative_tick: source.authoritative_tick(),
            fixed_step_duration: source.fixed_step_duration(),
            interpolation_fraction: source.interpolation_fraction(),
        }
    }
}

impl TimeSource for TickSnapshot {
    fn predicted_tick(&self) -> Tick {
        self.predicted_tick
    }

    fn authoritative_tick(&self) -> Tick {
        self.authoritative_tick
    }

    fn fixed_step_duration(&self) -> f64 {
        self.fixed_step_duration
    }

    fn interpolation_fraction(&self) -> f64 {
        self.interpolation_fraction
    }
}
