//! Tick arithmetic shared by every timer kind.
//!
//! Integer tick math saturates at the bounds of [Tick] rather than wrapping or panicking: a timer sitting in replicated
//! state must never be able to take down a simulation step.
use crate::Tick;

/// Convert a duration in seconds to a whole number of ticks.
///
/// Ties round to even, so at step 0.5 a duration of 1.25 seconds is 2 ticks and 1.75 seconds is 4.  Out of range results
/// saturate and NaN becomes 0.
pub(crate) fn ticks_from_seconds(seconds: f64, fixed_step_duration: f64) -> Tick {
    let tick_rate = 1.0 / fixed_step_duration;
    (seconds * tick_rate).round_ties_even() as Tick
}

/// Convert a (possibly fractional) tick count to seconds.
pub(crate) fn seconds_from_ticks(ticks: f64, fixed_step_duration: f64) -> f64 {
    let tick_rate = 1.0 / fixed_step_duration;
    ticks / tick_rate
}

pub(crate) fn target_from(established: Tick, duration: Tick) -> Tick {
    established.saturating_add(duration)
}

pub(crate) fn remaining(target: Tick, current: Tick) -> Tick {
    target.saturating_sub(current)
}

pub(crate) fn is_running(target: Tick) -> bool {
    target > 0
}

/// Fraction of `established..target` which `current` has covered.  Unclamped.
///
/// A zero-length timer is complete the moment it exists, so it reports 1.
pub(crate) fn alpha(established: Tick, target: Tick, current: Tick) -> f64 {
    let span = target as i64 - established as i64;
    if span == 0 {
        return 1.0;
    }

    let covered = current as i64 - established as i64;
    covered as f64 / span as f64
}

pub(crate) fn clamp_unit(alpha: f64) -> f64 {
    alpha.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_eq::assert_float_eq;
    use proptest::prelude::*;

    #[test]
    fn test_rounding_ties_to_even() {
        assert_eq!(ticks_from_seconds(1.25, 0.5), 2);
        assert_eq!(ticks_from_seconds(1.75, 0.5), 4);
        assert_eq!(ticks_from_seconds(-1.25, 0.5), -2);
        assert_eq!(ticks_from_seconds(3.0, 0.1), 30);
        assert_eq!(ticks_from_seconds(1.0, 1.0 / 60.0), 60);
    }

    #[test]
    fn test_rounding_saturates() {
        assert_eq!(ticks_from_seconds(f64::INFINITY, 0.1), Tick::MAX);
        assert_eq!(ticks_from_seconds(-1e300, 0.1), Tick::MIN);
        assert_eq!(ticks_from_seconds(f64::NAN, 0.1), 0);
    }

    #[test]
    fn test_saturating_ticks() {
        assert_eq!(target_from(Tick::MAX - 1, 10), Tick::MAX);
        assert_eq!(remaining(Tick::MIN, 1), Tick::MIN);
        assert_eq!(remaining(130, 115), 15);
    }

    #[test]
    fn test_zero_length_alpha() {
        assert_eq!(alpha(50, 50, 50), 1.0);
        assert_eq!(alpha(50, 50, 0), 1.0);
        assert_eq!(alpha(0, 0, 0), 1.0);
    }

    #[test]
    fn test_alpha_extremes_do_not_overflow() {
        assert_float_eq!(alpha(Tick::MIN, Tick::MAX, Tick::MAX), 1.0, abs <= 1e-9);
        assert_float_eq!(alpha(Tick::MIN, Tick::MAX, 0), 0.5, abs <= 1e-9);
    }

    proptest! {
        #[test]
        fn test_clamped_alpha_in_unit_range(established: Tick, target: Tick, current: Tick) {
            let a = clamp_unit(alpha(established, target, current));
            prop_assert!((0.0..=1.0).contains(&a));
        }

        #[test]
        fn test_seconds_round_trip(ticks in -100_000..100_000i32, rate in 1..240u32) {
            let step = 1.0 / rate as f64;
            let seconds = seconds_from_ticks(ticks as f64, step);
            prop_assert_eq!(ticks_from_seconds(seconds, step), ticks);
        }
    }
}
