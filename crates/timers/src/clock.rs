use log::{debug, trace};

use crate::errors::ClockError;
use crate::{Tick, TickSnapshot, TimeSource};

/// Implementation of [TimeSource] which is advanced by hand, one fixed step at a time.
///
/// This stands in for the simulation engine: whatever drives the simulation calls [Clock::advance] once per step and
/// [Clock::confirm] whenever the server acknowledges a tick.
#[derive(Debug, Clone)]
pub struct Clock {
    predicted_tick: Tick,
    authoritative_tick: Tick,
    fixed_step_duration: f64,
    interpolation_fraction: f64,
}

#[derive(Debug, Default)]
pub struct ClockBuilder {
    predicted_tick: Option<Tick>,
    authoritative_tick: Option<Tick>,
    fixed_step_duration: Option<f64>,
    interpolation_fraction: Option<f64>,
}

fn validate_step_duration(step: f64) -> Result<f64, ClockError> {
    if step <= 0.0 || step.is_nan() || step.is_infinite() {
        return Err(ClockError::InvalidStepDuration(step));
    }
    Ok(step)
}

fn validate_fraction(fraction: f64) -> Result<f64, ClockError> {
    // NaN is in no range.
    if !(0.0..1.0).contains(&fraction) {
        return Err(ClockError::InvalidInterpolationFraction(fraction));
    }
    Ok(fraction)
}

impl ClockBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn predicted_tick(mut self, tick: Tick) -> Self {
        self.predicted_tick = Some(tick);
        self
    }

    /// Defaults to the predicted tick.
    pub fn authoritative_tick(mut self, tick: Tick) -> Self {
        self.authoritative_tick = Some(tick);
        self
    }

    pub fn fixed_step_duration(mut self, seconds: f64) -> Self {
        self.fixed_step_duration = Some(seconds);
        self
    }

    /// Defaults to 0.
    pub fn interpolation_fraction(mut self, fraction: f64) -> Self {
        self.interpolation_fraction = Some(fraction);
        self
    }

    pub fn build(self) -> Result<Clock, ClockError> {
        let predicted_tick = self
            .predicted_tick
            .ok_or(ClockError::MissingField("predicted_tick"))?;
        let fixed_step_duration = self
            .fixed_step_duration
            .ok_or(ClockError::MissingField("fixed_step_duration"))?;
        let fixed_step_duration = validate_step_duration(fixed_step_duration)?;
        let interpolation_fraction = validate_fraction(self.interpolation_fraction.unwrap_or(0.0))?;
        let authoritative_tick = self.authoritative_tick.unwrap_or(predicted_tick);

        if authoritative_tick > predicted_tick {
            return Err(ClockError::AuthorityAhead {
                authoritative: authoritative_tick,
                predicted: predicted_tick,
            });
        }

        Ok(Clock {
            predicted_tick,
            authoritative_tick,
            fixed_step_duration,
            interpolation_fraction,
        })
    }
}

impl Clock {
    /// Advance the predicted tick by one.
    pub fn advance(&mut self) {
        self.advance_multiple(1);
    }

    /// Advance the predicted tick by 0 or more ticks, resetting sub-tick progress.
    ///
    /// Saturates at `Tick::MAX`.
    pub fn advance_multiple(&mut self, ticks: u32) {
        let ticks = Tick::try_from(ticks).unwrap_or(Tick::MAX);
        self.predicted_tick = self.predicted_tick.saturating_add(ticks);
        self.interpolation_fraction = 0.0;
        trace!("Clock advanced to predicted tick {}", self.predicted_tick);
    }

    /// Record that the source of truth has confirmed everything up to `tick`.
    ///
    /// The authoritative tick may never pass the predicted tick or move backwards.
    pub fn confirm(&mut self, tick: Tick) -> Result<(), ClockError> {
        if tick > self.predicted_tick {
            debug!(
                "Refusing to confirm tick {} ahead of predicted tick {}",
                tick, self.predicted_tick
            );
            return Err(ClockError::AuthorityAhead {
                authoritative: tick,
                predicted: self.predicted_tick,
            });
        }

        if tick < self.authoritative_tick {
            debug!(
                "Refusing to move authoritative tick back from {} to {}",
                self.authoritative_tick, tick
            );
            return Err(ClockError::AuthorityRegressed {
                requested: tick,
                current: self.authoritative_tick,
            });
        }

        self.authoritative_tick = tick;
        Ok(())
    }

    pub fn set_interpolation_fraction(&mut self, fraction: f64) -> Result<(), ClockError> {
        self.interpolation_fraction = validate_fraction(fraction)?;
        Ok(())
    }

    pub fn snapshot(&self) -> TickSnapshot {
        TickSnapshot::capture(self)
    }
}

impl TimeSource for Clock {
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
