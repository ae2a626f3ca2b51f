//! Drives one timer of each kind against a [Clock] and reports when each one expired.
//!
//! This is the smallest host a timer can have: it advances the predicted tick once per step, confirms ticks a fixed
//! number of steps behind, and pauses or resumes the pausable timer when told to.
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use tick_timer::{
    AuthorityTimer, Clock, ClockBuilder, PausableTimer, PlainTimer, Tick, TimeSource,
};

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Seconds per tick.
    pub fixed_step_duration: f64,
    pub start_tick: Tick,
    /// How many times to advance the clock.
    pub steps: u32,
    /// How many ticks the authoritative tick trails the predicted one.
    pub authority_lag: Tick,
    pub timer_seconds: f64,
    pub pause_at: Option<Tick>,
    pub resume_at: Option<Tick>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            fixed_step_duration: 0.1,
            start_tick: 100,
            steps: 60,
            authority_lag: 3,
            timer_seconds: 3.0,
            pause_at: Some(115),
            resume_at: Some(140),
        }
    }
}

impl SimConfig {
    /// Load from a JSON file.  Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<SimConfig> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read config {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("Unable to parse config {}", path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.authority_lag < 0 {
            anyhow::bail!("authority_lag may not be negative");
        }

        if let (Some(pause), Some(resume)) = (self.pause_at, self.resume_at) {
            if resume <= pause {
                anyhow::bail!("resume_at {} must come after pause_at {}", resume, pause);
            }
        }

        Ok(())
    }
}

/// The predicted tick at which each timer first reported itself expired, if it did.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SimReport {
    pub plain_expired_at: Option<Tick>,
    pub authority_expired_at: Option<Tick>,
    pub pausable_expired_at: Option<Tick>,
    pub final_pausable: PausableTimer,
}

fn note_expiry(slot: &mut Option<Tick>, expired: bool, tick: Tick) {
    if expired && slot.is_none() {
        *slot = Some(tick);
    }
}

fn confirm_trailing(clock: &mut Clock, lag: Tick) -> Result<()> {
    let confirmed = clock.predicted_tick().saturating_sub(lag);
    if confirmed > clock.authoritative_tick() {
        clock.confirm(confirmed)?;
    }
    Ok(())
}

pub fn run(config: &SimConfig) -> Result<SimReport> {
    config.validate()?;

    let mut clock = ClockBuilder::new()
        .predicted_tick(config.start_tick)
        .authoritative_tick(config.start_tick.saturating_sub(config.authority_lag))
        .fixed_step_duration(config.fixed_step_duration)
        .build()
        .context("Unable to build the simulation clock")?;

    let plain = PlainTimer::from_seconds(&clock, config.timer_seconds);
    let authority = AuthorityTimer::from_seconds(&clock, config.timer_seconds);
    let mut pausable = PausableTimer::from_seconds(&clock, config.timer_seconds);
    info!("Started {} {} {}", plain, authority, pausable);

    let mut report = SimReport::default();

    for _ in 0..config.steps {
        clock.advance();
        confirm_trailing(&mut clock, config.authority_lag)?;
        let tick = clock.predicted_tick();

        if config.pause_at == Some(tick) {
            pausable = pausable.pause(&clock);
        }
        if config.resume_at == Some(tick) {
            pausable = pausable.resume(&clock);
        }

        note_expiry(&mut report.plain_expired_at, plain.is_expired(&clock), tick);
        note_expiry(
            &mut report.authority_expired_at,
            authority.is_expired(&clock),
            tick,
        );
        note_expiry(
            &mut report.pausable_expired_at,
            pausable.is_expired(&clock),
            tick,
        );

        info!(
            "tick={} authoritative={} plain={:.2}s ({:.0}%) authority={:.2}s pausable={:.2}s paused={}",
            tick,
            clock.authoritative_tick(),
            plain.remaining_seconds(&clock),
            plain.alpha_clamped(&clock) * 100.0,
            authority.remaining_seconds(&clock),
            pausable.remaining_seconds(&clock),
            pausable.is_paused(),
        );
    }

    report.final_pausable = pausable;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_scenario() {
        tick_timer_logging::log_for_tests();

        let report = run(&SimConfig::default()).unwrap();
        assert_eq!(
            report,
            SimReport {
                plain_expired_at: Some(130),
                // Established at 97, so expires when the authority reaches 127, three ticks behind 130.
                authority_expired_at: Some(130),
                pausable_expired_at: Some(155),
                final_pausable: PausableTimer::from_parts(100, 155, false, 0),
            }
        );
    }

    #[test]
    fn test_never_resumed() {
        let config = SimConfig {
            resume_at: None,
            ..Default::default()
        };
        let report = run(&config).unwrap();
        assert_eq!(report.pausable_expired_at, None);
        assert_eq!(
            report.final_pausable,
            PausableTimer::from_parts(100, 130, true, 115)
        );
    }

    #[test]
    fn test_too_short_to_expire() {
        let config = SimConfig {
            steps: 10,
            ..Default::default()
        };
        let report = run(&config).unwrap();
        assert_eq!(report.plain_expired_at, None);
        assert_eq!(report.authority_expired_at, None);
        assert_eq!(report.pausable_expired_at, None);
    }

    #[test]
    fn test_invalid_configs() {
        let backwards = SimConfig {
            pause_at: Some(120),
            resume_at: Some(110),
            ..Default::default()
        };
        assert!(run(&backwards).is_err());

        let negative_lag = SimConfig {
            authority_lag: -1,
            ..Default::default()
        };
        assert!(run(&negative_lag).is_err());

        let bad_step = SimConfig {
            fixed_step_duration: 0.0,
            ..Default::default()
        };
        assert!(run(&bad_step).is_err());
    }

    #[test]
    fn test_load() {
        let tdir = tempfile::TempDir::new().unwrap();
        let path = tdir.path().join("sim.json");
        std::fs::write(&path, r#"{"steps": 5, "pause_at": null}"#).unwrap();

        let config = SimConfig::load(&path).unwrap();
        assert_eq!(
            config,
            SimConfig {
                steps: 5,
                pause_at: None,
                ..Default::default()
            }
        );

        std::fs::write(&path, r#"{"stepz": 5}"#).unwrap();
        assert!(SimConfig::load(&path).is_err());
        assert!(SimConfig::load(&tdir.path().join("missing.json")).is_err());
    }
}
