//! helpers for logging.
//!
//! Everything here respects `RUST_LOG`.  When it isn't set, timers log at `info`.
use std::io::Write;

/// Filter used when `RUST_LOG` is absent.
pub const DEFAULT_FILTER: &str = "info";

fn builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(DEFAULT_FILTER).parse_default_env();
    builder
}

/// Log to stderr, one line per record stamped with the wall-clock time it was written.
///
/// If called multiple times in the same process, only applies once.
pub fn log_to_stderr() {
    static ONCE: std::sync::Once = std::sync::Once::new();

    ONCE.call_once(|| {
        builder()
            .format(|buf, record| {
                let now = time::OffsetDateTime::now_utc();

                writeln!(
                    buf,
                    "{} {} time={} target={}",
                    record.level(),
                    record.args(),
                    now,
                    record.target()
                )
            })
            .init();
    });
}

/// Route logs through the test harness so they only show up for failing tests.
///
/// Safe to call from every test.
pub fn log_for_tests() {
    let _ = builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
