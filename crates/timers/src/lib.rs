//! Countdown timers measured in simulation ticks.
//!
//! Timers are small `Copy` values holding the tick they were established at and the tick they expire at.  They never
//! own a clock: every query takes a [TimeSource] and answers relative to the tick it reports.  This makes them safe to
//! store in replicated state, since two peers holding the same integers will always agree given the same tick.
mod arithmetic;
mod clock;
mod countdown;
mod errors;
mod pausable;
mod time_source;
mod wire;

pub use clock::*;
pub use countdown::*;
pub use errors::*;
pub use pausable::*;
pub use time_source::*;
pub use wire::*;
