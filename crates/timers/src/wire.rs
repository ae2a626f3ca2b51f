//! Fixed layout encoding of timers, for hosts which replicate them field by field.
//!
//! On the wire a countdown is the established tick then the target tick, each a big-endian i32.  A pausable timer
//! follows those with the pause flag as one byte and then the last paused tick.
use bytes::{Buf, BufMut};

use crate::errors::WireError;
use crate::{PausableTimer, TickAnchor, TickCountdown};

pub trait Replicate: Sized {
    /// Exact number of bytes `encode` writes.
    const WIRE_SIZE: usize;

    fn encode(&self, dest: &mut impl BufMut);

    fn decode(source: &mut impl Buf) -> Result<Self, WireError>;
}

fn ensure_remaining(source: &impl Buf, needed: usize) -> Result<(), WireError> {
    let available = source.remaining();
    if available < needed {
        return Err(WireError::NotEnoughData { needed, available });
    }
    Ok(())
}

impl<A: TickAnchor> Replicate for TickCountdown<A> {
    const WIRE_SIZE: usize = 8;

    fn encode(&self, dest: &mut impl BufMut) {
        dest.put_i32(self.established_tick());
        dest.put_i32(self.target_tick());
    }

    fn decode(source: &mut impl Buf) -> Result<Self, WireError> {
        ensure_remaining(&*source, Self::WIRE_SIZE)?;

        let established_tick = source.get_i32();
        let target_tick = source.get_i32();
        Ok(TickCountdown::from_parts(established_tick, target_tick))
    }
}

impl Replicate for PausableTimer {
    const WIRE_SIZE: usize = 13;

    fn encode(&self, dest: &mut impl BufMut) {
        dest.put_i32(self.established_tick());
        dest.put_i32(self.target_tick());
        dest.put_u8(self.is_paused() as u8);
        dest.put_i32(self.last_paused_tick());
    }

    fn decode(source: &mut impl Buf) -> Result<Self, WireError> {
        ensure_remaining(&*source, Self::WIRE_SIZE)?;

        let established_tick = source.get_i32();
        let target_tick = source.get_i32();
        let is_paused = match source.get_u8() {
            0 => false,
            1 => true,
            x => return Err(WireError::InvalidBool(x)),
        };
        let last_paused_tick = source.get_i32();

        Ok(PausableTimer::from_parts(
            established_tick,
            target_tick,
            is_paused,
            last_paused_tick,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::{AuthorityTimer, PlainTimer};

    #[test]
    fn test_layout() {
        let mut buf = vec![];
        PlainTimer::from_parts(1, 0x0102_0304).encode(&mut buf);
        assert_eq!(buf, vec![0, 0, 0, 1, 1, 2, 3, 4]);

        let mut buf = vec![];
        PausableTimer::from_parts(-1, 2, true, 3).encode(&mut buf);
        assert_eq!(
            buf,
            vec![0xff, 0xff, 0xff, 0xff, 0, 0, 0, 2, 1, 0, 0, 0, 3]
        );
        assert_eq!(buf.len(), PausableTimer::WIRE_SIZE);
    }

    #[test]
    fn test_decoding_errors() {
        assert_eq!(
            AuthorityTimer::decode(&mut &[0u8; 7][..]),
            Err(WireError::NotEnoughData {
                needed: 8,
                available: 7
            })
        );
        assert_eq!(
            PausableTimer::decode(&mut &[0u8; 0][..]),
            Err(WireError::NotEnoughData {
                needed: 13,
                available: 0
            })
        );

        let mut bad_flag = vec![];
        PausableTimer::from_parts(5, 10, false, 0).encode(&mut bad_flag);
        bad_flag[8] = 2;
        assert_eq!(
            PausableTimer::decode(&mut &bad_flag[..]),
            Err(WireError::InvalidBool(2))
        );
    }

    #[test]
    fn test_decode_consumes_exactly_one_timer() {
        let mut buf = vec![];
        PlainTimer::from_parts(10, 20).encode(&mut buf);
        PlainTimer::from_parts(30, 40).encode(&mut buf);

        let mut source = &buf[..];
        assert_eq!(
            PlainTimer::decode(&mut source).unwrap(),
            PlainTimer::from_parts(10, 20)
        );
        assert_eq!(
            PlainTimer::decode(&mut source).unwrap(),
            PlainTimer::from_parts(30, 40)
        );
        assert!(source.is_empty());
    }

    // Hand-encoding in the wrong order is the main thing that can go wrong here.
    proptest! {
        #[test]
        fn test_fuzz_encoding(timer: PausableTimer) {
            let mut buf = vec![];
            timer.encode(&mut buf);
            prop_assert_eq!(buf.len(), PausableTimer::WIRE_SIZE);
            let out = PausableTimer::decode(&mut &buf[..]).expect("Should decode");
            prop_assert_eq!(timer, out);
        }
    }
}
