//! Clock arithmetic
//!
//! Conversions from human units to the values the hardware is programmed
//! with. Intermediates are 64-bit so no valid input overflows.

use crate::error::Error;

/// Milliseconds per second
const MS_PER_S: u64 = 1000;

/// Baud-rate generator divisor
///
/// `divisor = clock_hz / (baud * (frame_bits + framing_overhead))`,
/// truncated. 25 MHz at 115200 baud with 8-bit frames gives 27.
pub fn uart_divisor(
    clock_hz: u32,
    baud: u32,
    frame_bits: u8,
    framing_overhead: u8,
) -> Result<u32, Error> {
    let bits = u64::from(frame_bits) + u64::from(framing_overhead);
    let denominator = u64::from(baud) * bits;
    if denominator == 0 {
        return Err(Error::InvalidDivisor);
    }

    let divisor = u64::from(clock_hz) / denominator;
    if divisor == 0 {
        // Baud too high for the peripheral clock
        return Err(Error::InvalidDivisor);
    }

    // divisor <= clock_hz, so it always fits
    u32::try_from(divisor).map_err(|_| Error::InvalidDivisor)
}

/// Timer ticks for a duration in milliseconds
///
/// `ticks = ms * frequency_hz / 1000`, truncated.
pub fn ms_to_ticks(ms: u32, frequency_hz: u32) -> Result<u32, Error> {
    let ticks = u64::from(ms) * u64::from(frequency_hz) / MS_PER_S;
    u32::try_from(ticks).map_err(|_| Error::TickOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_divisor() {
        // 25_000_000 / (115_200 * 8) = 27.126...
        assert_eq!(uart_divisor(25_000_000, 115_200, 8, 0), Ok(27));
    }

    #[test]
    fn test_divisor_with_framing_overhead() {
        // Start + stop bits: 25_000_000 / (115_200 * 10) = 21.7
        assert_eq!(uart_divisor(25_000_000, 115_200, 8, 2), Ok(21));
    }

    #[test]
    fn test_invalid_divisor() {
        assert_eq!(uart_divisor(25_000_000, 0, 8, 0), Err(Error::InvalidDivisor));
        assert_eq!(uart_divisor(25_000_000, 115_200, 0, 0), Err(Error::InvalidDivisor));
        assert_eq!(uart_divisor(1_000, 115_200, 8, 0), Err(Error::InvalidDivisor));
    }

    #[test]
    fn test_reference_ticks() {
        assert_eq!(ms_to_ticks(150, 25_000_000), Ok(3_750_000));
        assert_eq!(ms_to_ticks(50, 25_000_000), Ok(1_250_000));
        assert_eq!(ms_to_ticks(1000, 25_000_000), Ok(25_000_000));
        assert_eq!(ms_to_ticks(0, 25_000_000), Ok(0));
    }

    #[test]
    fn test_tick_overflow() {
        // 200 s at 25 MHz is 5e9 ticks
        assert_eq!(ms_to_ticks(200_000, 25_000_000), Err(Error::TickOverflow));
    }

    proptest! {
        #[test]
        fn prop_divisor_is_truncated_quotient(
            clock in 1_000_000u32..=200_000_000,
            baud in 1_200u32..=1_000_000,
            bits in 5u8..=9,
            overhead in 0u8..=3,
        ) {
            let denominator = u64::from(baud) * (u64::from(bits) + u64::from(overhead));
            match uart_divisor(clock, baud, bits, overhead) {
                Ok(d) => {
                    let d = u64::from(d);
                    prop_assert!(d * denominator <= u64::from(clock));
                    prop_assert!((d + 1) * denominator > u64::from(clock));
                }
                Err(e) => {
                    prop_assert_eq!(e, Error::InvalidDivisor);
                    prop_assert!(u64::from(clock) < denominator);
                }
            }
        }

        #[test]
        fn prop_ticks_monotonic(a in 0u32..100_000, b in 0u32..100_000, hz in 1u32..=50_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let t_lo = ms_to_ticks(lo, hz);
            let t_hi = ms_to_ticks(hi, hz);
            if let (Ok(t_lo), Ok(t_hi)) = (t_lo, t_hi) {
                prop_assert!(t_lo <= t_hi);
            }
        }
    }
}
