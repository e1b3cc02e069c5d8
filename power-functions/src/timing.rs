//! Transmission schedule.
//!
//! A message is repeated [`REPETITIONS`] times. Remotes on different channels
//! transmit on different cadences so that two remotes held side by side do not
//! keep colliding; the gap before each repetition is a multiple of
//! [`PAUSE_UNIT`] chosen from the repetition index and the channel.

use crate::consts::*;

/// Pause before repetition `repetition`, in units of [`PAUSE_UNIT`].
///
/// From the fourth repetition on the gap is `6 + 2·(channel + 1)` rather than
/// the `5 + 2·(channel + 1)` given in the protocol document; receivers were
/// observed to miss frames with the shorter gap. Needs confirming on hardware
/// for every channel.
pub const fn pause_units(repetition: u8, channel: u8) -> u8 {
    let channel = (channel & CHANNEL_MASK) + 1;
    match repetition {
        0 => 4 - channel,
        1 | 2 => 5,
        _ => 6 + channel * 2,
    }
}

/// Pause before repetition `repetition`, in microseconds. May be zero.
pub const fn pause_us(repetition: u8, channel: u8) -> u16 {
    pause_units(repetition, channel) as u16 * PAUSE_UNIT
}

/// Pause after the carrier burst of a data bit.
pub const fn data_pause_us(bit: bool) -> u16 {
    if bit {
        HIGH_PAUSE
    } else {
        LOW_PAUSE
    }
}

/// Whether the carrier half-periods are timed with an explicit delay on a CPU
/// clocked at `f_cpu` Hz.
pub const fn carrier_half_period_enabled(f_cpu: u32) -> bool {
    f_cpu >= HALF_PERIOD_MIN_F_CPU
}

/// Time spent in delays for one burst of carrier.
pub const fn burst_us(carrier_delay: bool) -> u32 {
    if carrier_delay {
        BURST_CYCLES as u32 * 2 * HALF_PERIOD as u32
    } else {
        0
    }
}

/// Time spent in delays for a single frame, start bit to stop bit, not counting
/// the pause that precedes it or the time taken to drive the pin.
pub fn frame_us(bits: impl Iterator<Item = bool>, carrier_delay: bool) -> u32 {
    let mark = burst_us(carrier_delay);
    let start_stop = 2 * (mark + START_STOP as u32);
    bits.fold(start_stop, |total, bit| {
        total + mark + data_pause_us(bit) as u32
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_channel_schedule() {
        let schedule: [u16; 5] = [
            pause_us(0, 2),
            pause_us(1, 2),
            pause_us(2, 2),
            pause_us(3, 2),
            pause_us(4, 2),
        ];
        assert_eq!(schedule, [77, 385, 385, 924, 924]);
    }

    #[test]
    fn first_pause_shrinks_with_channel() {
        assert_eq!(pause_units(0, 0), 3);
        assert_eq!(pause_units(0, 1), 2);
        assert_eq!(pause_units(0, 2), 1);
        assert_eq!(pause_units(0, 3), 0);
        assert_eq!(pause_us(0, 3), 0);
    }

    #[test]
    fn late_pauses_grow_with_channel() {
        assert_eq!(pause_units(3, 0), 8);
        assert_eq!(pause_units(4, 1), 10);
        assert_eq!(pause_units(3, 3), 14);
    }

    #[test]
    fn channel_is_masked() {
        assert_eq!(pause_units(0, 7), pause_units(0, 3));
    }

    #[test]
    fn clock_threshold() {
        assert!(!carrier_half_period_enabled(8_000_000));
        assert!(carrier_half_period_enabled(16_000_000));
        assert!(carrier_half_period_enabled(72_000_000));
    }

    #[test]
    fn longest_frame_fits_the_protocol_budget() {
        let ones = core::iter::repeat(true).take(MESSAGE_BITS as usize);
        let longest = frame_us(ones, true);
        assert_eq!(longest, 2 * (156 + 1026) + 16 * (156 + 552));
        assert!(longest <= MAX_MESSAGE_LENGTH as u32);
    }
}
