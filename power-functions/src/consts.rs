// Protocol constants, from "LEGO Power Functions RC" v1.20:
// http://www.philohome.com/pf/LEGO_Power_Functions_RC_v120.pdf

/// Carrier frequency of the IR LED, in Hz.
pub const CARRIER_HZ: u32 = 38_000;

/// Duration of `half_cycles` carrier half-periods in whole microseconds, truncated.
pub const fn ir_half_cycles(half_cycles: u32) -> u16 {
    (half_cycles * 1_000_000 / (2 * CARRIER_HZ)) as u16
}

// Every bit starts with a burst of 6 carrier cycles, then a pause whose length
// carries the value.

/// Carrier cycles in every mark.
pub const BURST_CYCLES: u8 = 6;
/// Half of one carrier period, 0.5 cycles.
pub const HALF_PERIOD: u16 = ir_half_cycles(1);
/// Extra pause after the start and stop marks, 39 cycles.
pub const START_STOP: u16 = ir_half_cycles(78);
/// Pause after the mark of a `1` bit, 21 cycles.
pub const HIGH_PAUSE: u16 = ir_half_cycles(42);
/// Pause after the mark of a `0` bit, 10 cycles.
pub const LOW_PAUSE: u16 = ir_half_cycles(20);
/// Longest possible message, 522 cycles.
pub const MAX_MESSAGE_LENGTH: u16 = ir_half_cycles(1044);

/// One unit of inter-message pause, in microseconds.
pub const PAUSE_UNIT: u16 = 77;

/// Every command is sent this many times.
pub const REPETITIONS: u8 = 5;

/// Bits in a message, nibble 1 first and the checksum last.
pub const MESSAGE_BITS: u8 = 16;

/// Below this clock the instruction overhead of a burst already approximates
/// the carrier, so the half-period delay is left out.
pub const HALF_PERIOD_MIN_F_CPU: u32 = 16_000_000;

// Nibble 1: T E C C

/// Toggle bit, flipped between single output commands.
pub const TOGGLE: u8 = 0x8;
/// Escape bit, selects combo PWM mode.
pub const ESCAPE: u8 = 0x4;
/// Channel bits.
pub const CHANNEL_MASK: u8 = 0x3;

// Nibble 2: a M M M

/// Single output mode, PWM.
pub const SINGLE_OUTPUT: u8 = 0x4;
/// Single output mode, clear/set/toggle/increment/decrement.
pub const SINGLE_EXT: u8 = 0x6;

// Output selectors

pub const RED: u8 = 0x0;
pub const BLUE: u8 = 0x1;

// Nibble 3 in single output PWM mode

pub const PWM_FLT: u8 = 0x0;
pub const PWM_FWD1: u8 = 0x1;
pub const PWM_FWD2: u8 = 0x2;
pub const PWM_FWD3: u8 = 0x3;
pub const PWM_FWD4: u8 = 0x4;
pub const PWM_FWD5: u8 = 0x5;
pub const PWM_FWD6: u8 = 0x6;
pub const PWM_FWD7: u8 = 0x7;
pub const PWM_BRK: u8 = 0x8;
pub const PWM_REV7: u8 = 0x9;
pub const PWM_REV6: u8 = 0xA;
pub const PWM_REV5: u8 = 0xB;
pub const PWM_REV4: u8 = 0xC;
pub const PWM_REV3: u8 = 0xD;
pub const PWM_REV2: u8 = 0xE;
pub const PWM_REV1: u8 = 0xF;

// Nibble 3 in single output extended mode

pub const INCREMENT_PWM: u8 = 0x4;
pub const DECREMENT_PWM: u8 = 0x5;

pub const NIBBLE_MASK: u8 = 0xF;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrier_timings_truncate_like_the_reference() {
        assert_eq!(HALF_PERIOD, 13);
        assert_eq!(START_STOP, 1026);
        assert_eq!(HIGH_PAUSE, 552);
        assert_eq!(LOW_PAUSE, 263);
        assert_eq!(MAX_MESSAGE_LENGTH, 13736);
    }

    #[test]
    fn one_bit_is_longer_than_zero_bit() {
        assert!(HIGH_PAUSE > LOW_PAUSE);
    }
}
