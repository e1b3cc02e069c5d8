use core::{convert::Infallible, mem};

use embedded_hal::{blocking::delay::DelayUs, digital::v2::OutputPin};

use crate::{
    consts::*,
    message::{Command, Message},
    timing,
};

/// Drives an IR LED on a single pin, bit-banging the carrier.
///
/// Every command blocks until all [`REPETITIONS`] of its frame are on the air,
/// which takes in the order of 70ms. `F_CPU` is the core clock in Hz; below
/// [`HALF_PERIOD_MIN_F_CPU`] the carrier half-periods are not padded with a
/// delay, so the pin writes must take about [`HALF_PERIOD`] on their own.
///
/// The pin is expected to already be in push-pull output mode, which the HAL
/// enforces by type. Timing interrupted by a higher priority interrupt will
/// corrupt the frame; nothing here can detect that.
pub struct PowerFunctions<P, D, const F_CPU: u32 = 16_000_000> {
    pin: P,
    delay: D,
    channel: u8,
    toggle: u8,
}

impl<P, D, const F_CPU: u32> PowerFunctions<P, D, F_CPU>
where
    P: OutputPin<Error = Infallible>,
    D: DelayUs<u16>,
{
    const CARRIER_DELAY: bool = timing::carrier_half_period_enabled(F_CPU);

    /// Takes over `pin` on `channel` (0 to 3, printed 1 to 4 on the remote) and
    /// pulls the pin low.
    pub fn new(pin: P, delay: D, channel: u8) -> Self {
        let mut pf = Self {
            pin,
            delay,
            channel: 0,
            toggle: 0,
        };
        pf.reset(channel);
        pf
    }

    /// Rebinds to `pin` and `channel`, returning the pin used so far. The toggle
    /// bit starts over.
    pub fn init(&mut self, pin: P, channel: u8) -> P {
        let previous = mem::replace(&mut self.pin, pin);
        self.reset(channel);
        previous
    }

    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Current toggle bit, either `0` or [`TOGGLE`].
    pub fn toggle(&self) -> u8 {
        self.toggle
    }

    pub fn red_pwm(&mut self, pwm: u8) {
        self.set_power(RED, pwm);
    }

    pub fn blue_pwm(&mut self, pwm: u8) {
        self.set_power(BLUE, pwm);
    }

    /// Single output mode: sets `output` to the PWM step `pwm`.
    pub fn set_power(&mut self, output: u8, pwm: u8) {
        self.execute(Command::SinglePwm { output, pwm });
    }

    /// Single output mode: one PWM step up.
    pub fn increment(&mut self, output: u8) {
        self.execute(Command::Increment { output });
    }

    /// Single output mode: one PWM step down.
    pub fn decrement(&mut self, output: u8) {
        self.execute(Command::Decrement { output });
    }

    /// Combo PWM mode: sets both outputs at once.
    pub fn set_combo_power(&mut self, blue: u8, red: u8) {
        self.execute(Command::ComboPwm { blue, red });
    }

    pub fn execute(&mut self, command: Command) {
        let message = command.message(self.toggle, self.channel);
        #[cfg(feature = "defmt")]
        defmt::trace!("pf: ch{} {} -> {=u16:#x}", self.channel, command, message.to_bits());
        self.send(message);
        if command.toggles() {
            self.toggle_sync_bit();
        }
    }

    fn reset(&mut self, channel: u8) {
        self.channel = channel & CHANNEL_MASK;
        self.toggle = 0;
        self.set_low();
    }

    fn toggle_sync_bit(&mut self) {
        self.toggle ^= TOGGLE;
    }

    fn send(&mut self, message: Message) {
        for repetition in 0..REPETITIONS {
            self.pause(repetition);
            self.start_stop_bit();
            for bit in message.bits() {
                self.send_bit();
                self.delay.delay_us(timing::data_pause_us(bit));
            }
            self.start_stop_bit();
        }
    }

    fn pause(&mut self, repetition: u8) {
        let pause = timing::pause_us(repetition, self.channel);
        // Some targets fault on a zero length delay.
        if pause > 0 {
            self.delay.delay_us(pause);
        }
    }

    fn start_stop_bit(&mut self) {
        self.send_bit();
        self.delay.delay_us(START_STOP);
    }

    fn send_bit(&mut self) {
        for _ in 0..BURST_CYCLES {
            self.set_high();
            if Self::CARRIER_DELAY {
                self.delay.delay_us(HALF_PERIOD);
            }
            self.set_low();
            if Self::CARRIER_DELAY {
                self.delay.delay_us(HALF_PERIOD);
            }
        }
    }

    fn set_high(&mut self) {
        self.pin.set_high().unwrap_or_else(|never| match never {})
    }

    fn set_low(&mut self) {
        self.pin.set_low().unwrap_or_else(|never| match never {})
    }
}
