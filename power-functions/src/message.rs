use crate::consts::*;

/// One of the two outputs of a receiver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Output {
    /// Output A
    Red,
    /// Output B
    Blue,
}

impl From<Output> for u8 {
    fn from(output: Output) -> u8 {
        match output {
            Output::Red => RED,
            Output::Blue => BLUE,
        }
    }
}

/// Speed steps as understood by the receiver.
///
/// `Forward` and `Reverse` carry a step in `1..=7`; anything outside is clamped
/// when encoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pwm {
    Float,
    Forward(u8),
    Brake,
    Reverse(u8),
}

impl Pwm {
    /// Maps a signed speed onto a PWM step, saturating at ±7. Zero floats the output.
    pub fn from_speed(speed: i8) -> Self {
        match speed {
            0 => Pwm::Float,
            s if s > 0 => Pwm::Forward(s.min(7) as u8),
            s => Pwm::Reverse(s.max(-7).unsigned_abs()),
        }
    }
}

fn clamp_step(step: u8) -> u8 {
    step.max(1).min(7)
}

impl From<Pwm> for u8 {
    fn from(pwm: Pwm) -> u8 {
        match pwm {
            Pwm::Float => PWM_FLT,
            Pwm::Forward(step) => PWM_FLT + clamp_step(step),
            Pwm::Brake => PWM_BRK,
            // REV7 is 0x9 and REV1 is 0xF
            Pwm::Reverse(step) => 0x10 - clamp_step(step),
        }
    }
}

/// A command the transmitter knows how to send.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    SinglePwm { output: u8, pwm: u8 },
    Increment { output: u8 },
    Decrement { output: u8 },
    ComboPwm { blue: u8, red: u8 },
}

impl Command {
    /// Single output commands flip the toggle bit once sent, combo commands do not.
    pub fn toggles(&self) -> bool {
        !matches!(self, Command::ComboPwm { .. })
    }

    /// Builds the frame for this command, given the current toggle bit and channel.
    pub fn message(&self, toggle: u8, channel: u8) -> Message {
        match *self {
            Command::SinglePwm { output, pwm } => Message::single_pwm(toggle, channel, output, pwm),
            Command::Increment { output } => Message::single_increment(toggle, channel, output),
            Command::Decrement { output } => Message::single_decrement(toggle, channel, output),
            Command::ComboPwm { blue, red } => Message::combo_pwm(channel, blue, red),
        }
    }
}

/// The three data nibbles of a frame. The fourth, the checksum, is derived.
///
/// Every field is masked to four bits on construction, so a frame built from
/// out of range values is still well formed on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message {
    nib1: u8,
    nib2: u8,
    nib3: u8,
}

impl Message {
    pub fn new(nib1: u8, nib2: u8, nib3: u8) -> Self {
        Self {
            nib1: nib1 & NIBBLE_MASK,
            nib2: nib2 & NIBBLE_MASK,
            nib3: nib3 & NIBBLE_MASK,
        }
    }

    pub fn single_pwm(toggle: u8, channel: u8, output: u8, pwm: u8) -> Self {
        Self::new(
            single_address(toggle, channel),
            SINGLE_OUTPUT | output,
            pwm,
        )
    }

    pub fn single_increment(toggle: u8, channel: u8, output: u8) -> Self {
        Self::new(
            single_address(toggle, channel),
            SINGLE_EXT | output,
            INCREMENT_PWM,
        )
    }

    pub fn single_decrement(toggle: u8, channel: u8, output: u8) -> Self {
        Self::new(
            single_address(toggle, channel),
            SINGLE_EXT | output,
            DECREMENT_PWM,
        )
    }

    /// Combo PWM sets both outputs in one frame: output B (blue) in nibble 2 and
    /// output A (red) in nibble 3.
    pub fn combo_pwm(channel: u8, blue: u8, red: u8) -> Self {
        Self::new(ESCAPE | (channel & CHANNEL_MASK), blue, red)
    }

    pub fn nibbles(&self) -> [u8; 4] {
        [self.nib1, self.nib2, self.nib3, self.checksum()]
    }

    /// Longitudinal redundancy check over the three data nibbles.
    pub fn checksum(&self) -> u8 {
        NIBBLE_MASK ^ self.nib1 ^ self.nib2 ^ self.nib3
    }

    pub fn to_bits(&self) -> u16 {
        (self.nib1 as u16) << 12
            | (self.nib2 as u16) << 8
            | (self.nib3 as u16) << 4
            | self.checksum() as u16
    }

    /// The bits in transmission order, most significant first.
    pub fn bits(&self) -> impl Iterator<Item = bool> {
        let bits = self.to_bits();
        (0..MESSAGE_BITS).rev().map(move |i| bits & (1 << i) != 0)
    }
}

fn single_address(toggle: u8, channel: u8) -> u8 {
    (toggle & TOGGLE) | (channel & CHANNEL_MASK)
}
