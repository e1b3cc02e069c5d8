/// Core clock. The carrier timing of the IR LED depends on it.
pub const SYSCLK_HZ: u32 = 72_000_000;

/// External crystal on the blue pill.
pub const HSE_HZ: u32 = 8_000_000;

/// Power Functions channel, 0 to 3. The receiver's selector shows this plus one.
pub const IR_CHANNEL: u8 = 0;

/// Rate at which the joystick is sampled and a combo command is sent. A full
/// command takes around 80ms on air.
pub const UPDATE_HZ: u32 = 5;

/// Mid-scale reading of the 12 bit ADC.
pub const ADC_CENTRE: i32 = 2048;

/// Readings this close to the centre leave the motor floating.
pub const DEAD_ZONE: i32 = 160;

/// Commands between status lines on the semihosting console.
pub const STATUS_EVERY: u32 = 50;
