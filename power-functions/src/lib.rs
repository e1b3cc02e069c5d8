// This is based on this document:
// http://www.philohome.com/pf/LEGO_Power_Functions_RC_v120.pdf
//
// A frame is 16 bits, sent most significant first:
//
//   nibble 1   nibble 2   nibble 3   nibble 4
//   T E C C    a M M M    D D D D    L L L L
//
// T is the toggle bit, E the escape bit, C the channel, M the mode, D the data
// and L the checksum. Each bit is a burst of 6 cycles of 38kHz carrier, followed
// by a short pause for a 0 or a long pause for a 1. A frame is framed by a start
// and a stop bit, which are bursts followed by an even longer pause, and is sent
// 5 times.
#![cfg_attr(not(test), no_std)]

pub mod consts;
pub mod message;
pub mod timing;
mod transmitter;

#[cfg(test)]
mod fake;

pub use message::{Command, Message, Output, Pwm};
pub use transmitter::PowerFunctions;
