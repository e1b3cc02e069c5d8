// Recording pin and delay for host tests. Both halves write to one shared log so
// the interleaving of pin edges and delays can be checked.

use std::{cell::RefCell, convert::Infallible, rc::Rc, vec::Vec};

use embedded_hal::{blocking::delay::DelayUs, digital::v2::OutputPin};

use crate::consts::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    High,
    Low,
    Delay(u16),
}

#[derive(Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Event>>>);

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self) -> FakePin {
        FakePin(self.clone())
    }

    pub fn delay(&self) -> FakeDelay {
        FakeDelay(self.clone())
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }
}

pub struct FakePin(Trace);

impl OutputPin for FakePin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.push(Event::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.push(Event::High);
        Ok(())
    }
}

pub struct FakeDelay(Trace);

impl DelayUs<u16> for FakeDelay {
    fn delay_us(&mut self, us: u16) {
        self.0.push(Event::Delay(us));
    }
}

/// One repetition as seen on the pin.
#[derive(Debug, Eq, PartialEq)]
pub struct Frame {
    /// Inter-message pause, `None` when no delay was issued.
    pub pause: Option<u16>,
    pub bits: u16,
}

/// Splits a recorded transmission back into frames, asserting that every
/// burst, start and stop bit has the expected shape.
pub fn decode(events: &[Event], carrier_delay: bool) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut at = 0;
    while at < events.len() {
        let pause = match events[at] {
            Event::Delay(us) => {
                at += 1;
                Some(us)
            }
            _ => None,
        };
        at = burst(events, at, carrier_delay);
        assert_eq!(events[at], Event::Delay(START_STOP), "start bit at {}", at);
        at += 1;
        let mut bits = 0u16;
        for _ in 0..MESSAGE_BITS {
            at = burst(events, at, carrier_delay);
            let bit = match events[at] {
                Event::Delay(HIGH_PAUSE) => 1,
                Event::Delay(LOW_PAUSE) => 0,
                other => panic!("expected a data pause at {}, got {:?}", at, other),
            };
            bits = bits << 1 | bit;
            at += 1;
        }
        at = burst(events, at, carrier_delay);
        assert_eq!(events[at], Event::Delay(START_STOP), "stop bit at {}", at);
        at += 1;
        frames.push(Frame { pause, bits });
    }
    frames
}

fn burst(events: &[Event], mut at: usize, carrier_delay: bool) -> usize {
    for _ in 0..BURST_CYCLES {
        for level in [Event::High, Event::Low].iter() {
            assert_eq!(events[at], *level, "carrier edge at {}", at);
            at += 1;
            if carrier_delay {
                assert_eq!(events[at], Event::Delay(HALF_PERIOD), "half period at {}", at);
                at += 1;
            }
        }
    }
    at
}
