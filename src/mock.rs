//! Simulated bus for tests
//!
//! [`SimBus`] is a wire-AND of the master's two pins and one optional device.
//! It records every port call, decodes what a device on the wire would see,
//! and acknowledges like a PCF8574 at the configured address.

use core::{cell::Cell, convert::Infallible};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;

use crate::line::{Direction, Line, LinePort};

/// A call the engine made on the GPIO boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PortCall {
    SetDirection(Line, Direction),
    Clear(Line),
    Read(Line),
}

/// Something a device on the bus would notice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BusEvent {
    Start,
    RepeatedStart,
    Stop,
    Byte { value: u8, acked: bool },
}

pub(crate) struct SimBus {
    clock: Direction,
    data: Direction,

    device: Option<u8>,
    accept_data: bool,
    device_pull: bool,

    calls: Vec<PortCall>,
    events: Vec<BusEvent>,
    bits: Vec<bool>,
    received: Vec<u8>,
    clock_pulses: usize,

    time: Option<SimClock>,
    clock_fell_at: Option<u64>,
    shortest_clock_low: Option<u64>,

    in_frame: bool,
    addressed: bool,
    bit_count: u8,
    shift: u8,
    byte_index: usize,
    ack_clocked: bool,
}

impl SimBus {
    /// Empty bus, nobody answers
    pub(crate) fn new() -> Self {
        Self {
            clock: Direction::Input,
            data: Direction::Input,
            device: None,
            accept_data: true,
            device_pull: false,
            calls: Vec::new(),
            events: Vec::new(),
            bits: Vec::new(),
            received: Vec::new(),
            clock_pulses: 0,
            time: None,
            clock_fell_at: None,
            shortest_clock_low: None,
            in_frame: false,
            addressed: false,
            bit_count: 0,
            shift: 0,
            byte_index: 0,
            ack_clocked: false,
        }
    }

    /// Attach a device that ACKs write transactions to `address`
    pub(crate) fn with_device(mut self, address: u8) -> Self {
        self.device = Some(address);
        self
    }

    /// The device ACKs its address, but not the data
    pub(crate) fn refuse_data(mut self) -> Self {
        self.accept_data = false;
        self
    }

    /// Measure how long CLOCK stays low, against `time`
    pub(crate) fn with_time(mut self, time: SimClock) -> Self {
        self.time = Some(time);
        self
    }

    /// Shortest CLOCK low period seen, `None` without [`SimBus::with_time()`]
    pub(crate) fn shortest_clock_low(&self) -> Option<u64> {
        self.shortest_clock_low
    }

    pub(crate) fn calls(&self) -> &[PortCall] {
        &self.calls
    }

    pub(crate) fn events(&self) -> &[BusEvent] {
        &self.events
    }

    pub(crate) fn count(&self, event: BusEvent) -> usize {
        self.events.iter().filter(|&&e| e == event).count()
    }

    /// Every DATA level clocked in as a data bit, ACK clocks excluded
    pub(crate) fn sampled_bits(&self) -> &[bool] {
        &self.bits
    }

    /// Data bytes the device acknowledged
    pub(crate) fn received(&self) -> &[u8] {
        &self.received
    }

    /// Byte values of each start..stop frame
    pub(crate) fn frames(&self) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        let mut current: Option<Vec<u8>> = None;

        for event in &self.events {
            match event {
                BusEvent::Start | BusEvent::RepeatedStart => {
                    if let Some(frame) = current.take() {
                        frames.push(frame);
                    }
                    current = Some(Vec::new());
                }
                BusEvent::Byte { value, .. } => {
                    if let Some(frame) = current.as_mut() {
                        frame.push(*value);
                    }
                }
                BusEvent::Stop => {
                    if let Some(frame) = current.take() {
                        frames.push(frame);
                    }
                }
            }
        }

        frames
    }

    pub(crate) fn clock_pulses(&self) -> usize {
        self.clock_pulses
    }

    pub(crate) fn clock_high(&self) -> bool {
        self.clock == Direction::Input
    }

    pub(crate) fn data_high(&self) -> bool {
        self.data == Direction::Input && !self.device_pull
    }

    fn reset_frame(&mut self) {
        self.addressed = false;
        self.bit_count = 0;
        self.shift = 0;
        self.byte_index = 0;
        self.ack_clocked = false;
        self.device_pull = false;
    }

    fn on_data_edge(&mut self, was_high: bool, is_high: bool) {
        if !self.clock_high() || was_high == is_high {
            return;
        }

        if is_high {
            self.events.push(BusEvent::Stop);
            self.in_frame = false;
        } else {
            let event = match self.in_frame {
                true => BusEvent::RepeatedStart,
                false => BusEvent::Start,
            };
            self.events.push(event);
            self.in_frame = true;
        }
        self.reset_frame();
    }

    fn measure_clock_low(&mut self) {
        let (Some(time), Some(fell_at)) = (&self.time, self.clock_fell_at.take()) else {
            return;
        };

        let low = time.now() - fell_at;
        self.shortest_clock_low = Some(match self.shortest_clock_low {
            Some(shortest) => shortest.min(low),
            None => low,
        });
    }

    fn on_clock_rise(&mut self) {
        self.clock_pulses += 1;
        if !self.in_frame {
            return;
        }

        let level = self.data_high();
        if self.bit_count < 8 {
            self.shift = (self.shift << 1) | level as u8;
            self.bits.push(level);
            self.bit_count += 1;
        } else if !self.ack_clocked {
            self.ack_clocked = true;
            let acked = !level;
            self.events.push(BusEvent::Byte {
                value: self.shift,
                acked,
            });
            if acked && self.byte_index > 0 {
                self.received.push(self.shift);
            }
        }
    }

    fn on_clock_fall(&mut self) {
        if !self.in_frame {
            return;
        }

        if self.bit_count == 8 && !self.ack_clocked {
            // device takes DATA for the ACK clock
            self.device_pull = if self.byte_index == 0 {
                self.addressed =
                    self.shift & 1 == 0 && self.device == Some(self.shift >> 1);
                self.addressed
            } else {
                self.addressed && self.accept_data
            };
        } else if self.ack_clocked {
            self.device_pull = false;
            self.bit_count = 0;
            self.shift = 0;
            self.ack_clocked = false;
            self.byte_index += 1;
        }
    }
}

impl LinePort for SimBus {
    type Error = Infallible;

    fn set_direction(&mut self, line: Line, direction: Direction) -> Result<(), Infallible> {
        self.calls.push(PortCall::SetDirection(line, direction));

        let clock_was_high = self.clock_high();
        let data_was_high = self.data_high();

        match line {
            Line::Clock => self.clock = direction,
            Line::Data => self.data = direction,
        }

        match line {
            Line::Data => self.on_data_edge(data_was_high, self.data_high()),
            Line::Clock => match (clock_was_high, self.clock_high()) {
                (false, true) => {
                    self.measure_clock_low();
                    self.on_clock_rise();
                }
                (true, false) => {
                    self.clock_fell_at = self.time.as_ref().map(SimClock::now);
                    self.on_clock_fall();
                }
                _ => {}
            },
        }

        Ok(())
    }

    fn clear(&mut self, line: Line) -> Result<(), Infallible> {
        self.calls.push(PortCall::Clear(line));
        Ok(())
    }

    fn read_level(&mut self, line: Line) -> Result<bool, Infallible> {
        self.calls.push(PortCall::Read(line));
        Ok(match line {
            Line::Clock => self.clock_high(),
            Line::Data => self.data_high(),
        })
    }
}

/// Simulated time in nanoseconds, shared by a [`SimBus`] and a [`SimDelay`]
#[derive(Clone, Default)]
pub(crate) struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub(crate) fn now(&self) -> u64 {
        self.0.get()
    }

    fn advance(&self, ns: u32) {
        self.0.set(self.0.get() + u64::from(ns));
    }
}

/// Delay that moves a [`SimClock`] forward instead of waiting
pub(crate) struct SimDelay {
    time: SimClock,
}

impl SimDelay {
    pub(crate) fn new(time: SimClock) -> Self {
        Self { time }
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.time.advance(ns);
    }
}

/// Delay that only adds up what it was asked to wait
#[derive(Default)]
pub(crate) struct RecordingDelay {
    total_ns: u64,
}

impl RecordingDelay {
    pub(crate) fn total_ns(&self) -> u64 {
        self.total_ns
    }

    pub(crate) fn reset(&mut self) {
        self.total_ns = 0;
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_edges_with_clock_high_are_conditions() {
        let mut bus = SimBus::new();
        bus.set_direction(Line::Data, Direction::Output).unwrap();
        bus.set_direction(Line::Data, Direction::Input).unwrap();

        assert_eq!(bus.events(), &[BusEvent::Start, BusEvent::Stop]);
    }

    #[test]
    fn data_edges_with_clock_low_are_ignored() {
        let mut bus = SimBus::new();
        bus.set_direction(Line::Clock, Direction::Output).unwrap();
        bus.set_direction(Line::Data, Direction::Output).unwrap();
        bus.set_direction(Line::Data, Direction::Input).unwrap();

        assert!(bus.events().is_empty());
    }

    #[test]
    fn clock_low_is_timed_from_fall_to_rise() {
        let time = SimClock::default();
        let mut delay = SimDelay::new(time.clone());
        let mut bus = SimBus::new().with_time(time);

        bus.set_direction(Line::Clock, Direction::Output).unwrap();
        delay.delay_ns(700);
        bus.set_direction(Line::Clock, Direction::Input).unwrap();
        bus.set_direction(Line::Clock, Direction::Output).unwrap();
        delay.delay_ns(300);
        bus.set_direction(Line::Clock, Direction::Input).unwrap();

        assert_eq!(bus.shortest_clock_low(), Some(300));
        assert_eq!(SimBus::new().shortest_clock_low(), None);
    }
}
