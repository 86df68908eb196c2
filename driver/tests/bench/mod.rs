use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal_nb::serial::{ErrorType as SerialErrorType, Read, Write};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use stepper_driver::config::Config;
use stepper_driver::pulse::PulseEmitter;
use stepper_driver::source::CommandSource;
use stepper_driver::{Driver, Error};
use stepper_core::drive::Command;

/// Everything the driver does to the outside world, in order
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
	Direction(bool),
	Step(bool),
	Wait(u64),
	Sent(u8),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Line {
	Direction,
	Step,
}

/// Shared record of a simulated board
#[derive(Clone, Default)]
pub struct Bench {
	events: Rc<RefCell<Vec<Event>>>,
	rx: Rc<RefCell<VecDeque<u8>>>,
}

pub struct BenchPin {
	bench: Bench,
	line: Line,
}

pub struct BenchDelay {
	bench: Bench,
}

pub struct BenchSerial {
	bench: Bench,
}

pub type BenchDriver<SRC> = Driver<SRC, BenchPin, BenchPin, BenchDelay>;

impl Bench {
	pub fn new() -> Self {
		Self::default()
	}

	fn record(&self, event: Event) {
		self.events.borrow_mut().push(event);
	}

	pub fn delay(&self) -> BenchDelay {
		BenchDelay {
			bench: self.clone(),
		}
	}

	pub fn serial(&self) -> BenchSerial {
		BenchSerial {
			bench: self.clone(),
		}
	}

	pub fn emitter(&self, config: &Config) -> PulseEmitter<BenchPin, BenchPin, BenchDelay> {
		let dir = BenchPin {
			bench: self.clone(),
			line: Line::Direction,
		};
		let step = BenchPin {
			bench: self.clone(),
			line: Line::Step,
		};
		let emitter = config.emitter(dir, step, self.delay()).unwrap();
		// forget the initial levels
		self.take_events();
		emitter
	}

	pub fn send(&self, bytes: &[u8]) {
		self.rx.borrow_mut().extend(bytes);
	}

	pub fn rx_empty(&self) -> bool {
		self.rx.borrow().is_empty()
	}

	pub fn take_events(&self) -> Vec<Event> {
		self.events.borrow_mut().drain(..).collect()
	}
}

impl PinErrorType for BenchPin {
	type Error = Infallible;
}

impl OutputPin for BenchPin {
	fn set_low(&mut self) -> Result<(), Self::Error> {
		self.set(false);
		Ok(())
	}

	fn set_high(&mut self) -> Result<(), Self::Error> {
		self.set(true);
		Ok(())
	}
}

impl BenchPin {
	fn set(&self, level: bool) {
		let event = match self.line {
			Line::Direction => Event::Direction(level),
			Line::Step => Event::Step(level),
		};
		self.bench.record(event);
	}
}

impl DelayNs for BenchDelay {
	fn delay_ns(&mut self, ns: u32) {
		self.bench.record(Event::Wait(u64::from(ns)));
	}
}

impl SerialErrorType for BenchSerial {
	type Error = Infallible;
}

impl Read<u8> for BenchSerial {
	fn read(&mut self) -> nb::Result<u8, Self::Error> {
		self.bench
			.rx
			.borrow_mut()
			.pop_front()
			.ok_or(nb::Error::WouldBlock)
	}
}

impl Write<u8> for BenchSerial {
	fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
		self.bench.record(Event::Sent(word));
		Ok(())
	}

	fn flush(&mut self) -> nb::Result<(), Self::Error> {
		Ok(())
	}
}

/// Poll until all received bytes are consumed and nothing is pending
pub fn drain<SRC: CommandSource>(
	bench: &Bench,
	driver: &mut BenchDriver<SRC>,
) -> (Vec<Command>, Vec<Error>) {
	let mut done = vec![];
	let mut errors = vec![];
	loop {
		match driver.poll() {
			Ok(cmd) => done.push(cmd),
			Err(nb::Error::WouldBlock) => {
				if bench.rx_empty() && driver.pending().is_none() {
					break;
				}
			}
			Err(nb::Error::Other(e)) => errors.push(e),
		}
	}
	(done, errors)
}

/// Rising edges on the step line
pub fn pulses(events: &[Event]) -> usize {
	let mut last = false;
	let mut count = 0;
	for e in events {
		if let Event::Step(level) = *e {
			if level && !last {
				count += 1;
			}
			last = level;
		}
	}
	count
}

/// Level of the direction line at the end of the trace
pub fn direction(events: &[Event]) -> Option<bool> {
	events.iter().rev().find_map(|e| match *e {
		Event::Direction(level) => Some(level),
		_ => None,
	})
}

pub fn sent(events: &[Event]) -> Vec<u8> {
	events
		.iter()
		.filter_map(|e| match *e {
			Event::Sent(b) => Some(b),
			_ => None,
		})
		.collect()
}

pub fn waited_us(events: &[Event]) -> u64 {
	events
		.iter()
		.map(|e| match *e {
			Event::Wait(ns) => ns,
			_ => 0,
		})
		.sum::<u64>()
		/ 1_000
}
