//! A fixed back and forth program that needs no input

use crate::config::{SCHEDULE_PAUSE, SCHEDULE_STEPS};
use crate::source::CommandSource;
use crate::Error;
use embedded_hal::delay::DelayNs;
use embedded_time::duration::*;
use log::debug;
use stepper_core::drive::{Command, Direction};

/// Alternates forward and reverse strokes of equal length forever,
/// pausing after each stroke
pub struct Schedule<US> {
	delay: US,
	steps: u32,
	pause: Microseconds<u32>,
	next: Direction,
}

impl<US> Schedule<US>
where
	US: DelayNs,
{
	pub fn new(delay: US, steps: u32, pause: Microseconds<u32>) -> Self {
		Self {
			delay,
			steps,
			pause,
			next: Direction::Forward,
		}
	}

	/// 1000 steps forward, one second rest, 1000 steps back, one second rest
	pub fn reciprocate(delay: US) -> Self {
		Self::new(delay, SCHEDULE_STEPS, SCHEDULE_PAUSE)
	}
}

impl<US> CommandSource for Schedule<US>
where
	US: DelayNs,
{
	fn poll(&mut self) -> nb::Result<Command, Error> {
		let cmd = Command::new(self.next, self.steps);
		self.next = match self.next {
			Direction::Forward => Direction::Reverse,
			Direction::Reverse => Direction::Forward,
		};
		debug!("next stroke {:?}", cmd);
		Ok(cmd)
	}

	fn complete(&mut self, _command: &Command) -> Result<(), Error> {
		self.delay.delay_us(self.pause.0);
		Ok(())
	}
}
