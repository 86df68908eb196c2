//! Host side of the line protocol
//!
//! Sends signed step counts to a driver running the line protocol and
//! waits for each acknowledgement before returning.

use embedded_hal_nb::serial::{Read, Write};
use log::{debug, trace};
use nb::block;
use stepper_core::key::Key;

const ACK: &[u8] = b"OK";
const MAX_REPLY: usize = 64;

/// Errors returned from a link to the driver
#[derive(Debug, PartialEq)]
pub enum Error {
	SerialError,
	/// the driver answered with something other than `OK`
	UnexpectedReply,
}

/// Named moves of a z axis driven through a lead screw
///
/// 720 steps move the carriage about 1/100 inch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Jog {
	Down,
	Up,
	BigDown,
	BigUp,
	WayDown,
	WayUp,
}

impl Jog {
	pub fn steps(&self) -> i32 {
		use Jog::*;
		match self {
			Down => 720,
			Up => -720,
			BigDown => 7_200,
			BigUp => -7_200,
			WayDown => 72_000,
			WayUp => -72_000,
		}
	}
}

impl From<Key> for Jog {
	fn from(key: Key) -> Self {
		match key {
			Key::SmallForward => Jog::Down,
			Key::SmallReverse => Jog::Up,
			Key::MediumForward => Jog::BigDown,
			Key::MediumReverse => Jog::BigUp,
			Key::LargeForward => Jog::WayDown,
			Key::LargeReverse => Jog::WayUp,
		}
	}
}

pub struct Link<SER> {
	serial: SER,
	sign: i32,
}

impl<SER> Link<SER>
where
	SER: Read<u8> + Write<u8>,
{
	pub fn new(serial: SER) -> Self {
		Self { serial, sign: 1 }
	}

	/// Create a link for a motor wired the other way round,
	/// all jogs are mirrored
	pub fn inverted(serial: SER) -> Self {
		Self { serial, sign: -1 }
	}

	/// Move by a signed number of steps, blocks until the driver
	/// acknowledged the finished move
	pub fn move_steps(&mut self, steps: i32) -> Result<(), Error> {
		debug!("moving {} steps", steps);
		for b in format!("{}\n", steps).bytes() {
			block!(self.serial.write(b)).map_err(|_| Error::SerialError)?;
		}
		block!(self.serial.flush()).map_err(|_| Error::SerialError)?;
		let reply = self.read_line()?;
		if reply != ACK {
			return Err(Error::UnexpectedReply);
		}
		Ok(())
	}

	pub fn jog(&mut self, jog: Jog) -> Result<(), Error> {
		self.move_steps(self.sign * jog.steps())
	}

	fn read_line(&mut self) -> Result<Vec<u8>, Error> {
		let mut line = vec![];
		loop {
			let b = block!(self.serial.read()).map_err(|_| Error::SerialError)?;
			match b {
				b'\n' => break,
				b'\r' => {}
				_ if line.len() == MAX_REPLY => return Err(Error::UnexpectedReply),
				_ => line.push(b),
			}
		}
		trace!("reply {:?}", String::from_utf8_lossy(&line));
		Ok(line)
	}

	pub fn release(self) -> SER {
		self.serial
	}
}
