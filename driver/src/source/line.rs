//! Newline terminated decimal step counts
//!
//! Each line holds a signed decimal number, e.g. `-720\n`. The sign selects
//! the direction, the magnitude the number of steps. Text that isn't a
//! number moves nothing. Every line is answered with `OK` once its pulse
//! train finished.

use crate::serial::{read_byte, write_line};
use crate::source::CommandSource;
use crate::Error;
use embedded_hal_nb::serial::{Read, Write};
use heapless::Vec;
use log::{debug, warn};
use stepper_core::drive::Command;

const ACK: &[u8] = b"OK";

/// Line based command source holding at most `N` bytes per line
pub struct LineProtocol<SER, const N: usize = 10> {
	serial: SER,
	buf: Vec<u8, N>,
	overflowed: bool,
}

impl<SER, const N: usize> LineProtocol<SER, N> {
	pub fn new(serial: SER) -> Self {
		Self {
			serial,
			buf: Vec::new(),
			overflowed: false,
		}
	}

	pub fn release(self) -> SER {
		self.serial
	}
}

impl<SER, const N: usize> CommandSource for LineProtocol<SER, N>
where
	SER: Read<u8> + Write<u8>,
{
	fn poll(&mut self) -> nb::Result<Command, Error> {
		let byte = read_byte(&mut self.serial)?;
		if byte == b'\n' {
			// an overflowed line counts as malformed
			let steps = if self.overflowed {
				0
			} else {
				parse_steps(&self.buf)
			};
			self.buf.clear();
			self.overflowed = false;
			let cmd = Command::from_signed(steps);
			debug!("line command {:?}", cmd);
			return Ok(cmd);
		}
		if self.overflowed {
			return Err(nb::Error::WouldBlock);
		}
		if self.buf.push(byte).is_err() {
			warn!("line longer than {} bytes, discarding until newline", N);
			self.buf.clear();
			self.overflowed = true;
			return Err(nb::Error::Other(Error::BufferOverflow));
		}
		Err(nb::Error::WouldBlock)
	}

	fn complete(&mut self, _command: &Command) -> Result<(), Error> {
		write_line(&mut self.serial, ACK)
	}
}

#[inline]
fn is_space(byte: u8) -> bool {
	matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Parse a decimal integer the way C's `atoi` reads it
///
/// Leading whitespace is skipped, an optional sign is honored and digits
/// are read up to the first non-digit. Without digits the result is zero.
/// Values outside of `i32` saturate.
pub fn parse_steps(text: &[u8]) -> i32 {
	let mut bytes = text.iter().copied().skip_while(|b| is_space(*b)).peekable();
	let negative = match bytes.peek() {
		Some(b'-') => {
			bytes.next();
			true
		}
		Some(b'+') => {
			bytes.next();
			false
		}
		_ => false,
	};
	let limit = i64::from(i32::MAX) + 1;
	let mut value: i64 = 0;
	for b in bytes.take_while(u8::is_ascii_digit) {
		value = (value * 10 + i64::from(b - b'0')).min(limit);
	}
	if negative {
		value = -value;
	}
	value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
