//! Single key commands after a handshake
//!
//! Until the host sends its first byte, a beacon line `A` is written
//! periodically. The first byte is answered with `OK` and opens the
//! session; from then on every byte is a key from the fixed table,
//! echoed on receipt and once more after its motion completed.

use crate::serial::{read_byte, write_bytes, write_line};
use crate::source::CommandSource;
use crate::Error;
use embedded_hal::delay::DelayNs;
use embedded_hal_nb::serial::{Read, Write};
use embedded_time::duration::*;
use log::{debug, trace};
use stepper_core::drive::Command;

const ACK: &[u8] = b"OK";
const BEACON: &[u8] = b"A";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Session {
	AwaitingHandshake,
	Ready,
}

/// Key table command source
pub struct KeyProtocol<SER, US> {
	serial: SER,
	delay: US,
	beacon: Microseconds<u32>,
	session: Session,
	last_key: Option<u8>,
}

impl<SER, US> KeyProtocol<SER, US> {
	/// * `beacon` - period of the `A` line while no host answered yet
	pub fn new(serial: SER, delay: US, beacon: Microseconds<u32>) -> Self {
		Self {
			serial,
			delay,
			beacon,
			session: Session::AwaitingHandshake,
			last_key: None,
		}
	}

	pub fn session(&self) -> Session {
		self.session
	}

	pub fn release(self) -> (SER, US) {
		(self.serial, self.delay)
	}
}

impl<SER, US> CommandSource for KeyProtocol<SER, US>
where
	SER: Read<u8> + Write<u8>,
	US: DelayNs,
{
	fn poll(&mut self) -> nb::Result<Command, Error> {
		match self.session {
			Session::AwaitingHandshake => match read_byte(&mut self.serial) {
				Ok(_) => {
					write_line(&mut self.serial, ACK)?;
					self.session = Session::Ready;
					debug!("handshake complete");
					Err(nb::Error::WouldBlock)
				}
				Err(nb::Error::WouldBlock) => {
					trace!("beacon");
					write_line(&mut self.serial, BEACON)?;
					self.delay.delay_us(self.beacon.0);
					Err(nb::Error::WouldBlock)
				}
				Err(e) => Err(e),
			},
			Session::Ready => {
				let key = read_byte(&mut self.serial)?;
				write_bytes(&mut self.serial, &[key])?;
				self.last_key = Some(key);
				let cmd = Command::from_key_byte(key);
				debug!("key {:?} as {:?}", key as char, cmd);
				Ok(cmd)
			}
		}
	}

	fn complete(&mut self, _command: &Command) -> Result<(), Error> {
		match self.last_key.take() {
			Some(key) => write_bytes(&mut self.serial, &[key]),
			None => Ok(()),
		}
	}
}
