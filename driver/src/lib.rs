#![cfg_attr(not(feature = "std"), no_std)]

//! A polling driver for a two-wire (step/direction) stepper motor
//!
//! Commands come from a [`source::CommandSource`] and are turned into pulse
//! trains by a [`pulse::PulseEmitter`]. The [`Driver`] ties both together
//! and is meant to be polled from the main loop:
//!
//! ```ignore
//! loop {
//!     match nb::block!(driver.poll()) {
//!         Ok(cmd) => log::debug!("done {:?}", cmd),
//!         Err(e) => log::warn!("{:?}", e),
//!     }
//! }
//! ```

pub mod config;
pub mod pulse;
mod serial;
pub mod source;

#[cfg(test)]
pub mod tests_mock;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::trace;
use pulse::PulseEmitter;
use source::CommandSource;
use stepper_core::drive::Command;

/// Errors returned from the driver loop
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
	/// a direction or step line could not be set
	IOError,
	/// reading from or writing to the serial port failed
	SerialError,
	/// an input line didn't fit the line buffer, the line is dropped
	BufferOverflow,
}

pub struct Driver<SRC, DIR, STEP, US> {
	source: SRC,
	emitter: PulseEmitter<DIR, STEP, US>,
	pending: Option<Command>,
}

impl<SRC, DIR, STEP, US> Driver<SRC, DIR, STEP, US>
where
	SRC: CommandSource,
	DIR: OutputPin,
	STEP: OutputPin,
	US: DelayNs,
{
	pub fn new(source: SRC, emitter: PulseEmitter<DIR, STEP, US>) -> Self {
		Self {
			source,
			emitter,
			pending: None,
		}
	}

	/// Command that will be emitted on the next poll
	pub fn pending(&self) -> Option<&Command> {
		self.pending.as_ref()
	}

	/// Run one iteration of the driver loop
	///
	/// A command obtained from the source is kept and executed on the
	/// following poll, which blocks until its pulse train is done and
	/// returns the command.
	pub fn poll(&mut self) -> nb::Result<Command, Error> {
		if let Some(cmd) = self.pending.take() {
			self.emitter.emit(&cmd)?;
			self.source.complete(&cmd)?;
			return Ok(cmd);
		}
		let cmd = self.source.poll()?;
		trace!("queued {:?}", cmd);
		self.pending = Some(cmd);
		Err(nb::Error::WouldBlock)
	}

	pub fn release(self) -> (SRC, PulseEmitter<DIR, STEP, US>) {
		(self.source, self.emitter)
	}
}
