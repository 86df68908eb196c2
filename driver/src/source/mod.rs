//! Where motion commands come from

use crate::Error;
use stepper_core::drive::Command;

pub mod keys;
pub mod line;
pub mod schedule;

/// A strategy producing motion commands for the driver loop
pub trait CommandSource {
	/// Poll for the next command
	///
	/// Returns `WouldBlock` while no complete command is available yet.
	fn poll(&mut self) -> nb::Result<Command, Error>;

	/// Called by the driver once the pulse train of `command` finished
	fn complete(&mut self, command: &Command) -> Result<(), Error>;
}
