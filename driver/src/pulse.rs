//! Square wave generation on the step line

use crate::Error;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use embedded_time::duration::*;
use log::debug;
use stepper_core::drive::Command;

/// Drives the direction and step lines of a stepper driver
///
/// A pulse train is emitted in one go: once [`PulseEmitter::emit`] is
/// called, it only returns after the last pulse (or on a pin error).
pub struct PulseEmitter<DIR, STEP, US> {
	pin_dir: DIR,
	pin_step: STEP,
	delay: US,
	interval: Microseconds<u32>,
}

impl<DIR, STEP, US> PulseEmitter<DIR, STEP, US>
where
	DIR: OutputPin,
	STEP: OutputPin,
	US: DelayNs,
{
	/// Create an emitter, both lines are driven low
	///
	/// * `interval` - time the step line stays in each level,
	///                a full pulse takes twice as long
	pub fn new(
		mut pin_dir: DIR,
		mut pin_step: STEP,
		delay: US,
		interval: Microseconds<u32>,
	) -> Result<Self, Error> {
		pin_step.set_low().map_err(|_| Error::IOError)?;
		pin_dir.set_low().map_err(|_| Error::IOError)?;
		Ok(Self {
			pin_dir,
			pin_step,
			delay,
			interval,
		})
	}

	/// Time a train of `steps` pulses blocks the caller
	pub fn train_duration(&self, steps: u32) -> Microseconds<u64> {
		Microseconds(2 * u64::from(steps) * u64::from(self.interval.0))
	}

	fn pulse(&mut self) -> Result<(), Error> {
		self.delay.delay_us(self.interval.0);
		self.pin_step.set_high().map_err(|_| Error::IOError)?;
		self.delay.delay_us(self.interval.0);
		self.pin_step.set_low().map_err(|_| Error::IOError)?;
		Ok(())
	}

	pub fn emit(&mut self, cmd: &Command) -> Result<(), Error> {
		debug!(
			"emitting {} pulses {:?} ({} us)",
			cmd.steps,
			cmd.direction,
			self.train_duration(cmd.steps).0
		);
		self.pin_dir
			.set_state(PinState::from(cmd.direction.is_high()))
			.map_err(|_| Error::IOError)?;
		for _ in 0..cmd.steps {
			self.pulse()?;
		}
		debug!("pulse train finished");
		Ok(())
	}

	pub fn release(self) -> (DIR, STEP, US) {
		(self.pin_dir, self.pin_step, self.delay)
	}
}
