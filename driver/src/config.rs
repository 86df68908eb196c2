//! Board wiring and timing defaults

use crate::pulse::PulseEmitter;
use crate::source::keys::KeyProtocol;
use crate::source::line::LineProtocol;
use crate::source::schedule::Schedule;
use crate::Error;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_time::duration::*;

pub const DIRECTION_PIN: u32 = 12;
pub const STEP_PIN: u32 = 13;
pub const BAUD_RATE: u32 = 9600;
/// bytes a protocol line may hold, the newline is not stored
pub const LINE_CAPACITY: usize = 10;
pub const STEP_INTERVAL: Microseconds<u32> = Microseconds(1_000);
pub const SCHEDULE_STEPS: u32 = 1_000;
pub const SCHEDULE_PAUSE: Microseconds<u32> = Microseconds(1_000_000);
pub const BEACON_PERIOD: Microseconds<u32> = Microseconds(500_000);

/// Wiring and timing of a single stepper setup
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
	pub direction_pin: u32,
	pub step_pin: u32,
	pub baud_rate: u32,
	/// half period of a step pulse
	pub step_interval: Microseconds<u32>,
	pub schedule_steps: u32,
	pub schedule_pause: Microseconds<u32>,
	pub beacon_period: Microseconds<u32>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			direction_pin: DIRECTION_PIN,
			step_pin: STEP_PIN,
			baud_rate: BAUD_RATE,
			step_interval: STEP_INTERVAL,
			schedule_steps: SCHEDULE_STEPS,
			schedule_pause: SCHEDULE_PAUSE,
			beacon_period: BEACON_PERIOD,
		}
	}
}

impl Config {
	pub fn emitter<DIR, STEP, US>(
		&self,
		pin_dir: DIR,
		pin_step: STEP,
		delay: US,
	) -> Result<PulseEmitter<DIR, STEP, US>, Error>
	where
		DIR: OutputPin,
		STEP: OutputPin,
		US: DelayNs,
	{
		PulseEmitter::new(pin_dir, pin_step, delay, self.step_interval)
	}

	pub fn schedule<US: DelayNs>(&self, delay: US) -> Schedule<US> {
		Schedule::new(delay, self.schedule_steps, self.schedule_pause)
	}

	pub fn line_protocol<SER>(&self, serial: SER) -> LineProtocol<SER, LINE_CAPACITY> {
		LineProtocol::new(serial)
	}

	pub fn key_protocol<SER, US>(&self, serial: SER, delay: US) -> KeyProtocol<SER, US> {
		KeyProtocol::new(serial, delay, self.beacon_period)
	}
}
