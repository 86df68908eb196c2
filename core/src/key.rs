use crate::drive::Command;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Single character commands understood by the key-table protocol
#[derive(Clone, Debug, PartialEq, Eq, Copy, FromPrimitive)]
#[repr(u8)]
pub enum Key {
	SmallForward = 0x6a, // j
	SmallReverse = 0x6b, // k
	MediumForward = 0x4a, // J
	MediumReverse = 0x4b, // K
	LargeForward = 0x55, // U
	LargeReverse = 0x49, // I
}

impl Key {
	#[inline]
	pub fn from_byte(byte: u8) -> Option<Key> {
		Key::from_u8(byte)
	}

	#[inline]
	pub fn to_byte(&self) -> u8 {
		*self as u8
	}

	pub fn command(&self) -> Command {
		use Key::*;
		match self {
			SmallForward => Command::forward(90),
			SmallReverse => Command::reverse(90),
			MediumForward => Command::forward(900),
			MediumReverse => Command::reverse(900),
			LargeForward => Command::forward(9000),
			LargeReverse => Command::reverse(9000),
		}
	}
}

impl Command {
	/// Look up a received byte in the key table, unknown bytes don't move
	#[inline]
	pub fn from_key_byte(byte: u8) -> Command {
		Key::from_byte(byte)
			.map(|k| k.command())
			.unwrap_or_else(Command::idle)
	}
}
