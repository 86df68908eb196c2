use embedded_hal::delay::DelayNs;
use embedded_hal_nb::serial::{ErrorKind, ErrorType, Read, Write};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// A serial port where tests push received bytes and inspect sent ones
#[derive(Clone, Default)]
pub struct FakeSerial {
	rx: Rc<RefCell<VecDeque<u8>>>,
	tx: Rc<RefCell<Vec<u8>>>,
	broken: Rc<Cell<bool>>,
}

impl FakeSerial {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn feed(&self, bytes: &[u8]) {
		self.rx.borrow_mut().extend(bytes);
	}

	pub fn pending(&self) -> usize {
		self.rx.borrow().len()
	}

	/// every following read and write fails
	pub fn disconnect(&self) {
		self.broken.set(true);
	}

	/// bytes written since the last call
	pub fn take_sent(&self) -> Vec<u8> {
		self.tx.borrow_mut().drain(..).collect()
	}
}

impl ErrorType for FakeSerial {
	type Error = ErrorKind;
}

impl Read<u8> for FakeSerial {
	fn read(&mut self) -> nb::Result<u8, Self::Error> {
		if self.broken.get() {
			return Err(nb::Error::Other(ErrorKind::Other));
		}
		self.rx.borrow_mut().pop_front().ok_or(nb::Error::WouldBlock)
	}
}

impl Write<u8> for FakeSerial {
	fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
		if self.broken.get() {
			return Err(nb::Error::Other(ErrorKind::Other));
		}
		self.tx.borrow_mut().push(word);
		Ok(())
	}

	fn flush(&mut self) -> nb::Result<(), Self::Error> {
		Ok(())
	}
}

/// A delay that returns at once and sums up the requested time
#[derive(Clone, Default)]
pub struct TraceDelay {
	ns: Rc<Cell<u64>>,
	calls: Rc<Cell<usize>>,
}

impl TraceDelay {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn elapsed_us(&self) -> u64 {
		self.ns.get() / 1_000
	}

	pub fn calls(&self) -> usize {
		self.calls.get()
	}

	fn record(&self, ns: u64) {
		self.ns.set(self.ns.get() + ns);
		self.calls.set(self.calls.get() + 1);
	}
}

impl DelayNs for TraceDelay {
	fn delay_ns(&mut self, ns: u32) {
		self.record(u64::from(ns));
	}

	fn delay_us(&mut self, us: u32) {
		self.record(u64::from(us) * 1_000);
	}

	fn delay_ms(&mut self, ms: u32) {
		self.record(u64::from(ms) * 1_000_000);
	}
}
