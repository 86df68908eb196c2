use crate::Error;
use embedded_hal_nb::serial::{Read, Write};
use log::trace;

/// line terminator of every acknowledgement sent to the host
const LINE_END: &[u8] = b"\r\n";

pub(crate) fn read_byte<SER: Read<u8>>(serial: &mut SER) -> nb::Result<u8, Error> {
	let byte = serial.read().map_err(|e| e.map(|_| Error::SerialError))?;
	trace!("received {:#04x}", byte);
	Ok(byte)
}

pub(crate) fn write_bytes<SER: Write<u8>>(serial: &mut SER, bytes: &[u8]) -> Result<(), Error> {
	for b in bytes {
		nb::block!(serial.write(*b)).map_err(|_| Error::SerialError)?;
	}
	nb::block!(serial.flush()).map_err(|_| Error::SerialError)
}

pub(crate) fn write_line<SER: Write<u8>>(serial: &mut SER, line: &[u8]) -> Result<(), Error> {
	trace!("sending line {:?}", core::str::from_utf8(line));
	for b in line.iter().chain(LINE_END) {
		nb::block!(serial.write(*b)).map_err(|_| Error::SerialError)?;
	}
	nb::block!(serial.flush()).map_err(|_| Error::SerialError)
}
