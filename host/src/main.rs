use linux_embedded_hal::Serial;
use log::trace;
use std::io::{stdout, Read, Write};
use std::thread::sleep;
use std::time::Duration;
use stepper_core::key::Key;
use stepper_host::{Jog, Link};
use termion::async_stdin;
use termion::raw::IntoRawMode;

const BAUD_RATE: u32 = 9600;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let tty = args.next().unwrap_or_else(|| "/dev/ttyACM0".to_string());
    let inverted = args.next().as_deref() == Some("--inverted");

    let serial = Serial::open(tty, BAUD_RATE).unwrap();
    let mut link = if inverted {
        Link::inverted(serial)
    } else {
        Link::new(serial)
    };

    let mut stdout = stdout().into_raw_mode().unwrap();
    let mut stdin = async_stdin().bytes();

    write!(
        stdout,
        "{}{}j/k: 1/100\", J/K: 1/10\", U/I: 1\", q: quit",
        termion::clear::All,
        termion::cursor::Goto(1, 1)
    )
    .unwrap();
    stdout.flush().unwrap();

    loop {
        let b = stdin.next();
        trace!("{:?}", b);
        let b = match b {
            Some(b) => b.unwrap(),
            None => {
                sleep(Duration::from_millis(10));
                continue;
            }
        };
        if b == b'q' {
            break;
        }
        if let Some(jog) = Key::from_byte(b).map(Jog::from) {
            link.jog(jog).unwrap();
            write!(
                stdout,
                "{}{}{:?} ({} steps)",
                termion::cursor::Goto(1, 2),
                termion::clear::CurrentLine,
                jog,
                jog.steps()
            )
            .unwrap();
            stdout.flush().unwrap();
        }
    }
}
