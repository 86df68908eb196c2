use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use linux_embedded_hal::{
    gpio_cdev::{Chip, LineRequestFlags},
    CdevPin, Delay, Serial,
};
use log::{info, warn};
use nb::block;
use std::process::exit;
use stepper_driver::config::Config;
use stepper_driver::source::CommandSource;
use stepper_driver::{Driver, Error};

const USAGE: &str = "usage: linux-stepper [reciprocate|line|keys] [gpiochip] [tty]";

fn output_pin(chip: &mut Chip, offset: u32, consumer: &str) -> CdevPin {
    let handle = chip
        .get_line(offset)
        .unwrap()
        .request(LineRequestFlags::OUTPUT, 0, consumer)
        .unwrap();
    CdevPin::new(handle).unwrap()
}

fn run<SRC, DIR, STEP, US>(mut driver: Driver<SRC, DIR, STEP, US>) -> !
where
    SRC: CommandSource,
    DIR: OutputPin,
    STEP: OutputPin,
    US: DelayNs,
{
    loop {
        match block!(driver.poll()) {
            Ok(cmd) => info!("moved {} steps {:?}", cmd.steps, cmd.direction),
            Err(Error::BufferOverflow) => warn!("input line too long, dropped"),
            Err(e) => panic!("driver failed: {:?}", e),
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let variant = args.next().unwrap_or_else(|| "line".to_string());
    let chip_path = args.next().unwrap_or_else(|| "/dev/gpiochip0".to_string());
    let tty = args.next().unwrap_or_else(|| "/dev/ttyS0".to_string());

    let config = Config::default();
    let mut chip = Chip::new(&chip_path).unwrap();
    let pin_dir = output_pin(&mut chip, config.direction_pin, "stepper-direction");
    let pin_step = output_pin(&mut chip, config.step_pin, "stepper-step");
    let emitter = config.emitter(pin_dir, pin_step, Delay).unwrap();
    info!("driving stepper on {} ({})", chip_path, variant);

    match variant.as_str() {
        "reciprocate" => run(Driver::new(config.schedule(Delay), emitter)),
        "line" => {
            let serial = Serial::open(tty, config.baud_rate).unwrap();
            run(Driver::new(config.line_protocol(serial), emitter))
        }
        "keys" => {
            let serial = Serial::open(tty, config.baud_rate).unwrap();
            run(Driver::new(config.key_protocol(serial, Delay), emitter))
        }
        _ => {
            eprintln!("{}", USAGE);
            exit(2);
        }
    }
}
