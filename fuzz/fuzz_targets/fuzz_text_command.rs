//! Fuzz target: character-device write path
//!
//! Pushes arbitrary bytes through `LedFile::write` on a simulated block.
//! A write must either switch the LED to exactly the parsed level with one
//! register write, or fail with `InvalidCommand` and touch nothing.
//!
//! cargo fuzz run fuzz_text_command

#![no_main]

use libfuzzer_sys::fuzz_target;
use rgbled::Error;
use rgbled::adapters::chardev::LedCharDevice;
use rgbled::adapters::sim::SimRegion;
use rgbled::app::driver::LedDriver;
use rgbled::app::events::LedEvent;
use rgbled::app::ports::EventSink;
use rgbled::app::protocol::parse_command;
use rgbled::config::BoardConfig;

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &LedEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let region = SimRegion::new();
    let Ok(driver) = LedDriver::attach(&region, &BoardConfig::char_device(), &mut NullSink) else {
        return;
    };
    let devices = LedCharDevice::register_all(&driver);
    region.clear_log();

    let before = driver.leds()[0].endpoint().get();
    match devices[0].open().write(data) {
        Ok(n) => {
            assert_eq!(n, data.len());
            let level = parse_command(data).map(|c| c.level());
            assert_eq!(Ok(driver.leds()[0].endpoint().get()), level);
            assert_eq!(region.writes().len(), 1);
        }
        Err(e) => {
            assert_eq!(e, Error::InvalidCommand);
            assert_eq!(driver.leds()[0].endpoint().get(), before);
            assert!(region.writes().is_empty());
        }
    }
});
