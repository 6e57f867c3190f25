//! Attach-time behaviour: function select, initial state, node binding.

use std::sync::Arc;

use super::mock_hw::{MockRegion, RegCall, VecSink};

use rgbled::Error;
use rgbled::adapters::chardev::LedCharDevice;
use rgbled::app::driver::{InitialLevels, LedDriver};
use rgbled::app::events::LedEvent;
use rgbled::app::registry::Colour;
use rgbled::config::{BoardConfig, LedNode};
use rgbled::pins;

const ALL_PINS: u32 = (1 << 27) | (1 << 22) | (1 << 26);
const LED_FIELDS: u32 = 0xE0_0000 | 0x1C0 | 0x1C_0000;
const LED_OUTPUTS: u32 = 0x20_0000 | 0x40 | 0x4_0000;

#[test]
fn configures_once_then_clears_every_led() {
    let region = MockRegion::with_fsel2(0x0000_0009);
    let mut sink = VecSink::default();
    let driver = LedDriver::attach(&region, &BoardConfig::char_device(), &mut sink).unwrap();

    assert_eq!(
        region.calls(),
        vec![
            RegCall::Read(pins::GPFSEL2),
            RegCall::Write(pins::GPFSEL2, 0x0000_0009 | LED_OUTPUTS),
            RegCall::Write(pins::GPCLR0, ALL_PINS),
            RegCall::Write(pins::GPCLR0, 1 << 27),
            RegCall::Write(pins::GPCLR0, 1 << 22),
            RegCall::Write(pins::GPCLR0, 1 << 26),
        ]
    );
    assert!(driver.leds().iter().all(|l| !l.endpoint().get()));
}

#[test]
fn foreign_function_bits_survive_attach() {
    let current = 0xFFFF_FFFF;
    let region = MockRegion::with_fsel2(current);
    LedDriver::attach(&region, &BoardConfig::default(), &mut VecSink::default()).unwrap();

    let fsel = region.word(pins::GPFSEL2);
    assert_eq!(fsel & !LED_FIELDS, current & !LED_FIELDS);
    assert_eq!(fsel & LED_FIELDS, LED_OUTPUTS);
}

#[test]
fn endpoints_share_one_bank() {
    let region = MockRegion::new();
    let driver = LedDriver::attach(&region, &BoardConfig::default(), &mut VecSink::default()).unwrap();

    let first = driver.leds()[0].endpoint().bank();
    for led in driver.leds() {
        assert!(Arc::ptr_eq(first, led.endpoint().bank()));
    }
    assert_eq!(driver.bank().output_pins(), ALL_PINS);
}

#[test]
fn boot_scenario_red_on_green_off() {
    let region = MockRegion::new();
    let driver = LedDriver::attach(&region, &BoardConfig::char_device(), &mut VecSink::default()).unwrap();
    let devices = LedCharDevice::register_all(&driver);
    let red = devices.iter().find(|d| d.name() == "ledred").unwrap();
    let green = devices.iter().find(|d| d.name() == "ledgreen").unwrap();
    region.reset_calls();

    red.open().write(b"on\n").unwrap();
    assert_eq!(region.calls(), vec![RegCall::Write(pins::GPSET0, 1 << 27)]);

    let mut buf = [0u8; 8];
    let n = red.open().read(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"on\n");

    let n = green.open().read(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"off\n");
}

#[test]
fn purple_node_is_skipped_siblings_bind() {
    let region = MockRegion::new();
    let mut config = BoardConfig::default();
    config.leds = vec![LedNode::new("red"), LedNode::new("purple"), LedNode::new("blue")];
    let mut sink = VecSink::default();

    let driver = LedDriver::attach(&region, &config, &mut sink).unwrap();

    assert_eq!(driver.leds().len(), 2);
    assert!(driver.by_colour(Colour::Red).is_some());
    assert!(driver.by_colour(Colour::Blue).is_some());
    assert!(driver.by_colour(Colour::Green).is_none());
    assert_eq!(driver.rejected()[0].label, "purple");
    assert_eq!(driver.rejected()[0].error, Error::UnknownColorLabel);

    // configuration still covers all three pins
    assert_eq!(region.word(pins::GPFSEL2) & LED_FIELDS, LED_OUTPUTS);
    assert!(sink.events.contains(&LedEvent::NodeRejected { label: "purple".into() }));
    assert_eq!(sink.events.last(), Some(&LedEvent::Attached { bound: 2 }));
}

#[test]
fn second_node_for_same_pin_is_skipped() {
    let region = MockRegion::new();
    let mut config = BoardConfig::char_device();
    config.leds.push(LedNode::new("red"));
    let mut sink = VecSink::default();

    let driver = LedDriver::attach(&region, &config, &mut sink).unwrap();
    assert_eq!(driver.leds().len(), 3);
    assert!(driver.led("red").is_none());
    assert_eq!(driver.rejected()[0].label, "red");
    assert_eq!(driver.rejected()[0].error, Error::Config("duplicate colour"));
    assert!(sink.events.contains(&LedEvent::NodeRejected { label: "red".into() }));

    // the one red endpoint reports what was written
    let devices = LedCharDevice::register_all(&driver);
    let red = devices.iter().find(|d| d.name() == "ledred").unwrap();
    red.open().write(b"on\n").unwrap();
    assert!(driver.by_colour(Colour::Red).unwrap().endpoint().get());
}

#[test]
fn keep_levels_attach_adopts_lit_pins() {
    let region = MockRegion::with_fsel2(LED_OUTPUTS);
    region.preset(pins::GPLEV0, (1 << 22) | (1 << 4));

    let driver = LedDriver::attach_with(
        &region,
        &BoardConfig::char_device(),
        InitialLevels::Keep,
        &mut VecSink::default(),
    )
    .unwrap();

    assert_eq!(
        region.calls(),
        vec![
            RegCall::Read(pins::GPFSEL2),
            RegCall::Write(pins::GPFSEL2, LED_OUTPUTS),
            RegCall::Read(pins::GPLEV0),
            RegCall::Read(pins::GPLEV0),
            RegCall::Read(pins::GPLEV0),
        ]
    );
    assert!(driver.led("ledgreen").unwrap().endpoint().get());
    assert!(!driver.led("ledred").unwrap().endpoint().get());

    let devices = LedCharDevice::register_all(&driver);
    let mut buf = [0u8; 4];
    let n = devices[1].open().read(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"on\n");
}

#[test]
fn board_region_fields_do_not_gate_attach() {
    let region = MockRegion::new();
    let mut config = BoardConfig::default();
    config.region.len = 4;
    assert!(LedDriver::attach(&region, &config, &mut VecSink::default()).is_ok());
}

#[test]
fn event_order() {
    let region = MockRegion::new();
    let mut sink = VecSink::default();
    let driver = LedDriver::attach(&region, &BoardConfig::default(), &mut sink).unwrap();
    driver.detach(&mut sink);

    assert!(matches!(sink.events[0], LedEvent::Configured(_)));
    assert_eq!(
        sink.events[1],
        LedEvent::NodeBound { label: "red".into(), colour: Colour::Red }
    );
    assert_eq!(sink.events[4], LedEvent::Attached { bound: 3 });
    assert_eq!(sink.events[5], LedEvent::Detached);
}

#[test]
fn invalid_board_fails_before_touching_registers() {
    let region = MockRegion::new();
    let mut config = BoardConfig::default();
    config.leds.clear();

    let err = LedDriver::attach(&region, &config, &mut VecSink::default()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(region.calls().is_empty());
}
