//! Text front-end against the mock register block.

use std::io::{Read, Write};

use super::mock_hw::{MockRegion, RegCall, VecSink};

use rgbled::Error;
use rgbled::adapters::chardev::LedCharDevice;
use rgbled::app::driver::LedDriver;
use rgbled::config::BoardConfig;
use rgbled::pins;

fn attach(region: &MockRegion) -> LedDriver<&MockRegion> {
    let driver = LedDriver::attach(region, &BoardConfig::char_device(), &mut VecSink::default())
        .unwrap();
    region.reset_calls();
    driver
}

#[test]
fn devices_follow_node_labels() {
    let region = MockRegion::new();
    let driver = attach(&region);
    let names: Vec<_> = LedCharDevice::register_all(&driver).iter().map(|d| d.name()).collect();
    assert_eq!(names, ["ledred", "ledgreen", "ledblue"]);
}

#[test]
fn each_write_touches_only_its_pin() {
    let region = MockRegion::new();
    let driver = attach(&region);
    let devices = LedCharDevice::register_all(&driver);

    for (dev, pin) in devices.iter().zip([27u32, 22, 26]) {
        region.reset_calls();
        dev.open().write(b"on\n").unwrap();
        dev.open().write(b"off\n").unwrap();
        assert_eq!(
            region.calls(),
            vec![RegCall::Write(pins::GPSET0, 1 << pin), RegCall::Write(pins::GPCLR0, 1 << pin)]
        );
    }
}

#[test]
fn state_reads_never_touch_registers() {
    let region = MockRegion::new();
    let driver = attach(&region);
    let devices = LedCharDevice::register_all(&driver);

    let mut text = String::new();
    devices[2].open().read_to_string(&mut text).unwrap();
    assert_eq!(text, "off\n");
    assert!(region.calls().is_empty());
}

#[test]
fn rejected_text_is_invalid_input() {
    let region = MockRegion::new();
    let driver = attach(&region);
    let devices = LedCharDevice::register_all(&driver);
    let mut file = devices[0].open();

    for bad in [&b"ON\n"[..], b"on", b"onn\n", b"1\n", b" on\n"] {
        assert_eq!(file.write(bad), Err(Error::InvalidCommand), "{bad:?}");
    }
    assert!(region.calls().is_empty());

    let err = devices[0].open().write_all(b"yes\n").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

#[test]
fn any_terminator_byte_is_accepted() {
    let region = MockRegion::new();
    let driver = attach(&region);
    let devices = LedCharDevice::register_all(&driver);

    devices[1].open().write(b"on\0").unwrap();
    assert!(driver.led("ledgreen").unwrap().endpoint().get());
    devices[1].open().write(b"off\r").unwrap();
    assert!(!driver.led("ledgreen").unwrap().endpoint().get());
}

#[test]
fn one_read_per_open_handle() {
    let region = MockRegion::new();
    let driver = attach(&region);
    let devices = LedCharDevice::register_all(&driver);

    let mut file = devices[0].open();
    let mut buf = [0u8; 16];
    assert_eq!(file.read(&mut buf), Ok(4));
    devices[0].open().write(b"on\n").unwrap();
    assert_eq!(file.read(&mut buf), Ok(0));

    let mut again = devices[0].open();
    assert_eq!(again.read(&mut buf), Ok(3));
    assert_eq!(&buf[..3], b"on\n");
}

#[test]
fn short_buffer_faults_without_consuming_read() {
    let region = MockRegion::new();
    let driver = attach(&region);
    let devices = LedCharDevice::register_all(&driver);
    let mut file = devices[0].open();

    let mut tiny = [0u8; 3];
    assert_eq!(file.read(&mut tiny), Err(Error::TransferFault));
    assert_eq!(file.position(), 0);

    let mut buf = [0u8; 8];
    assert_eq!(file.read(&mut buf), Ok(4));
    assert_eq!(file.position(), 1);
}

#[test]
fn io_read_hands_out_state_in_pieces() {
    let region = MockRegion::new();
    let driver = attach(&region);
    let devices = LedCharDevice::register_all(&driver);
    devices[2].open().write(b"on\n").unwrap();

    let mut file = devices[2].open();
    let mut two = [0u8; 2];
    file.read_exact(&mut two).unwrap();
    assert_eq!(&two, b"on");
    let mut rest = Vec::new();
    file.read_to_end(&mut rest).unwrap();
    assert_eq!(rest, b"\n");
}

#[test]
fn level_survives_detach() {
    let region = MockRegion::new();
    let mut sink = VecSink::default();
    let driver = LedDriver::attach(&region, &BoardConfig::char_device(), &mut sink).unwrap();
    {
        let devices = LedCharDevice::register_all(&driver);
        devices[0].open().write(b"on\n").unwrap();
    }
    region.reset_calls();

    driver.detach(&mut sink);
    assert!(region.calls().is_empty());
}
