//! rgbled — host command-line front-end.
//!
//! Maps the GPIO block (or a simulated one with `--sim`), attaches the LED
//! driver and drives one channel through the board's front-end. The attach
//! keeps the levels left by earlier runs, so showing a channel or setting
//! one leaves the others as they were.
//!
//! ```text
//! rgbled [--sim] [--config FILE] <label> [on|off]
//! rgbled [--sim] [--config FILE] blink <label> <millis>
//! ```
//!
//! `RUST_LOG=debug` shows every register write.

use std::io::{Read, Write};
use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, bail};
use log::info;

use rgbled::adapters::chardev::LedCharDevice;
use rgbled::adapters::classdev::{LED_FULL, LED_OFF, LedClassDevice};
use rgbled::adapters::log_sink::LogEventSink;
use rgbled::adapters::sim::SimRegion;
use rgbled::app::driver::{InitialLevels, LedDriver};
use rgbled::app::ports::RegisterRegion;
use rgbled::app::protocol;
use rgbled::config::{BoardConfig, FrontEnd};
use rgbled::triggers::Trigger;

const TICK: Duration = Duration::from_millis(10);

const USAGE: &str = "usage: rgbled [--sim] [--config FILE] <label> [on|off]\n       \
                     rgbled [--sim] [--config FILE] blink <label> <millis>";

enum Command {
    Show { label: String },
    Set { label: String, state: String },
    Blink { label: String, millis: u64 },
}

struct Cli {
    sim: bool,
    config: Option<String>,
    command: Command,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Cli> {
    let mut sim = false;
    let mut config = None;
    let mut rest = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sim" => sim = true,
            "--config" => config = Some(args.next().context("--config needs a file")?),
            "-h" | "--help" => bail!("{USAGE}"),
            _ => rest.push(arg),
        }
    }

    let command = match rest.as_slice() {
        [cmd, label, millis] if cmd == "blink" => Command::Blink {
            label: label.clone(),
            millis: millis.parse().context("blink duration must be milliseconds")?,
        },
        [label, state] => Command::Set { label: label.clone(), state: state.clone() },
        [label] => Command::Show { label: label.clone() },
        _ => bail!("{USAGE}"),
    };

    Ok(Cli { sim, config, command })
}

fn load_config(path: Option<&str>) -> Result<BoardConfig> {
    let Some(path) = path else {
        return Ok(BoardConfig::default());
    };
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    BoardConfig::from_json(&json).map_err(|e| anyhow!("{path}: {e}"))
}

/// Execute `command`; returns what to print.
fn run<R: RegisterRegion>(region: R, config: &BoardConfig, command: &Command) -> Result<String> {
    let mut sink = LogEventSink::new();
    let driver = LedDriver::attach_with(region, config, InitialLevels::Keep, &mut sink)?;

    let output = match command {
        Command::Show { label } | Command::Set { label, .. } => {
            let bound = driver.led(label).ok_or_else(|| anyhow!("no LED named '{label}'"))?;
            let state = match command {
                Command::Set { state, .. } => Some(format!("{state}\n")),
                _ => None,
            };

            let shown = match config.front_end {
                FrontEnd::CharDevice => {
                    let dev = LedCharDevice::new(bound.label(), bound.endpoint());
                    if let Some(state) = state {
                        dev.open().write_all(state.as_bytes())?;
                    }
                    let mut shown = String::new();
                    dev.open().read_to_string(&mut shown)?;
                    shown
                }
                FrontEnd::Class => {
                    // plain device: the node's default trigger would fight the user
                    let mut dev = LedClassDevice::new(bound.label(), bound.endpoint());
                    if let Some(state) = state {
                        let on = protocol::parse_command(state.as_bytes())?.level();
                        dev.set_brightness(if on { LED_FULL } else { LED_OFF });
                    }
                    format!("{}\n", dev.brightness())
                }
            };
            format!("{label}: {shown}")
        }
        Command::Blink { label, millis } => {
            let bound = driver.led(label).ok_or_else(|| anyhow!("no LED named '{label}'"))?;
            let mut dev = LedClassDevice::register(bound);
            dev.set_trigger(Trigger::Heartbeat);

            let start = Instant::now();
            let mut last = start;
            while start.elapsed() < Duration::from_millis(*millis) {
                sleep(TICK);
                let now = Instant::now();
                dev.tick(u32::try_from((now - last).as_millis()).unwrap_or(u32::MAX));
                last = now;
            }
            dev.set_brightness(LED_OFF);
            String::new()
        }
    };

    driver.detach(&mut sink);
    Ok(output)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = parse_args(std::env::args().skip(1))?;
    let config = load_config(cli.config.as_deref())?;

    info!("rgbled v{}", env!("CARGO_PKG_VERSION"));

    if cli.sim {
        let region = SimRegion::new();
        print!("{}", run(&region, &config, &cli.command)?);
        for (offset, value) in region.writes() {
            info!("sim write {:#04x} <- {:#010x}", offset, value);
        }
        return Ok(());
    }

    run_hardware(&config, &cli.command)
}

#[cfg(target_os = "linux")]
fn run_hardware(config: &BoardConfig, command: &Command) -> Result<()> {
    let region = rgbled::adapters::mmio::DevMemRegion::open(
        &config.region.device,
        config.region.base,
        config.region.len,
    )
    .with_context(|| format!("mapping {}", config.region.device))?;
    print!("{}", run(region, config, command)?);
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run_hardware(_config: &BoardConfig, _command: &Command) -> Result<()> {
    bail!("hardware access needs Linux; use --sim")
}
