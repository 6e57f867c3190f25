//! Character-device front-end: one text endpoint per LED.
//!
//! Writing `on\n` or `off\n` switches the LED. Reading returns the current
//! state once per open handle and then reports end of stream; reopen to see
//! a fresh value.
//!
//! ```text
//!  open() ──▶ LedFile ──write("on\n")──▶ parse_command ──▶ LedEndpoint::set
//!                      ──read()───────▶ render(get()) once, then 0
//! ```

use std::io;

use log::{debug, warn};

use crate::app::driver::LedDriver;
use crate::app::endpoint::LedEndpoint;
use crate::app::ports::RegisterRegion;
use crate::app::protocol::{self, TextCommand};
use crate::error::{Error, Result};

/// Text endpoint bound to one LED.
pub struct LedCharDevice<'a, R> {
    name: &'a str,
    led: &'a LedEndpoint<R>,
}

impl<'a, R: RegisterRegion> LedCharDevice<'a, R> {
    pub fn new(name: &'a str, led: &'a LedEndpoint<R>) -> Self {
        Self { name, led }
    }

    /// One device per bound LED, named after its label.
    pub fn register_all(driver: &'a LedDriver<R>) -> Vec<Self> {
        driver
            .leds()
            .iter()
            .map(|l| Self::new(l.label(), l.endpoint()))
            .collect()
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn open(&self) -> LedFile<'a, R> {
        LedFile { name: self.name, led: self.led, pos: 0, pending: &[] }
    }
}

/// An open handle on a [`LedCharDevice`].
pub struct LedFile<'a, R> {
    name: &'a str,
    led: &'a LedEndpoint<R>,
    pos: u64,
    /// Rendered bytes not yet handed out through `io::Read`.
    pending: &'static [u8],
}

impl<R: RegisterRegion> LedFile<'_, R> {
    /// Copy the rendered state into `buf` on the first call; 0 afterwards.
    ///
    /// A buffer too small for the whole rendering is a `TransferFault` and
    /// does not consume the single read.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.pos != 0 {
            return Ok(0);
        }
        let rendered = protocol::render(self.led.get());
        let Some(dst) = buf.get_mut(..rendered.len()) else {
            warn!("{}: read buffer of {} bytes too small", self.name, buf.len());
            return Err(Error::TransferFault);
        };
        dst.copy_from_slice(rendered);
        self.pos += 1;
        Ok(rendered.len())
    }

    /// Apply one `on`/`off` command. Returns the number of bytes consumed.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        let command = protocol::parse_command(bytes).inspect_err(|_| {
            warn!("{}: bad value {:?}", self.name, String::from_utf8_lossy(bytes));
        })?;
        self.led.set(command == TextCommand::On);
        debug!("{}: {:?}", self.name, command);
        Ok(bytes.len())
    }

    /// Number of completed reads on this handle (0 or 1).
    pub fn position(&self) -> u64 {
        self.pos
    }
}

/// Byte-stream view of the single-shot read. The state is rendered on the
/// first call and handed out across as many calls as the caller's buffers
/// need, so small buffers (`read_exact` a byte at a time, a tiny
/// `BufReader`) get a partial read instead of `TransferFault`.
impl<R: RegisterRegion> io::Read for LedFile<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == 0 {
            self.pending = protocol::render(self.led.get());
            self.pos += 1;
        }
        let n = self.pending.len().min(buf.len());
        let (head, rest) = self.pending.split_at(n);
        buf[..n].copy_from_slice(head);
        self.pending = rest;
        Ok(n)
    }
}

impl<R: RegisterRegion> io::Write for LedFile<'_, R> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        LedFile::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
