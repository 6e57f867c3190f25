//! One controllable LED channel.
//!
//! The GPIO block has no output-level read-back in this design, so the
//! endpoint caches the last commanded value: [`LedEndpoint::get`] reports
//! what was asked for, not a sampled pin level.

use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use log::debug;

use super::fsel::OutputBank;
use super::ports::RegisterRegion;
use super::registry::{Colour, LedMask};

pub struct LedEndpoint<R> {
    colour: Colour,
    mask: LedMask,
    bank: Arc<OutputBank<R>>,
    state: AtomicBool,
}

impl<R: RegisterRegion> LedEndpoint<R> {
    /// Bind `colour` to a configured bank and switch it off, whatever level
    /// the pin was left at by an earlier boot stage.
    pub fn new(colour: Colour, bank: Arc<OutputBank<R>>) -> Self {
        let led = Self {
            colour,
            mask: colour.mask(),
            bank,
            state: AtomicBool::new(false),
        };
        led.set(false);
        led
    }

    /// Bind `colour` without driving the pin; the cached state starts at the
    /// level the pin has now.
    pub fn adopt(colour: Colour, bank: Arc<OutputBank<R>>) -> Self {
        let mask = colour.mask();
        let on = bank.levels() & mask.pin_index_mask != 0;
        debug!("led {}: adopted {}", colour, if on { "on" } else { "off" });
        Self { colour, mask, bank, state: AtomicBool::new(on) }
    }

    /// Drive the pin high (`true`) or low (`false`).
    pub fn set(&self, on: bool) {
        if on {
            self.bank.set_pins(self.mask.pin_index_mask);
        } else {
            self.bank.clear_pins(self.mask.pin_index_mask);
        }
        self.state.store(on, Ordering::Release);
        debug!("led {}: {}", self.colour, if on { "on" } else { "off" });
    }

    /// Last commanded level.
    pub fn get(&self) -> bool {
        self.state.load(Ordering::Acquire)
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn mask(&self) -> LedMask {
        self.mask
    }

    pub fn bank(&self) -> &Arc<OutputBank<R>> {
        &self.bank
    }
}

impl<R> core::fmt::Debug for LedEndpoint<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LedEndpoint")
            .field("colour", &self.colour)
            .field("state", &self.state.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

// ── embedded-hal ──────────────────────────────────────────────
//
// A shared reference is enough to drive the pin, so `&LedEndpoint` is the
// OutputPin; several holders can drive the same channel.

impl<R> ErrorType for &LedEndpoint<R> {
    type Error = Infallible;
}

impl<R: RegisterRegion> OutputPin for &LedEndpoint<R> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.set(true);
        Ok(())
    }
}

impl<R: RegisterRegion> StatefulOutputPin for &LedEndpoint<R> {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.get())
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.get())
    }
}
