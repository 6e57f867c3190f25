//! Function-select configuration and the configured output bank.
//!
//! GPFSEL2 is shared with pins that belong to unrelated functions, so the
//! LED fields are merged into whatever value the register holds right now.
//! [`OutputBank::configure`] is the only way to obtain a bank, and LED
//! endpoints can only be built from a bank, so configuration always happens
//! before the first set/clear.

use log::info;

use super::ports::RegisterRegion;
use super::registry::LedMask;
use crate::pins;

/// New GPFSEL value with every target field set to its function code and
/// every other bit of `current` left as is.
pub fn compute_function_select(current: u32, targets: &[LedMask]) -> u32 {
    let all = LedMask::combined(targets);
    (current & !all.func_select_mask) | (all.func_select_bits & all.func_select_mask)
}

/// GPFSEL2 before and after configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FselChange {
    pub before: u32,
    pub after: u32,
}

/// A register region whose LED pins have been switched to outputs and
/// driven low. Shared by every endpoint of one driver instance.
#[derive(Debug)]
pub struct OutputBank<R> {
    region: R,
    pins: u32,
    fsel: FselChange,
}

impl<R: RegisterRegion> OutputBank<R> {
    /// Turn `targets` into outputs and clear them.
    ///
    /// Reads GPFSEL2 immediately before computing; other subsystems may
    /// already own neighbouring fields. Not reentrant: two concurrent
    /// configurations of the same controller need an external lock.
    pub fn configure(region: R, targets: &[LedMask]) -> Self {
        let bank = Self::select_outputs(region, targets);
        bank.region.write32(pins::GPCLR0, bank.pins);
        info!("fsel: outputs {:#010x} cleared", bank.pins);
        bank
    }

    /// Like [`configure`](Self::configure) but leaves the output levels
    /// alone, for attaching to pins an earlier run already drives. Pins that
    /// were outputs keep their level through the GPFSEL2 write.
    pub fn configure_keeping_levels(region: R, targets: &[LedMask]) -> Self {
        Self::select_outputs(region, targets)
    }

    fn select_outputs(region: R, targets: &[LedMask]) -> Self {
        let before = region.read32(pins::GPFSEL2);
        let after = compute_function_select(before, targets);
        region.write32(pins::GPFSEL2, after);

        let outputs = LedMask::combined(targets).pin_index_mask;
        info!("fsel: GPFSEL2 {:#010x} -> {:#010x}", before, after);

        Self { region, pins: outputs, fsel: FselChange { before, after } }
    }

    /// Drive the pins in `mask` high.
    pub fn set_pins(&self, mask: u32) {
        self.region.write32(pins::GPSET0, mask);
    }

    /// Drive the pins in `mask` low.
    pub fn clear_pins(&self, mask: u32) {
        self.region.write32(pins::GPCLR0, mask);
    }

    /// Current level of every pin, from GPLEV0.
    pub fn levels(&self) -> u32 {
        self.region.read32(pins::GPLEV0)
    }

    /// All pins configured as outputs by this bank.
    pub fn output_pins(&self) -> u32 {
        self.pins
    }

    pub fn fsel_change(&self) -> FselChange {
        self.fsel
    }

    pub fn region(&self) -> &R {
        &self.region
    }
}
