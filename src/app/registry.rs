//! Colour identities and their fixed hardware masks.
//!
//! A label from the board description resolves to a [`Colour`] through a
//! lookup table; each colour owns one [`LedMask`] computed from its pin.

use core::fmt;

use crate::error::{Error, Result};
use crate::pins;

/// Logical LED channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    Red,
    Green,
    Blue,
}

impl Colour {
    pub const ALL: [Colour; 3] = [Colour::Red, Colour::Green, Colour::Blue];

    /// GPIO pin driving this channel.
    pub const fn pin(self) -> u32 {
        match self {
            Self::Red => pins::LED_RED_GPIO,
            Self::Green => pins::LED_GREEN_GPIO,
            Self::Blue => pins::LED_BLUE_GPIO,
        }
    }

    pub const fn mask(self) -> LedMask {
        LedMask::output(self.pin())
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        })
    }
}

/// Register bits belonging to one LED pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedMask {
    /// Single bit at the pin number, for GPSET0 / GPCLR0.
    pub pin_index_mask: u32,
    /// Output function code shifted into the pin's GPFSEL field.
    pub func_select_bits: u32,
    /// The pin's 3-bit GPFSEL field.
    pub func_select_mask: u32,
}

impl LedMask {
    /// Masks that configure `pin` (0–31) as a plain output.
    pub const fn output(pin: u32) -> Self {
        let shift = pins::fsel_shift(pin);
        Self {
            pin_index_mask: 1 << pin,
            func_select_bits: pins::FSEL_OUTPUT << shift,
            func_select_mask: pins::FSEL_FIELD_MASK << shift,
        }
    }

    /// Bitwise union of several masks.
    pub fn combined(masks: &[LedMask]) -> LedMask {
        masks.iter().fold(
            LedMask { pin_index_mask: 0, func_select_bits: 0, func_select_mask: 0 },
            |acc, m| LedMask {
                pin_index_mask: acc.pin_index_mask | m.pin_index_mask,
                func_select_bits: acc.func_select_bits | m.func_select_bits,
                func_select_mask: acc.func_select_mask | m.func_select_mask,
            },
        )
    }
}

/// Masks of every LED channel, in [`Colour::ALL`] order.
pub const ALL_LEDS: [LedMask; 3] = [Colour::Red.mask(), Colour::Green.mask(), Colour::Blue.mask()];

// class front-end uses the bare names, char-device front-end the `led` ones
const LABELS: &[(&str, Colour)] = &[
    ("red", Colour::Red),
    ("green", Colour::Green),
    ("blue", Colour::Blue),
    ("ledred", Colour::Red),
    ("ledgreen", Colour::Green),
    ("ledblue", Colour::Blue),
];

/// Resolve a node label to its colour.
pub fn resolve(label: &str) -> Result<Colour> {
    LABELS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|&(_, colour)| colour)
        .ok_or(Error::UnknownColorLabel)
}
