//! GPIO pin assignments and register layout for the RGB LED board.
//!
//! Single source of truth: the registry, the configurator and the endpoints
//! all reference this module rather than hard-coding pin numbers or offsets.
//!
//! Layout follows the BCM2835 ARM Peripherals datasheet, section 6.1.

// ---------------------------------------------------------------------------
// LED pins
// ---------------------------------------------------------------------------

pub const LED_RED_GPIO: u32 = 27;
pub const LED_GREEN_GPIO: u32 = 22;
pub const LED_BLUE_GPIO: u32 = 26;

// ---------------------------------------------------------------------------
// Controller address map (BCM2836/7, Raspberry Pi 2/3)
// ---------------------------------------------------------------------------

/// Peripheral base as seen by the ARM core.
pub const PERIPHERAL_BASE: u64 = 0x3F00_0000;
/// GPIO controller base: 0x3F20_0000.
pub const GPIO_BASE: u64 = PERIPHERAL_BASE + 0x20_0000;
/// Full size of the GPIO controller register block.
pub const GPIO_BLOCK_LEN: usize = 0xB4;

// ---------------------------------------------------------------------------
// Register offsets (relative to GPIO_BASE)
// ---------------------------------------------------------------------------

/// Function select for pins 20–29.
pub const GPFSEL2: usize = 0x08;
/// Output set for pins 0–31 (write-1-to-set).
pub const GPSET0: usize = 0x1C;
/// Output clear for pins 0–31 (write-1-to-clear).
pub const GPCLR0: usize = 0x28;
/// Pin level for pins 0–31 (read-only).
pub const GPLEV0: usize = 0x34;

/// Smallest region that still covers every register the driver touches.
pub const MIN_REGION_LEN: usize = GPCLR0 + 4;
/// Smallest region for an attach that adopts the current pin levels.
pub const LEVEL_REGION_LEN: usize = GPLEV0 + 4;

// ---------------------------------------------------------------------------
// Function-select encoding
// ---------------------------------------------------------------------------

/// Bits per pin in a GPFSELn register.
pub const FSEL_BITS_PER_PIN: u32 = 3;
/// Pins covered by one GPFSELn register.
pub const FSEL_PINS_PER_REG: u32 = 10;
/// 3-bit field mask before shifting.
pub const FSEL_FIELD_MASK: u32 = 0b111;
/// Function code for "output".
pub const FSEL_OUTPUT: u32 = 0b001;

/// Bit position of `pin`'s field inside its GPFSELn register.
pub const fn fsel_shift(pin: u32) -> u32 {
    (pin % FSEL_PINS_PER_REG) * FSEL_BITS_PER_PIN
}

/// Byte offset of the GPFSELn register holding `pin`'s field.
pub const fn fsel_offset(pin: u32) -> usize {
    (pin / FSEL_PINS_PER_REG) as usize * 4
}
