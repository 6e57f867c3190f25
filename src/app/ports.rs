//! Port traits — the boundary between the LED core and the outside world.
//!
//! ```text
//!   Front-end adapter ──▶ LedEndpoint ──▶ OutputBank ──▶ RegisterRegion port
//! ```
//!
//! Register backends (`/dev/gpiomem` mapping, raw MMIO, in-memory
//! simulation) implement [`RegisterRegion`]. Lifecycle events leave the core
//! through [`EventSink`]; adapters decide where they go.

// ───────────────────────────────────────────────────────────────
// Register region port (driven adapter: core → hardware)
// ───────────────────────────────────────────────────────────────

/// A mapped block of 32-bit device registers.
///
/// Every call is exactly one access to device memory, issued in program
/// order: writes are side effects and are never merged or elided. No
/// locking is provided; read-modify-write sequences are the caller's to
/// serialise.
///
/// `offset` is a byte offset from the start of the block. It must be 4-byte
/// aligned and leave room for a full word; implementations panic otherwise.
pub trait RegisterRegion {
    /// Length of the mapped block in bytes.
    fn len(&self) -> usize;

    /// Read the 32-bit register at `offset`.
    fn read32(&self, offset: usize) -> u32;

    /// Write `value` to the 32-bit register at `offset`.
    fn write32(&self, offset: usize, value: u32);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: RegisterRegion + ?Sized> RegisterRegion for &R {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn read32(&self, offset: usize) -> u32 {
        (**self).read32(offset)
    }

    fn write32(&self, offset: usize, value: u32) {
        (**self).write32(offset, value);
    }
}

/// Panic unless `offset` names a whole aligned word inside a `len`-byte block.
pub(crate) fn check_offset(offset: usize, len: usize) {
    assert!(
        offset % 4 == 0 && offset.checked_add(4).is_some_and(|end| end <= len),
        "register offset {offset:#x} outside {len:#x}-byte region"
    );
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: core → logging)
// ───────────────────────────────────────────────────────────────

/// The driver emits structured [`LedEvent`](super::events::LedEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::LedEvent);
}
