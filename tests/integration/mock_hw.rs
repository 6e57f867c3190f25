//! Mock register block and event sink for integration tests.
//!
//! Records every register access, reads included, so tests can assert on
//! the exact access sequence without touching real GPIO registers.

use std::cell::RefCell;

use rgbled::app::events::LedEvent;
use rgbled::app::ports::{EventSink, RegisterRegion};
use rgbled::pins;

// ── Register access record ────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegCall {
    Read(usize),
    Write(usize, u32),
}

// ── MockRegion ────────────────────────────────────────────────

#[derive(Debug)]
pub struct MockRegion {
    words: RefCell<[u32; pins::GPIO_BLOCK_LEN / 4]>,
    pub calls: RefCell<Vec<RegCall>>,
}

#[allow(dead_code)]
impl MockRegion {
    pub fn new() -> Self {
        Self {
            words: RefCell::new([0; pins::GPIO_BLOCK_LEN / 4]),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Block whose GPFSEL2 already holds `value` (set by earlier firmware).
    pub fn with_fsel2(value: u32) -> Self {
        let region = Self::new();
        region.words.borrow_mut()[pins::GPFSEL2 / 4] = value;
        region
    }

    /// Seed any register without recording an access.
    pub fn preset(&self, offset: usize, value: u32) {
        self.words.borrow_mut()[offset / 4] = value;
    }

    pub fn calls(&self) -> Vec<RegCall> {
        self.calls.borrow().clone()
    }

    pub fn reset_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Writes to `offset`, oldest first.
    pub fn writes_to(&self, offset: usize) -> Vec<u32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match *c {
                RegCall::Write(o, v) if o == offset => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn word(&self, offset: usize) -> u32 {
        self.words.borrow()[offset / 4]
    }
}

impl Default for MockRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterRegion for MockRegion {
    fn len(&self) -> usize {
        pins::GPIO_BLOCK_LEN
    }

    fn read32(&self, offset: usize) -> u32 {
        self.calls.borrow_mut().push(RegCall::Read(offset));
        self.words.borrow()[offset / 4]
    }

    fn write32(&self, offset: usize, value: u32) {
        self.calls.borrow_mut().push(RegCall::Write(offset, value));
        self.words.borrow_mut()[offset / 4] = value;
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct VecSink {
    pub events: Vec<LedEvent>,
}

impl EventSink for VecSink {
    fn emit(&mut self, event: &LedEvent) {
        self.events.push(event.clone());
    }
}
