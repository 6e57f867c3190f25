//! In-memory GPIO register block for hosts without the SoC.
//!
//! Stores plain words for every offset, records each write in order, and
//! emulates the write-1-to-set / write-1-to-clear registers into an output
//! level word so callers can see which pins are high. GPLEV0 reads back that
//! word.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::app::ports::{RegisterRegion, check_offset};
use crate::pins;

#[derive(Debug, Default)]
struct SimState {
    words: Vec<u32>,
    writes: Vec<(usize, u32)>,
    levels: u32,
}

#[derive(Debug)]
pub struct SimRegion {
    len: usize,
    state: Mutex<SimState>,
}

impl SimRegion {
    /// A zeroed block the size of the real GPIO controller.
    pub fn new() -> Self {
        Self::with_len(pins::GPIO_BLOCK_LEN)
    }

    pub fn with_len(len: usize) -> Self {
        Self {
            len,
            state: Mutex::new(SimState { words: vec![0; len / 4], ..SimState::default() }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a register without recording a write (state left by firmware).
    pub fn preset(&self, offset: usize, value: u32) {
        check_offset(offset, self.len);
        self.lock().words[offset / 4] = value;
    }

    /// Current word at `offset`, without counting as an access.
    pub fn peek(&self, offset: usize) -> u32 {
        check_offset(offset, self.len);
        self.lock().words[offset / 4]
    }

    /// Every write so far as `(offset, value)`, oldest first.
    pub fn writes(&self) -> Vec<(usize, u32)> {
        self.lock().writes.clone()
    }

    pub fn clear_log(&self) {
        self.lock().writes.clear();
    }

    /// Output level of `pin` as driven through GPSET0/GPCLR0.
    pub fn level(&self, pin: u32) -> bool {
        self.lock().levels & (1 << pin) != 0
    }
}

impl Default for SimRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterRegion for SimRegion {
    fn len(&self) -> usize {
        self.len
    }

    fn read32(&self, offset: usize) -> u32 {
        check_offset(offset, self.len);
        let state = self.lock();
        match offset {
            pins::GPLEV0 => state.levels,
            _ => state.words[offset / 4],
        }
    }

    fn write32(&self, offset: usize, value: u32) {
        check_offset(offset, self.len);
        let mut state = self.lock();
        state.writes.push((offset, value));
        match offset {
            pins::GPSET0 => state.levels |= value,
            pins::GPCLR0 => state.levels &= !value,
            _ => state.words[offset / 4] = value,
        }
    }
}
