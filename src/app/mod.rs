//! LED core — register arithmetic and LED state, zero I/O of its own.
//!
//! All hardware access goes through the [`ports::RegisterRegion`] port, so
//! everything here runs on the host against a simulated register block.

pub mod driver;
pub mod endpoint;
pub mod events;
pub mod fsel;
pub mod ports;
pub mod protocol;
pub mod registry;
