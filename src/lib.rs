//! Tri-colour GPIO LED driver library.
//!
//! Drives the red/green/blue LED on GPIO 27/22/26 of a BCM2835-family SoC
//! through its memory-mapped GPIO block, and exposes the channels through a
//! class-device front-end (brightness + trigger) or a character-device
//! front-end (`on`/`off` text).
//!
//! ```text
//!  ┌──────────────────────────────────────────────────────────────┐
//!  │  Adapters: LedCharDevice · LedClassDevice · LogEventSink      │
//!  │            DevMemRegion · MmioRegion · SimRegion              │
//!  │  ───────────────────── port traits ──────────────────────     │
//!  │  Core (app): LedDriver · LedEndpoint · OutputBank · registry  │
//!  └──────────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod triggers;

pub use error::{Error, Result};
