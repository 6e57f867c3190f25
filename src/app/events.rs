//! Outbound driver events.
//!
//! [`LedDriver`](super::driver::LedDriver) emits these through the
//! [`EventSink`](super::ports::EventSink) port during attach and detach.

use super::fsel::FselChange;
use super::registry::Colour;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedEvent {
    /// GPFSEL2 was rewritten and the LED outputs cleared.
    Configured(FselChange),

    /// A node resolved and its endpoint is ready (state off).
    NodeBound { label: String, colour: Colour },

    /// A node's label did not resolve; the node was skipped.
    NodeRejected { label: String },

    /// Attach finished with this many bound nodes.
    Attached { bound: usize },

    /// The driver instance was torn down.
    Detached,
}
