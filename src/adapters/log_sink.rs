//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing driver lifecycle events to the `log`
//! facade (stderr through `env_logger` in the CLI).

use log::{info, warn};

use crate::app::events::LedEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`LedEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &LedEvent) {
        match event {
            LedEvent::Configured(change) => {
                info!("FSEL  | GPFSEL2 {:#010x} -> {:#010x}", change.before, change.after);
            }
            LedEvent::NodeBound { label, colour } => {
                info!("BIND  | {} -> {}", label, colour);
            }
            LedEvent::NodeRejected { label } => {
                warn!("BIND  | {}: bad device tree value", label);
            }
            LedEvent::Attached { bound } => {
                info!("ATTACH| {} LED(s)", bound);
            }
            LedEvent::Detached => {
                info!("DETACH| done");
            }
        }
    }
}
