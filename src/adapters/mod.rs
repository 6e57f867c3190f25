//! Adapters — concrete implementations around the LED core.
//!
//! | Adapter    | Implements / wraps   | Connects to                      |
//! |------------|----------------------|----------------------------------|
//! | `mmio`     | RegisterRegion       | Mapped GPIO block (`/dev/gpiomem`)|
//! | `sim`      | RegisterRegion       | In-memory register file          |
//! | `chardev`  | text front-end       | `on`/`off` endpoint per LED      |
//! | `classdev` | class front-end      | brightness + trigger per LED     |
//! | `log_sink` | EventSink            | `log` facade                     |

pub mod chardev;
pub mod classdev;
pub mod log_sink;
pub mod mmio;
pub mod sim;
