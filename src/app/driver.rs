//! Driver instance — the attach/detach lifecycle around the LED core.
//!
//! [`LedDriver`] owns the configured [`OutputBank`] and one
//! [`LedEndpoint`] per accepted node of the board description. Front-end
//! adapters borrow the endpoints, so none of them can outlive the driver.
//!
//! ```text
//!  BoardConfig ──▶ attach ──▶ ┌───────────────────────────┐ ──▶ EventSink
//!                             │ LedDriver                 │
//!   RegisterRegion ─────────▶ │ OutputBank · LedEndpoint×n│
//!                             └───────────────────────────┘
//! ```

use std::sync::Arc;

use log::{info, warn};

use super::endpoint::LedEndpoint;
use super::events::LedEvent;
use super::fsel::OutputBank;
use super::ports::{EventSink, RegisterRegion};
use super::registry::{self, ALL_LEDS, Colour};
use crate::config::{BoardConfig, LedNode};
use crate::error::{Error, Result};
use crate::pins;
use crate::triggers::Trigger;

/// An endpoint together with the node it was built from.
#[derive(Debug)]
pub struct BoundLed<R> {
    label: String,
    default_trigger: Trigger,
    endpoint: LedEndpoint<R>,
}

impl<R> BoundLed<R> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn default_trigger(&self) -> Trigger {
        self.default_trigger
    }

    pub fn endpoint(&self) -> &LedEndpoint<R> {
        &self.endpoint
    }
}

/// A node that failed to bind, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedNode {
    pub label: String,
    pub error: Error,
}

/// What attach does with the level each LED pin already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialLevels {
    /// Drive every LED low; endpoints start off.
    #[default]
    Clear,
    /// Leave the pins as they are and seed each endpoint from GPLEV0.
    Keep,
}

#[derive(Debug)]
pub struct LedDriver<R> {
    bank: Arc<OutputBank<R>>,
    leds: Vec<BoundLed<R>>,
    rejected: Vec<RejectedNode>,
}

impl<R: RegisterRegion> LedDriver<R> {
    /// Configure the GPIO block, switch every LED off and bind every LED
    /// node of `config`.
    ///
    /// A region too small for the LED registers aborts the attach; a node
    /// that fails to resolve, or names a colour an earlier node already
    /// bound, is skipped and recorded in [`rejected`], and its siblings
    /// still bind. `config.region` is not consulted: `region` is already
    /// mapped.
    ///
    /// [`rejected`]: Self::rejected
    pub fn attach<S: EventSink>(region: R, config: &BoardConfig, sink: &mut S) -> Result<Self> {
        Self::attach_with(region, config, InitialLevels::Clear, sink)
    }

    /// [`attach`](Self::attach) with a choice of what happens to the
    /// current pin levels.
    pub fn attach_with<S: EventSink>(
        region: R,
        config: &BoardConfig,
        initial: InitialLevels,
        sink: &mut S,
    ) -> Result<Self> {
        config.validate_leds()?;

        let needed = match initial {
            InitialLevels::Clear => pins::MIN_REGION_LEN,
            InitialLevels::Keep => pins::LEVEL_REGION_LEN,
        };
        if region.len() < needed {
            warn!("attach: region is {:#x} bytes, need {:#x}", region.len(), needed);
            return Err(Error::RegionUnavailable(0));
        }

        let bank = Arc::new(match initial {
            InitialLevels::Clear => OutputBank::configure(region, &ALL_LEDS),
            InitialLevels::Keep => OutputBank::configure_keeping_levels(region, &ALL_LEDS),
        });
        sink.emit(&LedEvent::Configured(bank.fsel_change()));

        let mut leds: Vec<BoundLed<R>> = Vec::with_capacity(config.leds.len());
        let mut rejected = Vec::new();

        for node in &config.leds {
            let bound = Self::resolve_node(node).and_then(|(colour, trigger)| {
                if leds.iter().any(|l| l.endpoint.colour() == colour) {
                    return Err(Error::Config("duplicate colour"));
                }
                let endpoint = match initial {
                    InitialLevels::Clear => LedEndpoint::new(colour, Arc::clone(&bank)),
                    InitialLevels::Keep => LedEndpoint::adopt(colour, Arc::clone(&bank)),
                };
                Ok(BoundLed { label: node.label.clone(), default_trigger: trigger, endpoint })
            });

            match bound {
                Ok(led) => {
                    sink.emit(&LedEvent::NodeBound {
                        label: led.label.clone(),
                        colour: led.endpoint.colour(),
                    });
                    leds.push(led);
                }
                Err(error) => {
                    warn!("attach: node '{}' skipped: {}", node.label, error);
                    sink.emit(&LedEvent::NodeRejected { label: node.label.clone() });
                    rejected.push(RejectedNode { label: node.label.clone(), error });
                }
            }
        }

        info!("attach: {} LED(s) bound, {} rejected", leds.len(), rejected.len());
        sink.emit(&LedEvent::Attached { bound: leds.len() });

        Ok(Self { bank, leds, rejected })
    }

    fn resolve_node(node: &LedNode) -> Result<(Colour, Trigger)> {
        let colour = registry::resolve(&node.label)?;
        let trigger = match &node.default_trigger {
            Some(name) => Trigger::from_name(name)?,
            None => Trigger::None,
        };
        Ok((colour, trigger))
    }

    pub fn leds(&self) -> &[BoundLed<R>] {
        &self.leds
    }

    /// Bound LED by node label.
    pub fn led(&self, label: &str) -> Option<&BoundLed<R>> {
        self.leds.iter().find(|l| l.label == label)
    }

    /// First bound LED of the given colour.
    pub fn by_colour(&self, colour: Colour) -> Option<&BoundLed<R>> {
        self.leds.iter().find(|l| l.endpoint.colour() == colour)
    }

    pub fn rejected(&self) -> &[RejectedNode] {
        &self.rejected
    }

    pub fn bank(&self) -> &OutputBank<R> {
        &self.bank
    }

    /// Tear the instance down. Outputs keep their last level; the region is
    /// released once the last endpoint is gone, which is here.
    pub fn detach<S: EventSink>(self, sink: &mut S) {
        info!("detach: releasing {} LED(s)", self.leds.len());
        drop(self.leds);
        sink.emit(&LedEvent::Detached);
    }
}
