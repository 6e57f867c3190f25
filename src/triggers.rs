//! LED trigger engine for the class-device front-end.
//!
//! A trigger turns elapsed time into an on/off level. The owner calls
//! `tick()` with the time since the previous call and applies the returned
//! level to the LED.
//!
//! | Trigger     | Level                                        |
//! |-------------|----------------------------------------------|
//! | none        | — (brightness is left alone)                 |
//! | default-on  | constantly on                                |
//! | heartbeat   | two 70 ms beats per 1260 ms period           |
//! | timer       | `delay_on_ms` on, `delay_off_ms` off         |

use crate::error::{Error, Result};

/// Heartbeat period at zero system load.
pub const HEARTBEAT_PERIOD_MS: u32 = 1260;
/// Length of one beat.
pub const HEARTBEAT_BEAT_MS: u32 = 70;
/// Default timer half-periods.
pub const TIMER_DEFAULT_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    None,
    DefaultOn,
    Heartbeat,
    Timer { delay_on_ms: u32, delay_off_ms: u32 },
}

impl Trigger {
    /// Trigger by its class-device name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "none" => Ok(Self::None),
            "default-on" => Ok(Self::DefaultOn),
            "heartbeat" => Ok(Self::Heartbeat),
            "timer" => Ok(Self::Timer {
                delay_on_ms: TIMER_DEFAULT_MS,
                delay_off_ms: TIMER_DEFAULT_MS,
            }),
            _ => Err(Error::Config("unknown trigger")),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::DefaultOn => "default-on",
            Self::Heartbeat => "heartbeat",
            Self::Timer { .. } => "timer",
        }
    }
}

/// Phase tracker for one LED's trigger.
#[derive(Debug, Clone)]
pub struct TriggerEngine {
    trigger: Trigger,
    phase_ms: u32,
}

impl TriggerEngine {
    pub fn new(trigger: Trigger) -> Self {
        Self { trigger, phase_ms: 0 }
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// Switch trigger; the new pattern starts at phase 0.
    pub fn set_trigger(&mut self, trigger: Trigger) {
        self.trigger = trigger;
        self.phase_ms = 0;
    }

    /// Level at the current phase, without advancing.
    pub fn level(&self) -> Option<bool> {
        match self.trigger {
            Trigger::None => None,
            Trigger::DefaultOn => Some(true),
            Trigger::Heartbeat => {
                let t = self.phase_ms % HEARTBEAT_PERIOD_MS;
                let second = HEARTBEAT_PERIOD_MS / 4;
                Some(t < HEARTBEAT_BEAT_MS || (second..second + HEARTBEAT_BEAT_MS).contains(&t))
            }
            Trigger::Timer { delay_on_ms, delay_off_ms } => {
                let period = delay_on_ms.saturating_add(delay_off_ms);
                if period == 0 {
                    return Some(false);
                }
                Some(self.phase_ms % period < delay_on_ms)
            }
        }
    }

    /// Advance by `delta_ms` and return the level to show.
    pub fn tick(&mut self, delta_ms: u32) -> Option<bool> {
        self.phase_ms = self.phase_ms.wrapping_add(delta_ms);
        self.level()
    }
}
