//! Class-device front-end: named LEDs with a brightness and a trigger.
//!
//! The hardware is binary, so brightness collapses to off (`LED_OFF`) or on
//! (anything else). Triggers run through [`TriggerEngine`]; the owner calls
//! [`LedClassDevice::tick`] periodically.

use log::{debug, info};

use crate::app::driver::{BoundLed, LedDriver};
use crate::app::endpoint::LedEndpoint;
use crate::app::ports::RegisterRegion;
use crate::triggers::{Trigger, TriggerEngine};

pub const LED_OFF: u8 = 0;
pub const LED_FULL: u8 = 255;

pub struct LedClassDevice<'a, R> {
    name: &'a str,
    led: &'a LedEndpoint<R>,
    brightness: u8,
    engine: TriggerEngine,
}

impl<'a, R: RegisterRegion> LedClassDevice<'a, R> {
    /// Device with no trigger; brightness reflects the LED's current state.
    pub fn new(name: &'a str, led: &'a LedEndpoint<R>) -> Self {
        Self {
            name,
            led,
            brightness: if led.get() { LED_FULL } else { LED_OFF },
            engine: TriggerEngine::new(Trigger::None),
        }
    }

    /// Device for a bound node, with the node's default trigger active.
    pub fn register(bound: &'a BoundLed<R>) -> Self {
        let mut dev = Self::new(bound.label(), bound.endpoint());
        if bound.default_trigger() != Trigger::None {
            dev.set_trigger(bound.default_trigger());
        }
        info!("classdev: registered '{}' (trigger {})", dev.name, dev.trigger().name());
        dev
    }

    pub fn register_all(driver: &'a LedDriver<R>) -> Vec<Self> {
        driver.leds().iter().map(Self::register).collect()
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// `LED_OFF` switches the LED off and stops any trigger; any other
    /// level switches it on.
    pub fn set_brightness(&mut self, level: u8) {
        if level == LED_OFF && self.engine.trigger() != Trigger::None {
            debug!("{}: brightness 0 removes trigger {}", self.name, self.engine.trigger().name());
            self.engine.set_trigger(Trigger::None);
        }
        self.led.set(level != LED_OFF);
        self.brightness = level;
    }

    /// Last level applied, by the user or by the trigger.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn max_brightness(&self) -> u8 {
        LED_FULL
    }

    pub fn trigger(&self) -> Trigger {
        self.engine.trigger()
    }

    /// Replace the trigger. The LED goes off when a trigger is removed and
    /// shows the new trigger's first level straight away otherwise.
    pub fn set_trigger(&mut self, trigger: Trigger) {
        let had_trigger = self.engine.trigger() != Trigger::None;
        self.engine.set_trigger(trigger);
        match self.engine.level() {
            Some(on) => self.apply(on),
            None if had_trigger => self.apply(false),
            None => {}
        }
    }

    /// Advance the trigger by `delta_ms`; registers are only written when
    /// the level changes.
    pub fn tick(&mut self, delta_ms: u32) {
        if let Some(on) = self.engine.tick(delta_ms) {
            if on != self.led.get() {
                self.apply(on);
            }
        }
    }

    fn apply(&mut self, on: bool) {
        self.led.set(on);
        self.brightness = if on { LED_FULL } else { LED_OFF };
    }
}
