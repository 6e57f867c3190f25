//! Board description
//!
//! Which register block to map, which front-end to expose, and the LED
//! nodes with their labels. Plays the role of the device-tree node: one
//! `label` per LED, plus an optional default trigger for the class
//! front-end. Loaded from JSON, or taken from the built-in defaults.

use serde::{Deserialize, Serialize};

use crate::pins;

/// Which front-end the LED nodes are exposed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontEnd {
    /// One class device per colour, brightness plus trigger.
    Class,
    /// One text endpoint per colour taking `on`/`off`.
    CharDevice,
}

/// Where the GPIO register block comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Memory device to map.
    pub device: String,
    /// Byte offset into `device` (page aligned).
    pub base: u64,
    /// Bytes to map.
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedNode {
    pub label: String,
    /// Trigger activated when the class device registers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_trigger: Option<String>,
}

impl LedNode {
    pub fn new(label: &str) -> Self {
        Self { label: label.into(), default_trigger: None }
    }

    pub fn with_trigger(label: &str, trigger: &str) -> Self {
        Self { label: label.into(), default_trigger: Some(trigger.into()) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub front_end: FrontEnd,
    pub region: RegionConfig,
    pub leds: Vec<LedNode>,
}

impl Default for BoardConfig {
    /// Class front-end over `/dev/gpiomem`, heartbeat on red.
    fn default() -> Self {
        Self {
            front_end: FrontEnd::Class,
            region: RegionConfig {
                device: "/dev/gpiomem".into(),
                base: 0,
                len: pins::GPIO_BLOCK_LEN,
            },
            leds: vec![
                LedNode::with_trigger("red", "heartbeat"),
                LedNode::new("green"),
                LedNode::new("blue"),
            ],
        }
    }
}

impl BoardConfig {
    /// Char-device front-end over `/dev/mem` at the physical GPIO base.
    pub fn char_device() -> Self {
        Self {
            front_end: FrontEnd::CharDevice,
            region: RegionConfig {
                device: "/dev/mem".into(),
                base: pins::GPIO_BASE,
                len: pins::GPIO_BLOCK_LEN,
            },
            leds: vec![LedNode::new("ledred"), LedNode::new("ledgreen"), LedNode::new("ledblue")],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log::warn!("config: {}", e);
            ConfigError::Parse
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks. Labels are not resolved here; an unknown colour
    /// only costs its own node at attach time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_region()?;
        self.validate_leds()
    }

    /// Checks on the mapping description only.
    pub fn validate_region(&self) -> Result<(), ConfigError> {
        if self.region.len < pins::MIN_REGION_LEN {
            return Err(ConfigError::ValidationFailed("region.len: too small for GPCLR0"));
        }
        if self.region.base % 4096 != 0 {
            return Err(ConfigError::ValidationFailed("region.base: not page aligned"));
        }
        Ok(())
    }

    /// Checks on the LED node list only.
    pub fn validate_leds(&self) -> Result<(), ConfigError> {
        if self.leds.is_empty() {
            return Err(ConfigError::ValidationFailed("leds: empty"));
        }
        for (i, node) in self.leds.iter().enumerate() {
            if node.label.is_empty() {
                return Err(ConfigError::ValidationFailed("leds: empty label"));
            }
            if self.leds[..i].iter().any(|n| n.label == node.label) {
                return Err(ConfigError::ValidationFailed("leds: duplicate label"));
            }
        }
        Ok(())
    }
}

/// Errors from loading a board description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// JSON could not be parsed into a board description.
    Parse,
    /// A field failed validation; the message names it.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse => write!(f, "parse error"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
