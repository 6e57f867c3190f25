//! On/off text protocol of the character-device front-end.
//!
//! Wire format: `on` or `off` followed by exactly one terminator byte
//! (normally `\n`). Read-back is `on\n` or `off\n`.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCommand {
    On,
    Off,
}

impl TextCommand {
    pub fn level(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Parse one command. The last byte is the terminator and is dropped
/// unexamined; what remains must be exactly `on` or `off`.
pub fn parse_command(bytes: &[u8]) -> Result<TextCommand> {
    let Some((_terminator, body)) = bytes.split_last() else {
        return Err(Error::InvalidCommand);
    };
    match body {
        b"on" => Ok(TextCommand::On),
        b"off" => Ok(TextCommand::Off),
        _ => Err(Error::InvalidCommand),
    }
}

/// Rendered state including its terminator.
pub fn render(on: bool) -> &'static [u8] {
    if on { b"on\n" } else { b"off\n" }
}
