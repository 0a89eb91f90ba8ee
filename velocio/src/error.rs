//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised while encoding frames or talking to the device.
///
/// Nothing in the crate recovers from these locally; every variant is
/// propagated to the caller, which is expected to abort the run.
#[derive(Debug, Error)]
pub enum Error {
    /// Hex text of odd length or containing non-hex characters.
    #[error("cannot decode {text:?} as hex: {source}")]
    Decode {
        /// The text that failed to decode, whitespace removed.
        text: String,
        /// What the hex decoder rejected.
        #[source]
        source: hex::FromHexError,
    },

    /// The channel could not be opened, written or read.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The serial driver refused to open or configure the port.
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// Instruction name not present in the command table.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

impl Error {
    /// Returns true if this error came from the channel rather than the input.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Serial(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unknown_command() {
        let err = Error::UnknownCommand("jump".into());
        assert_eq!(err.to_string(), "unknown command: jump");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_io_error_is_transport() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone").into();
        assert!(err.is_transport());
        assert!(err.to_string().contains("gone"));
    }
}
