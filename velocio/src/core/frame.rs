//! Byte frames and their hex text form.
//!
//! A frame is one complete message written to the device in a single
//! round-trip. Frames are built either from the fixed command table or by
//! decoding fully-resolved hex text produced by the range expander.
//!
//! # Text Format
//!
//! ```text
//! "56ffff000807"      compact, as fed to the decoder
//! "56 ff ff 00 08 07" spaced, as printed by `to_hex`
//! ```
//!
//! Whitespace is ignored on input. Output is always lowercase.

use std::fmt;

use crate::error::{Error, Result};

/// An ordered, fully concrete sequence of bytes ready for transmission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Frame(Vec<u8>);

impl Frame {
    /// Wraps raw bytes as a frame.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decodes hex-pair text into a frame, one byte per two hex digits.
    ///
    /// Whitespace anywhere in the text is skipped. Odd digit counts and
    /// non-hex characters fail with [`Error::Decode`].
    pub fn from_hex(text: &str) -> Result<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        hex::decode(&compact)
            .map(Self)
            .map_err(|source| Error::Decode {
                text: compact,
                source,
            })
    }

    /// Returns the frame bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the frame and returns its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Number of bytes in the frame.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the frame carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Space-separated lowercase hex, e.g. `56 ff ff 00`.
    pub fn to_hex(&self) -> String {
        hex_line(&self.0)
    }

    /// Compact lowercase hex with no separators, e.g. `56ffff00`.
    pub fn to_compact_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl From<Vec<u8>> for Frame {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Frame {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Formats bytes as space-separated two-digit lowercase hex.
pub fn hex_line(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
