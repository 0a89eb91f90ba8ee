//! Inclusive range placeholders in raw hex text.
//!
//! A placeholder is written `[LO,HI]`, where `LO` and `HI` are exactly two
//! hex digits each. Expanding a text replaces the leftmost placeholder with
//! every value from `LO` to `HI` in turn and recurses into the result, so a
//! text with several placeholders expands depth-first with the leftmost one
//! varying slowest:
//!
//! ```text
//! "56[00,01][00,01]"  ->  56 00 00
//!                         56 00 01
//!                         56 01 00
//!                         56 01 01
//! ```
//!
//! A placeholder with `LO > HI` enumerates nothing, so the whole text
//! expands to an empty list rather than an error.

use std::ops::{Range, RangeInclusive};

use super::frame::Frame;
use crate::error::Result;

/// Length of `[XX,YY]` in bytes.
const PLACEHOLDER_LEN: usize = 7;

/// A `[LO,HI]` placeholder located inside a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePlaceholder {
    /// First value, inclusive.
    pub lo: u8,
    /// Last value, inclusive.
    pub hi: u8,
    /// Byte offsets of the placeholder, brackets included.
    pub span: Range<usize>,
}

impl RangePlaceholder {
    /// Finds the leftmost well-formed placeholder in `text`.
    ///
    /// Brackets that do not enclose two hex pairs separated by a comma are
    /// not placeholders; they are left for the hex decoder to reject.
    pub fn find(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() < PLACEHOLDER_LEN {
            return None;
        }
        (0..=bytes.len() - PLACEHOLDER_LEN).find_map(|start| Self::parse_at(bytes, start))
    }

    fn parse_at(bytes: &[u8], start: usize) -> Option<Self> {
        let window = &bytes[start..start + PLACEHOLDER_LEN];
        if window[0] != b'[' || window[3] != b',' || window[6] != b']' {
            return None;
        }
        let lo = hex_pair(window[1], window[2])?;
        let hi = hex_pair(window[4], window[5])?;
        Some(Self {
            lo,
            hi,
            span: start..start + PLACEHOLDER_LEN,
        })
    }

    /// The values this placeholder enumerates, ascending.
    pub fn values(&self) -> RangeInclusive<u8> {
        self.lo..=self.hi
    }

    /// How many values the placeholder stands for; zero when `lo > hi`.
    pub fn count(&self) -> usize {
        if self.lo > self.hi {
            0
        } else {
            usize::from(self.hi - self.lo) + 1
        }
    }

    /// Returns a copy of `text` with this placeholder replaced by `value`.
    pub fn substitute(&self, text: &str, value: u8) -> String {
        let mut out = String::with_capacity(text.len() - PLACEHOLDER_LEN + 2);
        out.push_str(&text[..self.span.start]);
        out.push_str(&format!("{:02x}", value));
        out.push_str(&text[self.span.end..]);
        out
    }
}

fn hex_pair(high: u8, low: u8) -> Option<u8> {
    let digit = |c: u8| (c as char).to_digit(16);
    Some((digit(high)? * 16 + digit(low)?) as u8)
}

/// Expands every placeholder in `text` and decodes the results into frames.
///
/// Text without placeholders decodes to exactly one frame. Each recursion
/// level resolves one placeholder, so depth is bounded by the number of
/// placeholders in the input. Decoding errors abort the whole expansion.
pub fn expand(text: &str) -> Result<Vec<Frame>> {
    let Some(placeholder) = RangePlaceholder::find(text) else {
        return Ok(vec![Frame::from_hex(text)?]);
    };

    if placeholder.count() == 0 {
        log::warn!(
            "range [{:02x},{:02x}] is empty; nothing to expand",
            placeholder.lo,
            placeholder.hi
        );
        return Ok(Vec::new());
    }

    log::trace!(
        "expanding [{:02x},{:02x}] at offset {}",
        placeholder.lo,
        placeholder.hi,
        placeholder.span.start
    );

    let mut frames = Vec::with_capacity(placeholder.count());
    for value in placeholder.values() {
        let resolved = placeholder.substitute(text, value);
        frames.extend(expand(&resolved)?);
    }
    Ok(frames)
}
