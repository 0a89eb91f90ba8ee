//! Text views of a round-trip.
//!
//! Replies from the PLC mix binary fields with short text fields. Three
//! views are produced for every reply:
//!
//! - **hex**: two lowercase digits per byte, space separated
//! - **ascii**: visible bytes as characters, everything else as `_`
//! - **mixed**: visible bytes highlighted in green, space and `.` padded
//!   to two columns, `ff` dimmed, other bytes as hex
//!
//! Visible bytes are `0`-`9` and `A`-`z`, the range the device uses for
//! its text fields (this includes the punctuation between `Z` and `a`).

use std::fmt;

use crate::core::hex_line;

/// ANSI bold.
pub const BOLD: &str = "\x1b[1m";
/// ANSI bright green.
pub const GREEN: &str = "\x1b[92m";
/// ANSI dim.
pub const DIM: &str = "\x1b[2m";
/// ANSI reset.
pub const RESET: &str = "\x1b[0m";

/// Filler byte the device pads unused fields with.
const FILLER: u8 = 0xff;

/// Returns true if the device treats `byte` as a text character.
pub fn is_visible(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'A'..=b'z')
}

/// Maps a byte to itself if visible, otherwise to `_`.
pub fn as_normal_char(byte: u8) -> char {
    if is_visible(byte) { byte as char } else { '_' }
}

/// Two-column mixed rendering of a single byte.
pub fn as_mixed_char(byte: u8) -> String {
    match byte {
        b if is_visible(b) => format!("{GREEN} {}{RESET}", b as char),
        b' ' => String::from(" _"),
        b'.' => String::from(" ."),
        FILLER => format!("{DIM}{:02x}{RESET}", byte),
        _ => format!("{:02x}", byte),
    }
}

/// All views of one transmitted frame and its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    /// Transmitted bytes as hex.
    pub tx_hex: String,
    /// Received bytes as hex.
    pub rx_hex: String,
    /// Received bytes as filtered ASCII.
    pub rx_ascii: String,
    /// Received bytes in the colourised mixed view.
    pub rx_mixed: String,
}

impl Rendering {
    /// Builds every view; the inputs are only read.
    pub fn new(sent: &[u8], received: &[u8]) -> Self {
        Self {
            tx_hex: hex_line(sent),
            rx_hex: hex_line(received),
            rx_ascii: received.iter().map(|&b| as_normal_char(b)).collect(),
            rx_mixed: received
                .iter()
                .map(|&b| as_mixed_char(b))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// `tx: <hex> rx: <mixed>` with bold labels.
    pub fn colored_line(&self) -> String {
        format!(
            "{BOLD}tx:{RESET} {} {BOLD}rx:{RESET} {}",
            self.tx_hex, self.rx_mixed
        )
    }

    /// `tx: <hex> rx: <hex> | <ascii>` with no escape codes.
    pub fn plain_line(&self) -> String {
        format!("tx: {} rx: {} | {}", self.tx_hex, self.rx_hex, self.rx_ascii)
    }
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.colored_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_ranges() {
        assert!(is_visible(b'0'));
        assert!(is_visible(b'9'));
        assert!(is_visible(b'A'));
        assert!(is_visible(b'_'));
        assert!(is_visible(b'z'));
        assert!(!is_visible(b'/'));
        assert!(!is_visible(b':'));
        assert!(!is_visible(b'@'));
        assert!(!is_visible(b'{'));
        assert!(!is_visible(b' '));
    }

    #[test]
    fn test_normal_view() {
        let rendering = Rendering::new(&[], &[0x41, 0x20, 0xff]);
        assert_eq!(rendering.rx_ascii, "A__");
        assert_eq!(rendering.rx_hex, "41 20 ff");
    }

    #[test]
    fn test_mixed_view() {
        assert_eq!(as_mixed_char(0x41), "\x1b[92m A\x1b[0m");
        assert_eq!(as_mixed_char(b' '), " _");
        assert_eq!(as_mixed_char(b'.'), " .");
        assert_eq!(as_mixed_char(0xff), "\x1b[2mff\x1b[0m");
        assert_eq!(as_mixed_char(0x07), "07");

        let rendering = Rendering::new(&[], &[0x41, 0x20, 0xff]);
        assert_eq!(rendering.rx_mixed, "\x1b[92m A\x1b[0m  _ \x1b[2mff\x1b[0m");
    }

    #[test]
    fn test_lines() {
        let rendering = Rendering::new(&[0x56, 0xff], &[0x4f, 0x4b]);
        assert_eq!(rendering.plain_line(), "tx: 56 ff rx: 4f 4b | OK");
        assert!(rendering.colored_line().starts_with("\x1b[1mtx:\x1b[0m 56 ff "));
        assert_eq!(rendering.to_string(), rendering.colored_line());
    }

    #[test]
    fn test_empty_reply() {
        let rendering = Rendering::new(&[0x56], &[]);
        assert_eq!(rendering.rx_hex, "");
        assert_eq!(rendering.rx_ascii, "");
        assert_eq!(rendering.rx_mixed, "");
        assert_eq!(rendering.plain_line(), "tx: 56 rx:  | ");
    }
}
