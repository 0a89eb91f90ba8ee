//! # Velocio - Serial Control for Velocio PLCs
//!
//! Velocio turns instruction names and raw hex token streams into binary
//! command frames, sends them to a Velocio PLC over a duplex byte channel,
//! and renders what the device sends back.
//!
//! - **Named commands**: a fixed table of control, read and debug frames
//! - **Raw frames**: hex token streams with inclusive range placeholders
//!   (`56 ff [00,04]`) expanded into one frame per value
//! - **Round-trips**: one write, settle, drain-read, settle cycle per frame
//! - **Rendering**: hex, filtered-ASCII and colourised views of each reply
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Command Line (ctvelocio)              │
//! ├─────────────────────────────────────────────────────────┤
//! │                    Encoding Layer                        │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────┐   │
//! │  │  Commands   │ │   Encoder   │ │ Range Expander  │   │
//! │  └─────────────┘ └─────────────┘ └─────────────────┘   │
//! ├─────────────────────────────────────────────────────────┤
//! │                    Session Layer                         │
//! │  ┌─────────────────────────┐ ┌─────────────────────┐   │
//! │  │   Write / Drain Loop    │ │  Response Renderer  │   │
//! │  └─────────────────────────┘ └─────────────────────┘   │
//! ├─────────────────────────────────────────────────────────┤
//! │                    Channel Layer                         │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────┐   │
//! │  │   Serial    │ │  TCP / Unix │ │      Mock       │   │
//! │  └─────────────┘ └─────────────┘ └─────────────────┘   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use velocio::{encode_tokens, SerialChannel, Session, SessionConfig};
//!
//! let frames = encode_tokens(["56", "ff", "ff", "00", "08", "0a", "00", "[01,06]"])?;
//! let channel = SerialChannel::open(velocio::DEFAULT_PORT)?;
//! let mut session = Session::new(channel, SessionConfig::default());
//! session.transmit(&frames, |exchange| println!("{}", exchange.render()))?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use command::{Category, Command};
pub use config::SessionConfig;
pub use crate::core::{Frame, RangePlaceholder, encode_tokens, expand};
pub use error::{Error, Result};
pub use render::Rendering;
pub use session::{Exchange, Session};
pub use transport::{Channel, MockChannel, SerialChannel, StreamChannel};

/// Serial device the PLC enumerates as over USB.
pub const DEFAULT_PORT: &str = "/dev/ttyACM0";

/// Line speed of the PLC's programming port.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default pause after each write and after each drain, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 100;

/// First four bytes shared by every command frame.
pub const FRAME_HEADER: [u8; 4] = [0x56, 0xff, 0xff, 0x00];
