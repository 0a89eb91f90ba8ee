//! Frame encoding building blocks.
//!
//! This module contains:
//! - Frame: a concrete byte sequence and its hex text form
//! - Range: `[LO,HI]` placeholder discovery and recursive expansion
//! - Encoder: joins raw command-line tokens and runs the expander

mod encoder;
mod frame;
mod range;

pub use encoder::{encode_tokens, join_tokens};
pub use frame::{Frame, hex_line};
pub use range::{RangePlaceholder, expand};
