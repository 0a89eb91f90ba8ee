//! Raw token encoding.
//!
//! The command line hands over raw tokens one argument at a time
//! (`56 ff ff 00 08 0a 00 [01,06]`). Tokens are joined without separators
//! and the joined text goes through the range expander, which yields the
//! final list of frames.

use super::frame::Frame;
use super::range::expand;
use crate::error::Result;

/// Joins raw tokens and expands them into concrete frames.
///
/// An empty token list produces one empty frame, mirroring what an empty
/// hex string decodes to.
pub fn encode_tokens<I, S>(tokens: I) -> Result<Vec<Frame>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = join_tokens(tokens);
    let frames = expand(&joined)?;
    log::debug!("encoded {:?} into {} frame(s)", joined, frames.len());
    Ok(frames)
}

/// Concatenates tokens into a single text with no separators.
pub fn join_tokens<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens.into_iter().fold(String::new(), |mut acc, token| {
        acc.push_str(token.as_ref());
        acc
    })
}
