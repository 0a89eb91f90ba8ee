//! Channel layer abstraction.
//!
//! This module provides the `Channel` trait that lets the session talk to
//! the PLC over any duplex byte connection.
//!
//! # Implementations
//!
//! - `SerialChannel`: the PLC's USB serial port, fixed at 9600 8N1
//! - `StreamChannel`: a TCP or Unix-domain bridge to the serial line
//! - `MockChannel`: scripted in-memory device for testing
//!
//! Every implementation releases its OS handle when dropped, so the
//! connection is closed on every exit path.
//!
//! # Example
//!
//! ```rust,ignore
//! use velocio::transport::{Channel, MockChannel};
//!
//! let mut channel = MockChannel::new().with_reply(b"OK".to_vec());
//! channel.write_frame(&[0x56, 0xff])?;
//! assert_eq!(channel.read_available()?, b"OK");
//! ```

mod mock;
mod serial;
mod stream;

pub use mock::MockChannel;
pub use serial::SerialChannel;
pub use stream::{NonBlocking, StreamChannel};

use crate::error::Result;

/// A duplex byte connection to the device.
///
/// Reads never wait for data: `read_available` returns whatever is
/// buffered at the moment of the call, possibly nothing.
pub trait Channel {
    /// Number of inbound bytes buffered and ready to read.
    fn bytes_pending(&mut self) -> Result<usize>;

    /// Writes one complete frame and flushes it to the device.
    fn write_frame(&mut self, bytes: &[u8]) -> Result<()>;

    /// Reads every inbound byte currently buffered.
    fn read_available(&mut self) -> Result<Vec<u8>>;

    /// Discards every inbound byte currently buffered.
    fn discard_pending(&mut self) -> Result<()> {
        self.read_available().map(|_| ())
    }

    /// Human-readable name of the endpoint, for logs.
    fn describe(&self) -> String {
        String::from("channel")
    }
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn bytes_pending(&mut self) -> Result<usize> {
        (**self).bytes_pending()
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_frame(bytes)
    }

    fn read_available(&mut self) -> Result<Vec<u8>> {
        (**self).read_available()
    }

    fn discard_pending(&mut self) -> Result<()> {
        (**self).discard_pending()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<C: Channel + ?Sized> Channel for &mut C {
    fn bytes_pending(&mut self) -> Result<usize> {
        (**self).bytes_pending()
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_frame(bytes)
    }

    fn read_available(&mut self) -> Result<Vec<u8>> {
        (**self).read_available()
    }

    fn discard_pending(&mut self) -> Result<()> {
        (**self).discard_pending()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_channel() {
        let mut channel: Box<dyn Channel> = Box::new(MockChannel::new().with_reply(vec![0x41]));
        channel.write_frame(&[0x56]).unwrap();
        assert_eq!(channel.bytes_pending().unwrap(), 1);
        assert_eq!(channel.read_available().unwrap(), vec![0x41]);
        assert_eq!(channel.bytes_pending().unwrap(), 0);
    }

    #[test]
    fn test_default_discard_reads_everything() {
        struct Fixed(Vec<u8>);

        impl Channel for Fixed {
            fn bytes_pending(&mut self) -> Result<usize> {
                Ok(self.0.len())
            }

            fn write_frame(&mut self, _bytes: &[u8]) -> Result<()> {
                Ok(())
            }

            fn read_available(&mut self) -> Result<Vec<u8>> {
                Ok(std::mem::take(&mut self.0))
            }
        }

        let mut channel = Fixed(vec![1, 2, 3]);
        channel.discard_pending().unwrap();
        assert_eq!(channel.bytes_pending().unwrap(), 0);
        assert_eq!(channel.describe(), "channel");
    }
}
