//! Socket bridges to the serial line.
//!
//! Serial-over-IP adapters and `socat` pty bridges expose the PLC's port
//! as a TCP or Unix-domain stream. Sockets have no "bytes waiting" query,
//! so the channel switches the socket to non-blocking, pulls everything
//! readable into an internal buffer, and switches back. That buffer backs
//! both `bytes_pending` and `read_available`.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
#[cfg(unix)]
use std::os::unix::net::UnixStream;
#[cfg(unix)]
use std::path::Path;

use super::Channel;
use crate::error::Result;

/// Scratch size for each non-blocking read.
const READ_CHUNK: usize = 256;

/// Streams whose blocking mode can be toggled.
pub trait NonBlocking {
    /// Switches the stream between blocking and non-blocking reads.
    fn set_nonblocking(&self, nonblocking: bool) -> io::Result<()>;
}

impl NonBlocking for TcpStream {
    fn set_nonblocking(&self, nonblocking: bool) -> io::Result<()> {
        TcpStream::set_nonblocking(self, nonblocking)
    }
}

#[cfg(unix)]
impl NonBlocking for UnixStream {
    fn set_nonblocking(&self, nonblocking: bool) -> io::Result<()> {
        UnixStream::set_nonblocking(self, nonblocking)
    }
}

/// A duplex socket standing in for the serial port.
#[derive(Debug)]
pub struct StreamChannel<S> {
    inner: S,
    label: String,
    pending: Vec<u8>,
}

impl StreamChannel<TcpStream> {
    /// Connects to a serial-over-TCP bridge.
    pub fn connect_tcp<A: ToSocketAddrs + std::fmt::Debug>(addr: A) -> Result<Self> {
        let label = format!("tcp {:?}", addr);
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        log::info!("connected to {}", label);
        Ok(Self::with_label(stream, label))
    }
}

#[cfg(unix)]
impl StreamChannel<UnixStream> {
    /// Connects to a Unix-domain socket bridge.
    pub fn connect_unix<P: AsRef<Path>>(path: P) -> Result<Self> {
        let label = format!("unix {}", path.as_ref().display());
        let stream = UnixStream::connect(path)?;
        log::info!("connected to {}", label);
        Ok(Self::with_label(stream, label))
    }
}

impl<S: Read + Write + NonBlocking> StreamChannel<S> {
    /// Wraps an already connected stream.
    pub fn new(inner: S) -> Self {
        Self::with_label(inner, String::from("stream"))
    }

    fn with_label(inner: S, label: String) -> Self {
        Self {
            inner,
            label,
            pending: Vec::new(),
        }
    }

    /// Returns a reference to the inner stream.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Consumes the channel and returns the inner stream.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Moves every byte readable without blocking into the pending buffer.
    fn fill_pending(&mut self) -> Result<()> {
        self.inner.set_nonblocking(true)?;
        let filled = self.read_until_would_block();
        self.inner.set_nonblocking(false)?;
        filled
    }

    fn read_until_would_block(&mut self) -> Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.inner.read(&mut chunk) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("{} closed by peer", self.label),
                    )
                    .into());
                }
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<S: Read + Write + NonBlocking> Channel for StreamChannel<S> {
    fn bytes_pending(&mut self) -> Result<usize> {
        self.fill_pending()?;
        Ok(self.pending.len())
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.inner.flush()?;
        Ok(())
    }

    fn read_available(&mut self) -> Result<Vec<u8>> {
        self.fill_pending()?;
        Ok(std::mem::take(&mut self.pending))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_unix_pair_round_trip() {
        let (local, mut device) = UnixStream::pair().unwrap();
        let mut channel = StreamChannel::new(local);

        assert_eq!(channel.bytes_pending().unwrap(), 0);
        assert!(channel.read_available().unwrap().is_empty());

        channel.write_frame(&[0x56, 0xff, 0xff, 0x00]).unwrap();
        let mut buf = [0u8; 4];
        device.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [0x56, 0xff, 0xff, 0x00]);

        device.write_all(b"OK\xff").unwrap();
        assert_eq!(channel.bytes_pending().unwrap(), 3);
        assert_eq!(channel.read_available().unwrap(), b"OK\xff".to_vec());
        assert_eq!(channel.bytes_pending().unwrap(), 0);
    }

    #[test]
    fn test_discard_pending() {
        let (local, mut device) = UnixStream::pair().unwrap();
        let mut channel = StreamChannel::new(local);

        device.write_all(b"stale").unwrap();
        channel.discard_pending().unwrap();
        assert_eq!(channel.bytes_pending().unwrap(), 0);
    }

    #[test]
    fn test_peer_close_is_an_error() {
        let (local, device) = UnixStream::pair().unwrap();
        let mut channel = StreamChannel::new(local);
        drop(device);

        let err = channel.read_available().unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_tcp_bridge() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let mut channel = StreamChannel::connect_tcp(addr).unwrap();
        let (mut device, _) = listener.accept().unwrap();

        channel.write_frame(&[0x56, 0x01]).unwrap();
        let mut buf = [0u8; 2];
        device.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [0x56, 0x01]);
        assert!(channel.describe().starts_with("tcp"));
    }
}
