//! Scripted in-memory device for tests and dry runs.

use std::collections::VecDeque;
use std::io;

use super::Channel;
use crate::error::Result;

/// A channel that records writes and replays canned replies.
///
/// Each successful write makes the next queued reply readable. Failures
/// can be injected on the Nth write or read (0-based) to exercise error
/// paths.
#[derive(Debug, Default)]
pub struct MockChannel {
    replies: VecDeque<Vec<u8>>,
    inbound: Vec<u8>,
    written: Vec<Vec<u8>>,
    reads: usize,
    discards: usize,
    fail_write_at: Option<usize>,
    fail_read_at: Option<usize>,
}

impl MockChannel {
    /// Creates a mock with no replies queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply released by the next write.
    pub fn with_reply(mut self, reply: impl AsRef<[u8]>) -> Self {
        self.replies.push_back(reply.as_ref().to_vec());
        self
    }

    /// Leaves bytes in the inbound buffer before anything is written.
    pub fn with_stale(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.inbound.extend_from_slice(bytes.as_ref());
        self
    }

    /// Fails the write with the given 0-based index.
    pub fn fail_write_at(mut self, index: usize) -> Self {
        self.fail_write_at = Some(index);
        self
    }

    /// Fails the read with the given 0-based index.
    pub fn fail_read_at(mut self, index: usize) -> Self {
        self.fail_read_at = Some(index);
        self
    }

    /// Frames written so far, in order.
    pub fn written(&self) -> &[Vec<u8>] {
        &self.written
    }

    /// Number of `read_available` calls that succeeded.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Number of times pending input was discarded.
    pub fn discards(&self) -> usize {
        self.discards
    }
}

impl Channel for MockChannel {
    fn bytes_pending(&mut self) -> Result<usize> {
        Ok(self.inbound.len())
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<()> {
        if self.fail_write_at == Some(self.written.len()) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock write failure").into());
        }
        self.written.push(bytes.to_vec());
        if let Some(reply) = self.replies.pop_front() {
            self.inbound.extend(reply);
        }
        Ok(())
    }

    fn read_available(&mut self) -> Result<Vec<u8>> {
        if self.fail_read_at == Some(self.reads) {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "mock read failure").into());
        }
        self.reads += 1;
        Ok(std::mem::take(&mut self.inbound))
    }

    fn discard_pending(&mut self) -> Result<()> {
        self.discards += 1;
        self.inbound.clear();
        Ok(())
    }

    fn describe(&self) -> String {
        String::from("mock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replies_follow_writes() {
        let mut channel = MockChannel::new().with_reply(b"A").with_reply(b"B");

        assert!(channel.read_available().unwrap().is_empty());
        channel.write_frame(&[1]).unwrap();
        channel.write_frame(&[2]).unwrap();
        assert_eq!(channel.read_available().unwrap(), b"AB".to_vec());

        channel.write_frame(&[3]).unwrap();
        assert!(channel.read_available().unwrap().is_empty());
        assert_eq!(channel.written(), &[vec![1], vec![2], vec![3]]);
        assert_eq!(channel.reads(), 3);
    }

    #[test]
    fn test_stale_bytes_and_discard() {
        let mut channel = MockChannel::new().with_stale(vec![0xde, 0xad]);
        assert_eq!(channel.bytes_pending().unwrap(), 2);
        channel.discard_pending().unwrap();
        assert_eq!(channel.bytes_pending().unwrap(), 0);
        assert_eq!(channel.discards(), 1);
    }

    #[test]
    fn test_injected_failures() {
        let mut channel = MockChannel::new().fail_write_at(1).fail_read_at(0);
        channel.write_frame(&[1]).unwrap();
        assert!(channel.write_frame(&[2]).is_err());
        assert!(channel.read_available().is_err());
        assert_eq!(channel.written().len(), 1);
        assert_eq!(channel.reads(), 0);
    }
}
