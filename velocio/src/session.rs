//! Write/read round-trips over a channel.
//!
//! A session owns its channel for its whole lifetime. Transmitting a frame
//! list drains stale input once, then runs one cycle per frame:
//!
//! ```text
//! write frame -> sleep(settle) -> read everything buffered -> sleep(drain)
//! ```
//!
//! The reply of each cycle is handed to the caller together with the frame
//! that produced it. There is no acknowledgment parsing and no retry; the
//! first channel error aborts the remaining frames.

use std::thread;
use std::time::Duration;

use crate::transport::Channel;
use crate::config::SessionConfig;
use crate::core::Frame;
use crate::error::Result;
use crate::render::Rendering;

/// One completed round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange<'a> {
    /// Position of the frame in the transmitted list.
    pub index: usize,
    /// The frame that was written.
    pub sent: &'a Frame,
    /// Everything read back after the settle delay; may be empty.
    pub received: Vec<u8>,
}

impl Exchange<'_> {
    /// Renders the transmitted and received bytes for display.
    pub fn render(&self) -> Rendering {
        Rendering::new(self.sent.as_bytes(), &self.received)
    }
}

/// Sequential round-trips over an exclusively owned channel.
pub struct Session<C> {
    channel: C,
    config: SessionConfig,
}

impl<C: Channel> Session<C> {
    /// Creates a session over `channel`.
    pub fn new(channel: C, config: SessionConfig) -> Self {
        Self { channel, config }
    }

    /// Returns the session timing.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns a reference to the channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Returns a mutable reference to the channel.
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Consumes the session and returns the channel.
    pub fn into_inner(self) -> C {
        self.channel
    }

    /// Discards any inbound bytes left over from earlier traffic.
    ///
    /// Returns how many bytes were waiting.
    pub fn drain(&mut self) -> Result<usize> {
        let stale = self.channel.bytes_pending()?;
        if stale > 0 {
            log::debug!("discarding {} stale byte(s) from {}", stale, self.channel.describe());
            self.channel.discard_pending()?;
        }
        Ok(stale)
    }

    /// Writes one frame and collects whatever the device sent back.
    pub fn round_trip(&mut self, frame: &Frame) -> Result<Vec<u8>> {
        log::debug!("tx {} byte(s): {}", frame.len(), frame);
        self.channel.write_frame(frame.as_bytes())?;
        pause(self.config.settle_delay);

        let received = self.channel.read_available()?;
        log::trace!("rx {} byte(s): {:02x?}", received.len(), received);
        pause(self.config.drain_delay);

        Ok(received)
    }

    /// Transmits every frame in order, handing each exchange to `on_exchange`.
    ///
    /// Stale input is drained once before the first frame. An empty list
    /// touches the channel not at all. Returns the number of frames sent.
    pub fn transmit<F>(&mut self, frames: &[Frame], mut on_exchange: F) -> Result<usize>
    where
        F: FnMut(&Exchange<'_>),
    {
        if frames.is_empty() {
            log::info!("no frames to send");
            return Ok(0);
        }

        self.drain()?;

        for (index, sent) in frames.iter().enumerate() {
            let received = self.round_trip(sent)?;
            on_exchange(&Exchange {
                index,
                sent,
                received,
            });
        }

        log::info!("sent {} frame(s) to {}", frames.len(), self.channel.describe());
        Ok(frames.len())
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
