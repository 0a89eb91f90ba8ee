use std::path::PathBuf;

use anyhow::{Context, Result};
use log::*;
use velocio::{Channel, Frame, Rendering, SerialChannel, Session, SessionConfig, StreamChannel};

/// Where the PLC's programming port is reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientTarget {
    Serial(String),
    Tcp(String),
    #[cfg_attr(not(unix), allow(dead_code))]
    Unix(PathBuf),
}

/// How each exchange is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    Colored,
    Plain,
}

impl OutputStyle {
    pub fn line(&self, rendering: &Rendering) -> String {
        match self {
            OutputStyle::Colored => rendering.colored_line(),
            OutputStyle::Plain => rendering.plain_line(),
        }
    }
}

pub struct PlcClient {
    target: ClientTarget,
    config: SessionConfig,
    style: OutputStyle,
}

impl PlcClient {
    pub fn new(target: ClientTarget, config: SessionConfig, style: OutputStyle) -> Self {
        Self {
            target,
            config,
            style,
        }
    }

    /// Opens the target, sends every frame and prints each exchange.
    ///
    /// The channel is dropped, and so closed, before this returns.
    pub fn send(&self, frames: &[Frame]) -> Result<usize> {
        info!("Connecting to target: {:?}", self.target);
        match &self.target {
            ClientTarget::Serial(path) => {
                let channel = SerialChannel::open(path)
                    .with_context(|| format!("failed to open serial port {}", path))?;
                self.process_channel(channel, frames)
            }
            ClientTarget::Tcp(addr) => {
                let channel = StreamChannel::connect_tcp(addr.as_str())
                    .with_context(|| format!("failed to connect to {}", addr))?;
                self.process_channel(channel, frames)
            }
            #[cfg(unix)]
            ClientTarget::Unix(path) => {
                let channel = StreamChannel::connect_unix(path)
                    .with_context(|| format!("failed to connect to {}", path.display()))?;
                self.process_channel(channel, frames)
            }
            #[cfg(not(unix))]
            ClientTarget::Unix(_) => {
                anyhow::bail!("unix sockets are not supported on this platform")
            }
        }
    }

    /// Prints the frames that would be sent, without opening anything.
    pub fn preview(&self, frames: &[Frame]) -> usize {
        for frame in frames {
            let rendering = Rendering::new(frame.as_bytes(), &[]);
            println!("{}", self.style.line(&rendering));
        }
        frames.len()
    }

    fn process_channel<C: Channel>(&self, channel: C, frames: &[Frame]) -> Result<usize> {
        let mut session = Session::new(channel, self.config);
        let style = self.style;
        let sent = session
            .transmit(frames, |exchange| println!("{}", style.line(&exchange.render())))
            .context("transmission aborted")?;
        debug!("{} frame(s) exchanged", sent);
        Ok(sent)
    }
}
