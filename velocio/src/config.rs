//! Session timing configuration.

use std::time::Duration;

use crate::DEFAULT_DELAY_MS;

/// Fixed pauses around each round-trip.
///
/// The device needs time to process a frame before its reply is buffered,
/// so the session sleeps `settle_delay` after every write and `drain_delay`
/// after every read. Neither delay waits on data; they are plain sleeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Pause between writing a frame and draining the reply.
    pub settle_delay: Duration,
    /// Pause after the drain, before the next frame.
    pub drain_delay: Duration,
}

impl SessionConfig {
    /// Creates a config with both delays at their defaults.
    pub fn new() -> Self {
        Self {
            settle_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            drain_delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }

    /// Sets the pause between write and read.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Sets the pause after each read.
    pub fn with_drain_delay(mut self, delay: Duration) -> Self {
        self.drain_delay = delay;
        self
    }

    /// Sets both delays at once.
    pub fn with_delays(self, delay: Duration) -> Self {
        self.with_settle_delay(delay).with_drain_delay(delay)
    }

    /// A config with no pauses at all, for in-memory channels.
    pub fn immediate() -> Self {
        Self::new().with_delays(Duration::ZERO)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.settle_delay, Duration::from_millis(100));
        assert_eq!(config.drain_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_builders() {
        let config = SessionConfig::new()
            .with_settle_delay(Duration::from_millis(250))
            .with_drain_delay(Duration::from_millis(5));
        assert_eq!(config.settle_delay, Duration::from_millis(250));
        assert_eq!(config.drain_delay, Duration::from_millis(5));

        let config = SessionConfig::immediate();
        assert!(config.settle_delay.is_zero());
        assert!(config.drain_delay.is_zero());
    }
}
