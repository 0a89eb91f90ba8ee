//! USB serial connection to the PLC.

use std::io::{Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};

use super::Channel;
use crate::DEFAULT_BAUD_RATE;
use crate::error::Result;

/// Upper bound on a single blocking read or write call.
///
/// Reads only ask for bytes the driver already reports as buffered, so this
/// only matters if the device disappears mid-call.
const IO_TIMEOUT: Duration = Duration::from_millis(500);

/// The PLC's programming port.
///
/// Line settings are fixed: 9600 baud, eight data bits, no parity, one stop
/// bit, no flow control. The port is closed when the channel is dropped.
pub struct SerialChannel {
    port: Box<dyn SerialPort>,
    path: String,
}

impl SerialChannel {
    /// Opens and configures the serial device at `path`.
    pub fn open(path: &str) -> Result<Self> {
        let port = serialport::new(path, DEFAULT_BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(IO_TIMEOUT)
            .open()?;
        log::info!("opened {} at {} baud", path, DEFAULT_BAUD_RATE);
        Ok(Self {
            port,
            path: path.to_string(),
        })
    }

    /// Path the port was opened from.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Channel for SerialChannel {
    fn bytes_pending(&mut self) -> Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }

    fn read_available(&mut self) -> Result<Vec<u8>> {
        let mut received = Vec::new();
        loop {
            let pending = self.bytes_pending()?;
            if pending == 0 {
                break;
            }
            let start = received.len();
            received.resize(start + pending, 0);
            self.port.read_exact(&mut received[start..])?;
        }
        Ok(received)
    }

    fn discard_pending(&mut self) -> Result<()> {
        self.port.clear(ClearBuffer::Input)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("serial {}", self.path)
    }
}

impl Drop for SerialChannel {
    fn drop(&mut self) {
        log::debug!("closing {}", self.path);
    }
}
