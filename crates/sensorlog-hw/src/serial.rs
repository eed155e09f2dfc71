//! Serial link to a sensor board.

use crate::{BaudRate, Error, Result};
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt, ReadBuf};
use tokio_serial::{DataBits, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits};
use tracing::{debug, info};

/// Byte-oriented serial connection, 8N1 without flow control.
///
/// The link starts closed. It must be opened from within a tokio runtime.
/// It implements [`AsyncRead`] so record readers can consume it like any
/// other byte stream.
#[derive(Default)]
pub struct SerialLink {
    port: Option<SerialStream>,
    port_path: String,
    baud: BaudRate,
}

impl SerialLink {
    /// Creates a closed link.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `path` at `baud`, closing any port already held.
    pub fn open(&mut self, path: &str, baud: BaudRate) -> Result<()> {
        self.close();

        let port = tokio_serial::new(path, baud.as_u32())
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .open_native_async()
            .map_err(|e| {
                // Check if the error is due to device not existing
                if let tokio_serial::ErrorKind::Io(kind) = &e.kind {
                    if *kind == io::ErrorKind::NotFound || *kind == io::ErrorKind::PermissionDenied
                    {
                        if !std::path::Path::new(path).exists() {
                            return Error::PortNotFound(path.to_string());
                        }
                    }
                }
                if e.kind == tokio_serial::ErrorKind::NoDevice {
                    return Error::PortNotFound(path.to_string());
                }
                Error::Serial(e)
            })?;

        info!("Serial port {} opened at {} baud", path, baud);
        self.port = Some(port);
        self.port_path = path.to_string();
        self.baud = baud;
        Ok(())
    }

    /// Reads whatever bytes are available into `buf`.
    ///
    /// Returns 0 once the device has closed the stream.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;
        let n = port.read(buf).await?;
        debug!("Read {} byte(s) from {}", n, self.port_path);
        Ok(n)
    }

    /// Writes all of `data` and flushes.
    pub async fn write(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;
        port.write_all(data).await?;
        port.flush().await?;
        debug!("Wrote {} byte(s) to {}", data.len(), self.port_path);
        Ok(())
    }

    /// Closes the port. Does nothing if it is not open.
    pub fn close(&mut self) {
        if self.port.take().is_some() {
            info!("Serial port {} closed", self.port_path);
        }
    }

    /// Returns true if the port is open.
    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    /// Returns the path of the last opened port.
    pub fn port_path(&self) -> &str {
        &self.port_path
    }

    /// Returns the speed of the last opened port.
    pub fn baud(&self) -> BaudRate {
        self.baud
    }
}

impl AsyncRead for SerialLink {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut().port.as_mut() {
            Some(port) => Pin::new(port).poll_read(cx, buf),
            None => Poll::Ready(Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "serial port not open",
            ))),
        }
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink")
            .field("port_path", &self.port_path)
            .field("baud", &self.baud)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_link_is_closed() {
        let link = SerialLink::new();
        assert!(!link.is_open());
        assert_eq!(link.baud(), BaudRate::B9600);
        assert_eq!(link.port_path(), "");
    }

    #[tokio::test]
    async fn test_read_write_require_open_port() {
        let mut link = SerialLink::new();
        let mut buf = [0u8; 8];
        assert!(matches!(link.read(&mut buf).await, Err(Error::NotConnected)));
        assert!(matches!(link.write(b"ping").await, Err(Error::NotConnected)));
    }

    #[tokio::test]
    async fn test_async_read_on_closed_link() {
        let mut link = SerialLink::new();
        let mut buf = Vec::new();
        let err = link.read_to_end(&mut buf).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
    }

    #[tokio::test]
    async fn test_open_missing_device() {
        let mut link = SerialLink::new();
        let result = link.open("/dev/sensorlog-does-not-exist", BaudRate::B9600);
        assert!(matches!(result, Err(Error::PortNotFound(_))));
        assert!(!link.is_open());
        link.close();
    }
}
