use std::{io, time::Duration};

use anyhow::{Context, Result};
use oem7::{ShortRead, Transport};
use serialport::{FlowControl, SerialPort};

/// [`Transport`] over a serial port.
///
/// Reads only ever ask for bytes the driver already buffered, so the port
/// timeout is never hit in the polling path.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    pub fn open(path: &str, baud: u32) -> Result<Self> {
        let builder = serialport::new(path, baud)
            .timeout(Duration::from_millis(10))
            .flow_control(FlowControl::None);
        log::debug!("{:?}", &builder);
        let port = builder
            .open()
            .with_context(|| format!("Failed to open port: {}", path))?;
        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    fn available(&mut self) -> usize {
        match self.port.bytes_to_read() {
            Ok(n) => n as usize,
            Err(e) => {
                log::error!("serial port: {}", e);
                0
            },
        }
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ShortRead> {
        let pending = self.available();
        if pending < buf.len() {
            // drop what is there, the frame can't be completed from it
            let mut scratch = vec![0u8; pending];
            let got = io::Read::read(&mut self.port, &mut scratch).unwrap_or(0);
            return Err(ShortRead {
                expect: buf.len(),
                got,
            });
        }
        io::Read::read_exact(&mut self.port, buf).map_err(|_| ShortRead {
            expect: buf.len(),
            got: 0,
        })
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        io::Write::write_all(&mut self.port, bytes)
    }
}
