use std::{collections::VecDeque, io};

use crate::error::ShortRead;

/// Byte oriented channel the receiver session talks over.
///
/// Implementors are expected to be non-blocking for `available`, and to
/// fail `read_exact` immediately instead of waiting for missing bytes.
/// A failed `read_exact` may have consumed whatever was pending.
pub trait Transport {
    /// Number of bytes that can be read right now
    fn available(&mut self) -> usize;

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ShortRead>;

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn read_byte(&mut self) -> Result<u8, ShortRead> {
        let mut byte = [0u8; 1];
        self.read_exact(&mut byte)?;
        Ok(byte[0])
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn available(&mut self) -> usize {
        (**self).available()
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ShortRead> {
        (**self).read_exact(buf)
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_all(bytes)
    }
}

/// In-memory transport, used for replaying captured streams and in tests.
///
/// Bytes pushed with [`BufferTransport::push_rx`] become readable, bytes
/// written by the session are captured and can be inspected with
/// [`BufferTransport::written`].
#[derive(Debug, Default, Clone)]
pub struct BufferTransport {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl BufferTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rx(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Everything written to the transport so far
    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    pub fn take_written(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.tx)
    }
}

impl Transport for BufferTransport {
    fn available(&mut self) -> usize {
        self.rx.len()
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ShortRead> {
        if self.rx.len() < buf.len() {
            let got = self.rx.len();
            self.rx.clear();
            return Err(ShortRead {
                expect: buf.len(),
                got,
            });
        }
        let n = buf.len();
        for (dst, src) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *dst = src;
        }
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.tx.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_exact() {
        let mut t = BufferTransport::new();
        t.push_rx(&[1, 2, 3, 4]);
        assert_eq!(t.available(), 4);

        let mut buf = [0u8; 3];
        t.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(t.read_byte(), Ok(4));
        assert_eq!(t.available(), 0);
    }

    #[test]
    fn test_read_exact_keeps_remainder() {
        let mut t = BufferTransport::new();
        t.push_rx(&[0xAA, 0x44, 0x12, 0x1C, 0x2A]);

        let mut sync = [0u8; 3];
        t.read_exact(&mut sync).unwrap();
        assert_eq!(sync, [0xAA, 0x44, 0x12]);
        assert_eq!(t.available(), 2);

        let mut empty = [0u8; 0];
        t.read_exact(&mut empty).unwrap();
        assert_eq!(t.available(), 2);

        let mut rest = [0u8; 2];
        t.read_exact(&mut rest).unwrap();
        assert_eq!(rest, [0x1C, 0x2A]);
    }

    #[test]
    fn test_short_read_drains() {
        let mut t = BufferTransport::new();
        t.push_rx(&[1, 2]);
        let mut buf = [0u8; 5];
        assert_eq!(
            t.read_exact(&mut buf),
            Err(ShortRead { expect: 5, got: 2 })
        );
        assert_eq!(t.available(), 0);
        assert_eq!(t.read_byte(), Err(ShortRead { expect: 1, got: 0 }));
    }

    #[test]
    fn test_written_capture() {
        let mut t = BufferTransport::new();
        t.write_all(b"UNLOGALL TRUE\n").unwrap();
        assert_eq!(t.written(), b"UNLOGALL TRUE\n");
        assert_eq!(t.take_written(), b"UNLOGALL TRUE\n".to_vec());
        assert!(t.written().is_empty());
    }
}
