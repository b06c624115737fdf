mod checksum;

pub use checksum::crc32;

use log::trace;

use crate::{
    constants::{
        OEM7_CHECKSUM_LEN, OEM7_HEADER_BODY_LEN, OEM7_HEADER_LEN, OEM7_LENGTH_OFFSET, OEM7_SYNC,
        OEM7_SYNC_CHAR_1,
    },
    error::{DecodeError, FrameError, ParserError},
    oem7_packets::{decode, Message},
    transport::Transport,
};
use checksum::Crc32Calc;

/// Binary message header, the 24 bytes following the header-length byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    pub message_id: u16,
    /// Message type bits: source antenna, format, response flag
    pub message_type: u8,
    pub port: u8,
    /// Payload length, excluding header and CRC
    pub message_length: u16,
    pub sequence: u16,
    /// Percentage of idle processor time, times two
    pub idle_time: u8,
    pub time_status: u8,
    pub week: u16,
    /// GPS time of week in milliseconds
    pub ms: u32,
    pub receiver_status: u32,
    pub reserved: u16,
    pub receiver_version: u16,
}

impl Header {
    pub fn new(message_id: u16) -> Self {
        Self {
            message_id,
            ..Self::default()
        }
    }

    pub fn from_bytes(bytes: &[u8; OEM7_HEADER_BODY_LEN]) -> Self {
        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        let u32_at =
            |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        Self {
            message_id: u16_at(0),
            message_type: bytes[2],
            port: bytes[3],
            message_length: u16_at(OEM7_LENGTH_OFFSET),
            sequence: u16_at(6),
            idle_time: bytes[8],
            time_status: bytes[9],
            week: u16_at(10),
            ms: u32_at(12),
            receiver_status: u32_at(16),
            reserved: u16_at(20),
            receiver_version: u16_at(22),
        }
    }

    pub fn to_bytes(&self) -> [u8; OEM7_HEADER_BODY_LEN] {
        let mut out = [0u8; OEM7_HEADER_BODY_LEN];
        out[0..2].copy_from_slice(&self.message_id.to_le_bytes());
        out[2] = self.message_type;
        out[3] = self.port;
        out[4..6].copy_from_slice(&self.message_length.to_le_bytes());
        out[6..8].copy_from_slice(&self.sequence.to_le_bytes());
        out[8] = self.idle_time;
        out[9] = self.time_status;
        out[10..12].copy_from_slice(&self.week.to_le_bytes());
        out[12..16].copy_from_slice(&self.ms.to_le_bytes());
        out[16..20].copy_from_slice(&self.receiver_status.to_le_bytes());
        out[20..22].copy_from_slice(&self.reserved.to_le_bytes());
        out[22..24].copy_from_slice(&self.receiver_version.to_le_bytes());
        out
    }
}

/// One checksum-verified frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub header: Header,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn message_id(&self) -> u16 {
        self.header.message_id
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn decode(&self) -> Result<Message, DecodeError> {
        decode(self.header.message_id, &self.payload)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        encode_frame(self.header, &self.payload)
    }
}

/// Serializes a complete frame: sync, header, `payload` and CRC.
///
/// The header length field is replaced with the length of `payload`.
///
/// # Panics
///
/// Panics if `payload` is longer than the 16 bit length field can express.
pub fn encode_frame(mut header: Header, payload: &[u8]) -> Vec<u8> {
    let Ok(len) = u16::try_from(payload.len()) else {
        panic!("payload of {} bytes does not fit a frame", payload.len());
    };
    header.message_length = len;

    let mut out = Vec::with_capacity(
        usize::from(OEM7_HEADER_LEN) + payload.len() + OEM7_CHECKSUM_LEN,
    );
    out.extend_from_slice(&OEM7_SYNC);
    out.push(OEM7_HEADER_LEN);
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(payload);
    let crc = crc32(&out);
    out.extend_from_slice(&crc.to_le_bytes());
    out
}

/// Counters of what the reader has seen since creation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub sync_misses: u64,
    pub header_errors: u64,
    pub short_reads: u64,
    pub checksum_errors: u64,
}

impl FrameStats {
    fn record(&mut self, err: &FrameError) {
        match err {
            FrameError::SyncMiss { .. } => self.sync_misses += 1,
            FrameError::InvalidHeaderLen { .. } => self.header_errors += 1,
            FrameError::ShortRead { .. } => self.short_reads += 1,
            FrameError::InvalidChecksum { .. } => self.checksum_errors += 1,
        }
    }
}

/// Pull based frame reader.
///
/// Every call to [`FrameReader::read_frame`] starts from scratch: nothing
/// of a partially read frame is carried into the next call. On a sync
/// mismatch the offending byte is consumed and [`FrameError::SyncMiss`] is
/// returned, so repeated calls scan the stream one byte at a time.
#[derive(Debug, Default)]
pub struct FrameReader {
    stats: FrameStats,
}

impl FrameReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn read_frame<T: Transport>(&mut self, transport: &mut T) -> Result<Frame, FrameError> {
        let ret = Self::read_frame_inner(transport);
        match &ret {
            Ok(_) => self.stats.frames += 1,
            Err(err) => self.stats.record(err),
        }
        ret
    }

    /// Reads one frame and decodes its payload
    pub fn read_message<T: Transport>(
        &mut self,
        transport: &mut T,
    ) -> Result<(Header, Message), ParserError> {
        let frame = self.read_frame(transport)?;
        let msg = frame.decode()?;
        Ok((frame.header, msg))
    }

    fn read_frame_inner<T: Transport>(transport: &mut T) -> Result<Frame, FrameError> {
        Self::sync(transport)?;

        let header_len = transport.read_byte()?;
        if header_len != OEM7_HEADER_LEN {
            return Err(FrameError::InvalidHeaderLen { got: header_len });
        }

        let mut header_bytes = [0u8; OEM7_HEADER_BODY_LEN];
        transport.read_exact(&mut header_bytes)?;
        let header = Header::from_bytes(&header_bytes);

        let mut payload = vec![0u8; usize::from(header.message_length)];
        transport.read_exact(&mut payload)?;

        let mut crc_bytes = [0u8; OEM7_CHECKSUM_LEN];
        transport.read_exact(&mut crc_bytes)?;

        let mut calc = Crc32Calc::new();
        calc.update(&OEM7_SYNC);
        calc.update_byte(header_len);
        calc.update(&header_bytes);
        calc.update(&payload);
        calc.validate_result(u32::from_le_bytes(crc_bytes))?;

        Ok(Frame { header, payload })
    }

    /// Consumes the three sync bytes. A first sync byte seen in place of
    /// the second or third restarts the match instead of being dropped.
    fn sync<T: Transport>(transport: &mut T) -> Result<(), FrameError> {
        let first = transport.read_byte()?;
        if first != OEM7_SYNC_CHAR_1 {
            trace!("sync miss {:#04x}", first);
            return Err(FrameError::SyncMiss { got: first });
        }
        let mut matched = 1;
        while matched < OEM7_SYNC.len() {
            let byte = transport.read_byte()?;
            if byte == OEM7_SYNC[matched] {
                matched += 1;
            } else if byte == OEM7_SYNC_CHAR_1 {
                matched = 1;
            } else {
                trace!("sync miss {:#04x} at position {}", byte, matched);
                return Err(FrameError::SyncMiss { got: byte });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::BufferTransport;

    fn test_header() -> Header {
        Header {
            message_id: 42,
            message_type: 0,
            port: 0x20,
            message_length: 0,
            sequence: 3,
            idle_time: 120,
            time_status: 180,
            week: 2290,
            ms: 345_600_000,
            receiver_status: 0x0004_0000,
            reserved: 0,
            receiver_version: 16_809,
        }
    }

    #[test]
    fn test_header_layout() {
        let bytes = test_header().to_bytes();
        assert_eq!(&bytes[0..2], &[42, 0]);
        assert_eq!(bytes[3], 0x20);
        assert_eq!(&bytes[10..12], &2290u16.to_le_bytes());
        assert_eq!(&bytes[12..16], &345_600_000u32.to_le_bytes());
        assert_eq!(&bytes[16..20], &[0, 0, 4, 0]);
        assert_eq!(Header::from_bytes(&bytes), test_header());
    }

    #[test]
    fn test_encode_frame_layout() {
        let bytes = encode_frame(test_header(), &[1, 2, 3]);
        assert_eq!(bytes.len(), 28 + 3 + 4);
        assert_eq!(&bytes[..4], &[0xaa, 0x44, 0x12, 0x1c]);
        assert_eq!(&bytes[8..10], &[3, 0]);
        let crc = crc32(&bytes[..31]);
        assert_eq!(&bytes[31..], &crc.to_le_bytes());
    }

    #[test]
    fn test_encode_frame_max_payload() {
        let payload = vec![0x5a; usize::from(u16::MAX)];
        let bytes = encode_frame(test_header(), &payload);
        assert_eq!(&bytes[8..10], &[0xff, 0xff]);
        assert_eq!(bytes.len(), 28 + payload.len() + 4);
    }

    #[test]
    #[should_panic(expected = "does not fit a frame")]
    fn test_encode_frame_oversized_payload() {
        let payload = vec![0; usize::from(u16::MAX) + 1];
        encode_frame(test_header(), &payload);
    }

    #[test]
    fn test_read_frame() {
        let mut t = BufferTransport::new();
        t.push_rx(&encode_frame(test_header(), &[9, 8, 7, 6]));

        let mut reader = FrameReader::new();
        let frame = reader.read_frame(&mut t).unwrap();
        assert_eq!(frame.message_id(), 42);
        assert_eq!(frame.payload(), &[9, 8, 7, 6]);
        assert_eq!(frame.header.message_length, 4);
        assert_eq!(t.available(), 0);
        assert_eq!(reader.stats().frames, 1);
    }

    #[test]
    fn test_resync_after_garbage() {
        let mut t = BufferTransport::new();
        t.push_rx(&[0x00, 0x44, 0xaa, 0x13, 0xaa, 0xaa, 0x44, 0x12]);
        t.push_rx(&encode_frame(test_header(), &[5; 10])[3..]);

        let mut reader = FrameReader::new();
        let mut misses = 0;
        let frame = loop {
            match reader.read_frame(&mut t) {
                Ok(frame) => break frame,
                Err(FrameError::SyncMiss { .. }) => misses += 1,
                Err(e) => panic!("unexpected error {e}"),
            }
        };
        assert_eq!(misses, 3);
        assert_eq!(frame.payload(), &[5; 10]);
        assert_eq!(reader.stats().sync_misses, 3);
    }

    #[test]
    fn test_invalid_header_len() {
        let mut bytes = encode_frame(test_header(), &[]);
        bytes[3] = 0x1b;
        let mut t = BufferTransport::new();
        t.push_rx(&bytes);
        assert_eq!(
            FrameReader::new().read_frame(&mut t),
            Err(FrameError::InvalidHeaderLen { got: 0x1b })
        );
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = encode_frame(test_header(), &[1; 20]);
        let mut t = BufferTransport::new();
        t.push_rx(&bytes[..40]);
        assert_eq!(
            FrameReader::new().read_frame(&mut t),
            Err(FrameError::ShortRead { expect: 20, got: 12 })
        );
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut bytes = encode_frame(test_header(), &[1, 2, 3, 4]);
        bytes[29] ^= 0x10;
        let mut t = BufferTransport::new();
        t.push_rx(&bytes);
        let mut reader = FrameReader::new();
        assert!(matches!(
            reader.read_frame(&mut t),
            Err(FrameError::InvalidChecksum { .. })
        ));
        assert_eq!(reader.stats().checksum_errors, 1);
    }
}
