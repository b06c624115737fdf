use std::{fmt, io};

/// Transport returned fewer bytes than requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortRead {
    pub expect: usize,
    pub got: usize,
}

impl fmt::Display for ShortRead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Short read, expect {} bytes, got {}", self.expect, self.got)
    }
}

impl std::error::Error for ShortRead {}

/// Error that possible while reading one frame off the transport.
///
/// All of them are recoverable: the frame is dropped and the next call
/// resynchronizes on the sync bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Byte did not match the expected sync sequence
    SyncMiss { got: u8 },
    InvalidHeaderLen { got: u8 },
    ShortRead { expect: usize, got: usize },
    InvalidChecksum { expect: u32, got: u32 },
}

impl FrameError {
    /// `true` for errors that only mean "no frame starts here"
    pub fn is_sync_miss(&self) -> bool {
        matches!(self, FrameError::SyncMiss { .. })
    }
}

impl From<ShortRead> for FrameError {
    fn from(e: ShortRead) -> Self {
        FrameError::ShortRead {
            expect: e.expect,
            got: e.got,
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::SyncMiss { got } => write!(f, "Sync byte expected, got {:#04x}", got),
            FrameError::InvalidHeaderLen { got } => {
                write!(f, "Invalid header length {}", got)
            },
            FrameError::ShortRead { expect, got } => {
                write!(f, "Frame truncated, expect {} bytes, got {}", expect, got)
            },
            FrameError::InvalidChecksum { expect, got } => write!(
                f,
                "Not valid frame's checksum, expect {:08x}, got {:08x}",
                expect, got
            ),
        }
    }
}

impl std::error::Error for FrameError {}

/// Error that possible during payload decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    InvalidPacketLen {
        packet: &'static str,
        expect: usize,
        got: usize,
    },
    /// Count-prefixed message announces more elements than the store holds
    CapacityExceeded {
        packet: &'static str,
        capacity: usize,
        count: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidPacketLen {
                packet,
                expect,
                got,
            } => write!(
                f,
                "Invalid packet({}) length, expect {}, got {}",
                packet, expect, got
            ),
            DecodeError::CapacityExceeded {
                packet,
                capacity,
                count,
            } => write!(
                f,
                "Packet({}) holds {} elements, capacity is {}",
                packet, count, capacity
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Error of a frame read combined with its decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserError {
    Frame(FrameError),
    Decode(DecodeError),
}

impl From<FrameError> for ParserError {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

impl From<DecodeError> for ParserError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::Frame(e) => e.fmt(f),
            ParserError::Decode(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ParserError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeError {
    InvalidDate,
    InvalidTime,
    InvalidMilliseconds,
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate => f.write_str("invalid date"),
            DateTimeError::InvalidTime => f.write_str("invalid time"),
            DateTimeError::InvalidMilliseconds => f.write_str("invalid milliseconds"),
        }
    }
}

impl std::error::Error for DateTimeError {}

/// Session level error
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
