//! # oem7
//!
//! A pure-rust library for NovAtel OEM7 dual-antenna GNSS receivers, speaking the OEM7 binary protocol.
//!
//! The crate reads binary frames off a byte transport, decodes the logs needed to judge
//! a position and heading fix, and derives whether the fix can be trusted along with
//! jamming and spoofing flags.
//!
//! An example of driving a receiver over a serial port can be seen in the demos/heading-monitor subfolder of this project.
//!
//! Sessions
//! ========
//!
//! A [`Receiver`] owns a [`Transport`]. `start()` configures the logs, `poll()` drains the
//! buffered frames and re-derives the fix status, `stop()` turns the logs off again:
//! ```
//! use std::time::Duration;
//! use oem7::{BufferTransport, Receiver, ReceiverConfig};
//!
//! let config = ReceiverConfig {
//!     ack_timeout: Duration::ZERO,
//!     ..Default::default()
//! };
//! let mut receiver = Receiver::with_config(BufferTransport::new(), config);
//! receiver.start().unwrap();
//!
//! let status = receiver.poll();
//! assert!(!status.valid);
//! # let written = String::from_utf8(receiver.transport_mut().take_written()).unwrap();
//! # assert!(written.starts_with("UNLOGALL TRUE\nLOG COM1 VERSIONB ONCE\n"));
//! ```
//!
//! Frames
//! ======
//!
//! Frames can be read and written without a session:
//! ```
//! use oem7::{encode_frame, BufferTransport, FixedPacket, FrameReader, Header, Message, Oem7PacketMeta, Time};
//!
//! let time = Time { utc_year: 2024, utc_month: 3, utc_day: 1, ..Default::default() };
//! let bytes = encode_frame(Header::new(Time::MESSAGE_ID), &time.encode());
//!
//! let mut transport = BufferTransport::new();
//! transport.push_rx(&[0x00, 0x13]); // garbage before the frame
//! transport.push_rx(&bytes);
//!
//! let mut reader = FrameReader::new();
//! let msg = loop {
//!     match reader.read_message(&mut transport) {
//!         Ok((_, msg)) => break msg,
//!         Err(_) => continue,
//!     }
//! };
//! assert_eq!(msg, Message::Time(time));
//! ```

#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    command::{
        read_response, send_command, write_command, CommandResponse, LogCommand, LogTrigger,
        UNLOG_ALL,
    },
    config::{HeadingLog, ReceiverConfig},
    constants::*,
    error::{DateTimeError, DecodeError, Error, FrameError, ParserError, ShortRead},
    oem7_packets::*,
    parser::{crc32, encode_frame, Frame, FrameReader, FrameStats, Header},
    receiver::Receiver,
    status::{assess, Arrivals, FixState, FixStatus, InvalidReason, Snapshot, Warnings},
    transport::{BufferTransport, Transport},
};

mod command;
mod config;
mod constants;
mod error;
mod oem7_packets;
mod parser;
mod receiver;
mod status;
pub mod status_text;
mod transport;
