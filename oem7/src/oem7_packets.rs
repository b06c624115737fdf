use crate::error::DecodeError;

/// Little-endian, densely packed field of a binary log record
pub trait WireField: Sized {
    /// Encoded size in bytes
    const SIZE: usize;

    /// Reads the field from the start of `bytes`,
    /// caller guarantees that `bytes.len() >= Self::SIZE`
    fn read(bytes: &[u8]) -> Self;

    fn write(&self, out: &mut Vec<u8>);
}

macro_rules! impl_wire_field_for_num {
    ($($ty:ty),*) => {
        $(
            impl WireField for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();

                fn read(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$ty>::from_le_bytes(raw)
                }

                fn write(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_wire_field_for_num!(u8, u16, u32, i32, f32, f64);

impl<const N: usize> WireField for [u8; N] {
    const SIZE: usize = N;

    fn read(bytes: &[u8]) -> Self {
        let mut raw = [0u8; N];
        raw.copy_from_slice(&bytes[..N]);
        raw
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

/// Declares a packed log record: the struct itself and its [`WireField`]
/// implementation, fields are laid out on the wire in declaration order.
macro_rules! oem7_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::oem7_packets::WireField for $name {
            const SIZE: usize = 0 $(+ <$ty as $crate::oem7_packets::WireField>::SIZE)*;

            #[allow(unused_assignments)]
            fn read(bytes: &[u8]) -> Self {
                let mut offset = 0;
                $(
                    let $field = <$ty as $crate::oem7_packets::WireField>::read(&bytes[offset..]);
                    offset += <$ty as $crate::oem7_packets::WireField>::SIZE;
                )*
                Self { $($field,)* }
            }

            fn write(&self, out: &mut Vec<u8>) {
                $(
                    $crate::oem7_packets::WireField::write(&self.$field, out);
                )*
            }
        }
    };
}

mod packets;
pub mod types;

pub use packets::*;

/// Information related to a specific log
pub trait Oem7PacketMeta {
    const MESSAGE_ID: u16;
    /// Log name as used in ASCII commands, without the format suffix
    const NAME: &'static str;
}

/// Fixed-size log: payload length must equal the record size exactly
pub trait FixedPacket: WireField + Oem7PacketMeta {
    fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        if payload.len() != Self::SIZE {
            return Err(DecodeError::InvalidPacketLen {
                packet: Self::NAME,
                expect: Self::SIZE,
                got: payload.len(),
            });
        }
        Ok(Self::read(payload))
    }

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        self.write(&mut out);
        out
    }
}

impl<T: WireField + Oem7PacketMeta> FixedPacket for T {}

/// Log made of a 32-bit element count followed by that many records
pub trait CountedPacket: Oem7PacketMeta + Sized {
    type Element: WireField;

    /// Maximum number of elements the store for this log holds
    const CAPACITY: usize;

    fn from_elements(elements: Vec<Self::Element>) -> Self;

    fn elements(&self) -> &[Self::Element];

    fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let count_size = <u32 as WireField>::SIZE;
        if payload.len() < count_size {
            return Err(DecodeError::InvalidPacketLen {
                packet: Self::NAME,
                expect: count_size,
                got: payload.len(),
            });
        }
        let count = u32::read(payload) as usize;
        if count > Self::CAPACITY {
            return Err(DecodeError::CapacityExceeded {
                packet: Self::NAME,
                capacity: Self::CAPACITY,
                count,
            });
        }
        let expect = count_size + count * <Self::Element as WireField>::SIZE;
        if payload.len() != expect {
            return Err(DecodeError::InvalidPacketLen {
                packet: Self::NAME,
                expect,
                got: payload.len(),
            });
        }
        let elements = payload[count_size..]
            .chunks_exact(<Self::Element as WireField>::SIZE)
            .map(<Self::Element as WireField>::read)
            .collect();
        Ok(Self::from_elements(elements))
    }

    fn encode(&self) -> Vec<u8> {
        let elements = self.elements();
        let elem_size = <Self::Element as WireField>::SIZE;
        let mut out = Vec::with_capacity(4 + elements.len() * elem_size);
        (elements.len() as u32).write(&mut out);
        for elem in elements {
            elem.write(&mut out);
        }
        out
    }
}

/// Every log the decoder knows about
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    RxStatus(RxStatus),
    RxStatusEvent(RxStatusEvent),
    Time(Time),
    BestPos(BestPos),
    Heading2(Heading2),
    DualAntennaHeading(DualAntennaHeading),
    Version(Version),
    HwMonitor(HwMonitor),
    /// Well-formed frame of a log that is not tracked
    Unknown(u16),
}

impl Message {
    pub fn message_id(&self) -> u16 {
        match self {
            Message::RxStatus(_) => RxStatus::MESSAGE_ID,
            Message::RxStatusEvent(_) => RxStatusEvent::MESSAGE_ID,
            Message::Time(_) => Time::MESSAGE_ID,
            Message::BestPos(_) => BestPos::MESSAGE_ID,
            Message::Heading2(_) => Heading2::MESSAGE_ID,
            Message::DualAntennaHeading(_) => DualAntennaHeading::MESSAGE_ID,
            Message::Version(_) => Version::MESSAGE_ID,
            Message::HwMonitor(_) => HwMonitor::MESSAGE_ID,
            Message::Unknown(id) => *id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Message::RxStatus(_) => RxStatus::NAME,
            Message::RxStatusEvent(_) => RxStatusEvent::NAME,
            Message::Time(_) => Time::NAME,
            Message::BestPos(_) => BestPos::NAME,
            Message::Heading2(_) => Heading2::NAME,
            Message::DualAntennaHeading(_) => DualAntennaHeading::NAME,
            Message::Version(_) => Version::NAME,
            Message::HwMonitor(_) => HwMonitor::NAME,
            Message::Unknown(_) => "UNKNOWN",
        }
    }

    /// Payload bytes of the log, `None` for [`Message::Unknown`]
    pub fn encode(&self) -> Option<Vec<u8>> {
        let bytes = match self {
            Message::RxStatus(m) => FixedPacket::encode(m),
            Message::RxStatusEvent(m) => FixedPacket::encode(m),
            Message::Time(m) => FixedPacket::encode(m),
            Message::BestPos(m) => FixedPacket::encode(m),
            Message::Heading2(m) => FixedPacket::encode(m),
            Message::DualAntennaHeading(m) => FixedPacket::encode(m),
            Message::Version(m) => CountedPacket::encode(m),
            Message::HwMonitor(m) => CountedPacket::encode(m),
            Message::Unknown(_) => return None,
        };
        Some(bytes)
    }
}

/// Maps a message id and its payload onto a typed log.
///
/// Unknown ids are not an error, they decode into [`Message::Unknown`].
pub fn decode(message_id: u16, payload: &[u8]) -> Result<Message, DecodeError> {
    let msg = match message_id {
        RxStatus::MESSAGE_ID => Message::RxStatus(FixedPacket::decode(payload)?),
        RxStatusEvent::MESSAGE_ID => Message::RxStatusEvent(FixedPacket::decode(payload)?),
        Time::MESSAGE_ID => Message::Time(FixedPacket::decode(payload)?),
        BestPos::MESSAGE_ID => Message::BestPos(FixedPacket::decode(payload)?),
        Heading2::MESSAGE_ID => Message::Heading2(FixedPacket::decode(payload)?),
        DualAntennaHeading::MESSAGE_ID => {
            Message::DualAntennaHeading(FixedPacket::decode(payload)?)
        },
        Version::MESSAGE_ID => Message::Version(CountedPacket::decode(payload)?),
        HwMonitor::MESSAGE_ID => Message::HwMonitor(CountedPacket::decode(payload)?),
        id => Message::Unknown(id),
    };
    Ok(msg)
}

/// Text of a fixed-size, NUL padded character field
pub fn fixed_str(bytes: &[u8]) -> &str {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    core::str::from_utf8(&bytes[..end]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sizes() {
        assert_eq!(RxStatus::SIZE, 88);
        assert_eq!(RxStatusEvent::SIZE, 44);
        assert_eq!(Time::SIZE, 44);
        assert_eq!(BestPos::SIZE, 72);
        assert_eq!(Heading2::SIZE, 48);
        assert_eq!(DualAntennaHeading::SIZE, 44);
        assert_eq!(VersionComponent::SIZE, 96);
        assert_eq!(HwMonitorReading::SIZE, 8);
    }

    #[test]
    fn test_unknown_id() {
        assert_eq!(decode(8, &[1, 2, 3]), Ok(Message::Unknown(8)));
        assert_eq!(Message::Unknown(8).encode(), None);
    }

    #[test]
    fn test_fixed_size_mismatch() {
        for len in [0, 43, 45, 88] {
            assert_eq!(
                decode(Time::MESSAGE_ID, &vec![0; len]),
                Err(DecodeError::InvalidPacketLen {
                    packet: "TIME",
                    expect: 44,
                    got: len,
                })
            );
        }
    }

    #[test]
    fn test_counted_capacity_exceeded() {
        let mut payload = Vec::new();
        11u32.write(&mut payload);
        payload.resize(4 + 11 * HwMonitorReading::SIZE, 0);
        assert_eq!(
            decode(HwMonitor::MESSAGE_ID, &payload),
            Err(DecodeError::CapacityExceeded {
                packet: "HWMONITOR",
                capacity: 10,
                count: 11,
            })
        );
    }

    #[test]
    fn test_counted_size_mismatch() {
        let mut payload = Vec::new();
        2u32.write(&mut payload);
        payload.resize(4 + VersionComponent::SIZE, 0);
        assert_eq!(
            decode(Version::MESSAGE_ID, &payload),
            Err(DecodeError::InvalidPacketLen {
                packet: "VERSION",
                expect: 4 + 2 * 96,
                got: 4 + 96,
            })
        );
        assert_eq!(
            decode(Version::MESSAGE_ID, &[1, 0]),
            Err(DecodeError::InvalidPacketLen {
                packet: "VERSION",
                expect: 4,
                got: 2,
            })
        );
    }

    #[test]
    fn test_counted_empty() {
        let msg = decode(HwMonitor::MESSAGE_ID, &[0, 0, 0, 0]).unwrap();
        assert_eq!(msg, Message::HwMonitor(HwMonitor::default()));
    }

    #[test]
    fn test_fixed_str() {
        assert_eq!(fixed_str(b"0\0\0\0"), "0");
        assert_eq!(fixed_str(b"ROVR"), "ROVR");
        assert_eq!(fixed_str(&[0xff, 0]), "");
    }
}
