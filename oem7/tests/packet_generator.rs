//! Proptest generators for OEM7 BESTPOS and HEADING2 frames.
//!
//! The strategies produce byte-level frames with sync bytes, header,
//! randomized payload and a CRC computed independently of the crate, so
//! that the frame reader and the decoder are checked against a second
//! implementation of the wire format.

use byteorder::{LittleEndian, WriteBytesExt};
use oem7::{BufferTransport, FrameError, FrameReader, Message};
use proptest::prelude::*;

/// BESTPOS payload fields in wire order
#[derive(Debug, Clone)]
pub struct BestPosPayload {
    pub sol_status: u32,
    pub pos_type: u32,
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
    pub undulation: f32,
    pub datum_id: u32,
    pub lat_std: f32,
    pub lon_std: f32,
    pub alt_std: f32,
    pub base_id: [u8; 4],
    pub diff_age: f32,
    pub sol_age: f32,
    pub sats: [u8; 8],
}

impl BestPosPayload {
    /// Serializes the payload into 72 bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut wtr = Vec::with_capacity(72);
        wtr.write_u32::<LittleEndian>(self.sol_status).unwrap();
        wtr.write_u32::<LittleEndian>(self.pos_type).unwrap();
        wtr.write_f64::<LittleEndian>(self.lat).unwrap();
        wtr.write_f64::<LittleEndian>(self.lon).unwrap();
        wtr.write_f64::<LittleEndian>(self.alt).unwrap();
        wtr.write_f32::<LittleEndian>(self.undulation).unwrap();
        wtr.write_u32::<LittleEndian>(self.datum_id).unwrap();
        wtr.write_f32::<LittleEndian>(self.lat_std).unwrap();
        wtr.write_f32::<LittleEndian>(self.lon_std).unwrap();
        wtr.write_f32::<LittleEndian>(self.alt_std).unwrap();
        wtr.extend_from_slice(&self.base_id);
        wtr.write_f32::<LittleEndian>(self.diff_age).unwrap();
        wtr.write_f32::<LittleEndian>(self.sol_age).unwrap();
        wtr.extend_from_slice(&self.sats);
        wtr
    }
}

/// HEADING2 payload fields in wire order
#[derive(Debug, Clone)]
pub struct Heading2Payload {
    pub sol_status: u32,
    pub pos_type: u32,
    pub length: f32,
    pub heading: f32,
    pub pitch: f32,
    pub heading_std: f32,
    pub pitch_std: f32,
    pub rover_id: [u8; 4],
    pub base_id: [u8; 4],
    pub trailer: [u8; 8],
}

impl Heading2Payload {
    /// Serializes the payload into 48 bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut wtr = Vec::with_capacity(48);
        wtr.write_u32::<LittleEndian>(self.sol_status).unwrap();
        wtr.write_u32::<LittleEndian>(self.pos_type).unwrap();
        wtr.write_f32::<LittleEndian>(self.length).unwrap();
        wtr.write_f32::<LittleEndian>(self.heading).unwrap();
        wtr.write_f32::<LittleEndian>(self.pitch).unwrap();
        wtr.write_f32::<LittleEndian>(0.0).unwrap(); // reserved
        wtr.write_f32::<LittleEndian>(self.heading_std).unwrap();
        wtr.write_f32::<LittleEndian>(self.pitch_std).unwrap();
        wtr.extend_from_slice(&self.rover_id);
        wtr.extend_from_slice(&self.base_id);
        wtr.extend_from_slice(&self.trailer);
        wtr
    }
}

/// Bit-by-bit CRC-32, reflected 0xEDB88320, zero initial value
fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0u32;
    for byte in data {
        crc ^= u32::from(*byte);
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0xedb8_8320
            } else {
                crc >> 1
            };
        }
    }
    crc
}

/// Builds a complete frame around `payload`
pub fn build_frame(message_id: u16, sequence: u16, week: u16, ms: u32, payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0xaa, 0x44, 0x12, 0x1c];
    frame.write_u16::<LittleEndian>(message_id).unwrap();
    frame.write_u8(0).unwrap(); // message type
    frame.write_u8(0x20).unwrap(); // COM1
    frame
        .write_u16::<LittleEndian>(payload.len() as u16)
        .unwrap();
    frame.write_u16::<LittleEndian>(sequence).unwrap();
    frame.write_u8(100).unwrap(); // idle time
    frame.write_u8(180).unwrap(); // FINESTEERING
    frame.write_u16::<LittleEndian>(week).unwrap();
    frame.write_u32::<LittleEndian>(ms).unwrap();
    frame.write_u32::<LittleEndian>(0).unwrap(); // receiver status
    frame.write_u16::<LittleEndian>(0).unwrap(); // reserved
    frame.write_u16::<LittleEndian>(16_809).unwrap(); // receiver version
    frame.extend_from_slice(payload);
    let crc = crc32(&frame);
    frame.write_u32::<LittleEndian>(crc).unwrap();
    frame
}

fn best_pos_payload_strategy() -> impl Strategy<Value = BestPosPayload> {
    let solution = (
        prop_oneof![Just(0u32), 1..=9u32, Just(13u32), 18..=22u32],
        prop_oneof![Just(0u32), Just(16u32), Just(17u32), 32..=56u32],
        -90.0..=90.0f64,
        -180.0..=180.0f64,
        -500.0..=9000.0f64,
        -100.0..=100.0f32,
        any::<u32>(),
    );
    let quality = (
        0.0..=100.0f32,
        0.0..=100.0f32,
        0.0..=100.0f32,
        any::<[u8; 4]>(),
        0.0..=300.0f32,
        0.0..=300.0f32,
        any::<[u8; 8]>(),
    );
    (solution, quality).prop_map(
        |(
            (sol_status, pos_type, lat, lon, alt, undulation, datum_id),
            (lat_std, lon_std, alt_std, base_id, diff_age, sol_age, sats),
        )| BestPosPayload {
            sol_status,
            pos_type,
            lat,
            lon,
            alt,
            undulation,
            datum_id,
            lat_std,
            lon_std,
            alt_std,
            base_id,
            diff_age,
            sol_age,
            sats,
        },
    )
}

fn heading2_payload_strategy() -> impl Strategy<Value = Heading2Payload> {
    (
        0..=22u32,
        prop_oneof![Just(16u32), Just(34u32), Just(48u32), Just(49u32), Just(50u32)],
        0.1..=100.0f32,
        0.0..360.0f32,
        -90.0..=90.0f32,
        0.0..=10.0f32,
        0.0..=10.0f32,
        any::<[u8; 4]>(),
        any::<[u8; 4]>(),
        any::<[u8; 8]>(),
    )
        .prop_map(
            |(
                sol_status,
                pos_type,
                length,
                heading,
                pitch,
                heading_std,
                pitch_std,
                rover_id,
                base_id,
                trailer,
            )| Heading2Payload {
                sol_status,
                pos_type,
                length,
                heading,
                pitch,
                heading_std,
                pitch_std,
                rover_id,
                base_id,
                trailer,
            },
        )
}

/// Complete BESTPOS frame along with the source payload
pub fn best_pos_frame_strategy() -> impl Strategy<Value = (BestPosPayload, Vec<u8>)> {
    (best_pos_payload_strategy(), any::<u16>(), any::<u16>(), any::<u32>()).prop_map(
        |(payload, sequence, week, ms)| {
            let frame = build_frame(42, sequence, week, ms, &payload.to_bytes());
            (payload, frame)
        },
    )
}

/// Complete HEADING2 frame along with the source payload
pub fn heading2_frame_strategy() -> impl Strategy<Value = (Heading2Payload, Vec<u8>)> {
    (heading2_payload_strategy(), any::<u16>(), any::<u32>()).prop_map(
        |(payload, week, ms)| {
            let frame = build_frame(1335, 0, week, ms, &payload.to_bytes());
            (payload, frame)
        },
    )
}

fn read_one(bytes: &[u8]) -> Result<Message, FrameError> {
    let mut transport = BufferTransport::new();
    transport.push_rx(bytes);
    let mut reader = FrameReader::new();
    loop {
        match reader.read_frame(&mut transport) {
            Ok(frame) => return Ok(frame.decode().expect("generated payload must decode")),
            Err(FrameError::SyncMiss { .. }) => continue,
            Err(e) => return Err(e),
        }
    }
}

proptest! {
    #[test]
    fn test_best_pos_frames((expected, frame) in best_pos_frame_strategy()) {
        let msg = read_one(&frame).unwrap();
        let Message::BestPos(pos) = msg else {
            panic!("expected BESTPOS, got {:?}", msg);
        };
        prop_assert_eq!(pos.sol_status, expected.sol_status);
        prop_assert_eq!(pos.pos_type, expected.pos_type);
        prop_assert_eq!(pos.lat, expected.lat);
        prop_assert_eq!(pos.lon, expected.lon);
        prop_assert_eq!(pos.alt, expected.alt);
        prop_assert_eq!(pos.undulation, expected.undulation);
        prop_assert_eq!(pos.datum_id, expected.datum_id);
        prop_assert_eq!(pos.lat_std, expected.lat_std);
        prop_assert_eq!(pos.lon_std, expected.lon_std);
        prop_assert_eq!(pos.alt_std, expected.alt_std);
        prop_assert_eq!(pos.base_id, expected.base_id);
        prop_assert_eq!(pos.diff_age, expected.diff_age);
        prop_assert_eq!(pos.sol_age, expected.sol_age);
        prop_assert_eq!(pos.sats_tracked, expected.sats[0]);
        prop_assert_eq!(pos.sats_used, expected.sats[1]);
        prop_assert_eq!(pos.ext_sol_status, expected.sats[5]);
        prop_assert_eq!(pos.gps_glonass_mask, expected.sats[7]);
    }

    #[test]
    fn test_heading2_frames((expected, frame) in heading2_frame_strategy()) {
        let msg = read_one(&frame).unwrap();
        let Message::Heading2(h) = msg else {
            panic!("expected HEADING2, got {:?}", msg);
        };
        prop_assert_eq!(h.sol_status, expected.sol_status);
        prop_assert_eq!(h.pos_type, expected.pos_type);
        prop_assert_eq!(h.length, expected.length);
        prop_assert_eq!(h.heading, expected.heading);
        prop_assert_eq!(h.pitch, expected.pitch);
        prop_assert_eq!(h.heading_std, expected.heading_std);
        prop_assert_eq!(h.pitch_std, expected.pitch_std);
        prop_assert_eq!(h.rover_id, expected.rover_id);
        prop_assert_eq!(h.base_id, expected.base_id);
        prop_assert_eq!(h.sats_tracked, expected.trailer[0]);
        prop_assert_eq!(h.solution_source, expected.trailer[4]);
    }

    #[test]
    fn test_encode_matches_generated((_, frame) in best_pos_frame_strategy()) {
        let mut transport = BufferTransport::new();
        transport.push_rx(&frame);
        let decoded = FrameReader::new().read_frame(&mut transport).unwrap();
        prop_assert_eq!(decoded.to_bytes(), frame);
    }

    #[test]
    fn test_corrupted_byte_fails_checksum(
        (_, frame) in best_pos_frame_strategy(),
        index in any::<prop::sample::Index>(),
        mask in 1..=255u8,
    ) {
        // payload and CRC bytes, everything after the 28 header bytes
        let mut frame = frame;
        let pos = 28 + index.index(frame.len() - 28);
        frame[pos] ^= mask;
        let err = read_one(&frame).unwrap_err();
        prop_assert!(
            matches!(err, FrameError::InvalidChecksum { .. }),
            "unexpected {:?}",
            err
        );
    }

    #[test]
    fn test_resync_after_garbage(
        garbage in prop::collection::vec(any::<u8>().prop_filter("not a sync byte", |b| *b != 0xaa), 0..64),
        (expected, frame) in heading2_frame_strategy(),
    ) {
        let mut stream = garbage;
        stream.extend_from_slice(&frame);
        let msg = read_one(&stream).unwrap();
        let Message::Heading2(h) = msg else {
            panic!("expected HEADING2, got {:?}", msg);
        };
        prop_assert_eq!(h.heading, expected.heading);
    }
}
