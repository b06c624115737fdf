use crate::error::FrameError;

const CRC32_POLYNOMIAL: u32 = 0xedb8_8320;

const fn crc32_value(byte: u8) -> u32 {
    let mut val = byte as u32;
    let mut i = 0;
    while i < 8 {
        if val & 1 == 1 {
            val = (val >> 1) ^ CRC32_POLYNOMIAL;
        } else {
            val >>= 1;
        }
        i += 1;
    }
    val
}

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = crc32_value(i as u8);
        i += 1;
    }
    table
}

static CRC32_TABLE: [u32; 256] = build_table();

/// Computes the OEM7 32-bit CRC of `bytes` in one go
///
/// Reflected polynomial 0xEDB88320, initial value 0 and no final xor.
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut calc = Crc32Calc::new();
    calc.update(bytes);
    calc.result()
}

/// OEM7 CRC-32 calculator supporting both streaming and single-shot validation
#[derive(Default, Clone, Copy)]
pub(crate) struct Crc32Calc {
    crc: u32,
}

impl Crc32Calc {
    pub(crate) const fn new() -> Self {
        Self { crc: 0 }
    }

    /// Update checksum with new bytes
    pub(crate) fn update(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.update_byte(*byte);
        }
    }

    /// Update checksum with a single byte
    pub(crate) fn update_byte(&mut self, byte: u8) {
        let index = ((self.crc ^ u32::from(byte)) & 0xff) as usize;
        self.crc = (self.crc >> 8) ^ CRC32_TABLE[index];
    }

    pub(crate) const fn result(self) -> u32 {
        self.crc
    }

    /// Validate checksum against the value received on the wire
    pub(crate) fn validate_result(self, received: u32) -> Result<(), FrameError> {
        if self.crc == received {
            Ok(())
        } else {
            Err(FrameError::InvalidChecksum {
                expect: received,
                got: self.crc,
            })
        }
    }
}
