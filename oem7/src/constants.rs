pub const OEM7_SYNC_CHAR_1: u8 = 0xaa;
pub const OEM7_SYNC_CHAR_2: u8 = 0x44;
pub const OEM7_SYNC_CHAR_3: u8 = 0x12;
pub const OEM7_SYNC: [u8; 3] = [OEM7_SYNC_CHAR_1, OEM7_SYNC_CHAR_2, OEM7_SYNC_CHAR_3];
pub(crate) const OEM7_SYNC_SIZE: usize = 3;
pub(crate) const OEM7_HEADER_LEN_SIZE: usize = 1;

/// Value of the header-length byte: sync bytes, the length byte itself and the header body.
pub const OEM7_HEADER_LEN: u8 = 0x1c;
/// Header body following the header-length byte.
pub const OEM7_HEADER_BODY_LEN: usize =
    OEM7_HEADER_LEN as usize - OEM7_SYNC_SIZE - OEM7_HEADER_LEN_SIZE;
pub const OEM7_CHECKSUM_LEN: usize = 4;

pub(crate) const OEM7_LENGTH_OFFSET: usize = 4; // After message id, type and port

/// Element capacity of the VERSION component store
pub const VERSION_CAPACITY: usize = 8;
/// Element capacity of the HWMONITOR reading store
pub const HW_MONITOR_CAPACITY: usize = 10;

pub(crate) const ASCII_CR: u8 = 0x0d; // '\r'
pub(crate) const ASCII_LF: u8 = 0x0a; // '\n'
pub(crate) const ASCII_RESPONSE_END: u8 = b']';
