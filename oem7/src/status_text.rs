//! Descriptions of the receiver error word and the status words, indexed
//! by bit position. `None` marks bits without a documented meaning.

use crate::oem7_packets::types::StatusWordId;

pub type BitTable = [Option<&'static str>; 32];

pub static RECEIVER_ERROR_TEXT: BitTable = [
    Some("DRAM failure"),
    Some("Invalid firmware"),
    Some("ROM"),
    None,
    Some("ESN access"),
    Some("Authorization code"),
    None,
    Some("Supply voltage"),
    None,
    Some("Temperature status"),
    Some("MINOS status"),
    Some("PLL RF status"),
    None,
    None,
    None,
    Some("NVM status"),
    Some("Software resource limit exceeded"),
    Some("Model invalid for this receiver"),
    None,
    None,
    Some("Remote loading has begun"),
    Some("Export restriction"),
    Some("Safe Mode"),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    Some("Component hardware failure"),
];

pub static RECEIVER_STATUS_TEXT: BitTable = [
    Some("Error"),
    Some("Temperature warning"),
    Some("Voltage supply warning"),
    Some("Primary antenna not powered"),
    Some("LNA failure"),
    Some("Primary antenna open circuit"),
    Some("Primary antenna short circuit"),
    Some("CPU overload"),
    Some("COM buffer overrun"),
    Some("Spoofing detected"),
    None,
    Some("Link overrun"),
    Some("Input overrun"),
    Some("Aux transmit overrun"),
    Some("Antenna gain out of range"),
    Some("Jammer detected"),
    Some("INS reset"),
    Some("IMU communication failure"),
    Some("GPS almanac flag/UTC known"),
    Some("Position solution invalid"),
    Some("Position fixed"),
    Some("Clock steering disabled"),
    Some("Clock model invalid"),
    Some("External oscillator locked"),
    Some("Software resource warning"),
    // two bit version field
    None,
    None,
    Some("Tracking mode: HDR"),
    Some("Digital filtering enabled"),
    Some("Auxiliary 3 event"),
    Some("Auxiliary 2 event"),
    Some("Auxiliary 1 event"),
];

pub static AUX1_STATUS_TEXT: BitTable = [
    Some("Jammer detected on RF1"),
    Some("Jammer detected on RF2"),
    Some("Jammer detected on RF3"),
    Some("Position averaging on"),
    Some("Jammer detected on RF4"),
    Some("Jammer detected on RF5"),
    Some("Jammer detected on RF6"),
    Some("USB not connected"),
    Some("USB1 buffer overrun"),
    Some("USB2 buffer overrun"),
    Some("USB3 buffer overrun"),
    None,
    Some("Profile activation error"),
    Some("Throttled ethernet reception"),
    None,
    None,
    None,
    None,
    Some("Ethernet not connected"),
    Some("ICOM1 buffer overrun"),
    Some("ICOM2 buffer overrun"),
    Some("ICOM3 buffer overrun"),
    Some("NCOM1 buffer overrun"),
    Some("NCOM2 buffer overrun"),
    Some("NCOM3 buffer overrun"),
    None,
    None,
    None,
    None,
    None,
    Some("Status error reported by the IMU"),
    Some("IMU measurement outlier detected"),
];

pub static AUX2_STATUS_TEXT: BitTable = [
    Some("SPI communication failure"),
    Some("I2C communication failure"),
    Some("COM4 buffer overrun"),
    Some("COM5 buffer overrun"),
    None,
    None,
    None,
    None,
    None,
    Some("COM1 buffer overrun"),
    Some("COM2 buffer overrun"),
    Some("COM3 buffer overrun"),
    Some("PLL RF1 unlock"),
    Some("PLL RF2 unlock"),
    Some("PLL RF3 unlock"),
    Some("PLL RF4 unlock"),
    Some("PLL RF5 unlock"),
    Some("PLL RF6 unlock"),
    Some("CCOM1 buffer overrun"),
    Some("CCOM2 buffer overrun"),
    Some("CCOM3 buffer overrun"),
    Some("CCOM4 buffer overrun"),
    Some("CCOM5 buffer overrun"),
    Some("CCOM6 buffer overrun"),
    Some("ICOM4 buffer overrun"),
    Some("ICOM5 buffer overrun"),
    Some("ICOM6 buffer overrun"),
    Some("ICOM7 buffer overrun"),
    Some("Secondary antenna not powered"),
    Some("Secondary antenna open circuit"),
    Some("Secondary antenna short circuit"),
    Some("Reset loop detected"),
];

pub static AUX3_STATUS_TEXT: BitTable = [
    Some("SCOM buffer overrun"),
    Some("WCOM1 buffer overrun"),
    Some("FILE buffer overrun"),
    None,
    None,
    None,
    None,
    None,
    Some("GPS reference time is incorrect"),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    Some("DMI hardware failure"),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    Some("Spoofing calibration failed"),
    Some("Spoofing calibration required"),
    None,
    None,
    None,
    Some("Web content is corrupt or does not exist"),
    Some("RF calibration data has an error"),
    Some("RF calibration data exists and has no errors"),
];

pub static AUX4_STATUS_TEXT: BitTable = [
    Some("< 60% of available satellites are tracked well"),
    Some("< 15% of available satellites are tracked well"),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    Some("Clock freewheeling due to bad position integrity"),
    None,
    Some("< 60% of expected corrections available"),
    Some("< 15% of expected corrections available"),
    Some("Bad RTK geometry"),
    None,
    None,
    Some("Long RTK baseline > 50 km"),
    Some("Poor RTK COM link corrections quality <= 60%"),
    Some("Poor ALIGN COM link corrections quality <= 60%"),
    Some("GLIDE not active"),
    Some("Bad PDP geometry"),
    Some("No TerraStar subscription"),
    None,
    None,
    None,
    Some("Bad PPP geometry"),
    None,
    Some("No INS alignment"),
    Some("INS not converged"),
];

pub fn table(word: StatusWordId) -> &'static BitTable {
    match word {
        StatusWordId::Error => &RECEIVER_ERROR_TEXT,
        StatusWordId::Status => &RECEIVER_STATUS_TEXT,
        StatusWordId::Aux1 => &AUX1_STATUS_TEXT,
        StatusWordId::Aux2 => &AUX2_STATUS_TEXT,
        StatusWordId::Aux3 => &AUX3_STATUS_TEXT,
        StatusWordId::Aux4 => &AUX4_STATUS_TEXT,
    }
}

/// Description of a single bit, `None` for undocumented bits
pub fn describe_bit(word: StatusWordId, bit: u32) -> Option<&'static str> {
    table(word).get(bit as usize).copied().flatten()
}

/// Mask and description of every documented bit set in `value`
pub fn set_bits(table: &'static BitTable, value: u32) -> impl Iterator<Item = (u32, &'static str)> {
    table
        .iter()
        .enumerate()
        .filter(move |(bit, _)| value & (1 << bit) != 0)
        .filter_map(|(bit, text)| text.map(|t| (1u32 << bit, t)))
}
