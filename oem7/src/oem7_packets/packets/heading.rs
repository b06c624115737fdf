use crate::oem7_packets::{
    fixed_str,
    types::{PositionType, SolutionStatus},
    Oem7PacketMeta,
};

oem7_record! {
    /// Heading between a base and one of possibly several rovers (HEADING2)
    pub struct Heading2 {
        /// See [`SolutionStatus`]
        pub sol_status: u32,
        /// See [`PositionType`]
        pub pos_type: u32,
        /// Baseline length, metres
        pub length: f32,
        /// Degrees, 0 to 359.999
        pub heading: f32,
        /// Degrees, +-90
        pub pitch: f32,
        pub reserved: f32,
        pub heading_std: f32,
        pub pitch_std: f32,
        pub rover_id: [u8; 4],
        pub base_id: [u8; 4],
        pub sats_tracked: u8,
        pub sats_used: u8,
        /// Satellites above the elevation mask angle
        pub sats_obs: u8,
        pub sats_multi: u8,
        pub solution_source: u8,
        pub ext_sol_status: u8,
        pub galileo_beidou_mask: u8,
        pub gps_glonass_mask: u8,
    }
}

impl Oem7PacketMeta for Heading2 {
    const MESSAGE_ID: u16 = 1335;
    const NAME: &'static str = "HEADING2";
}

oem7_record! {
    /// Synchronous heading of a dual antenna receiver (DUALANTENNAHEADING)
    pub struct DualAntennaHeading {
        pub sol_status: u32,
        pub pos_type: u32,
        pub length: f32,
        pub heading: f32,
        pub pitch: f32,
        pub reserved: f32,
        pub heading_std: f32,
        pub pitch_std: f32,
        pub station_id: [u8; 4],
        pub sats_tracked: u8,
        pub sats_used: u8,
        pub sats_obs: u8,
        pub sats_multi: u8,
        pub solution_source: u8,
        pub ext_sol_status: u8,
        pub galileo_beidou_mask: u8,
        pub gps_glonass_mask: u8,
    }
}

impl Oem7PacketMeta for DualAntennaHeading {
    const MESSAGE_ID: u16 = 2042;
    const NAME: &'static str = "DUALANTENNAHEADING";
}

impl Heading2 {
    pub fn rover(&self) -> &str {
        fixed_str(&self.rover_id)
    }

    pub fn base(&self) -> &str {
        fixed_str(&self.base_id)
    }
}

impl DualAntennaHeading {
    pub fn station(&self) -> &str {
        fixed_str(&self.station_id)
    }
}

/// Heading fields shared by [`Heading2`] and [`DualAntennaHeading`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading {
    pub message_id: u16,
    pub sol_status: u32,
    pub pos_type: u32,
    pub length: f32,
    pub heading: f32,
    pub pitch: f32,
    pub heading_std: f32,
    pub pitch_std: f32,
    pub sats_tracked: u8,
    pub sats_used: u8,
    pub sats_obs: u8,
    pub sats_multi: u8,
    pub solution_source: u8,
    pub ext_sol_status: u8,
}

impl Heading {
    pub fn solution_status(&self) -> Option<SolutionStatus> {
        SolutionStatus::from_raw(self.sol_status)
    }

    pub fn position_type(&self) -> Option<PositionType> {
        PositionType::from_raw(self.pos_type)
    }

    pub fn is_computed(&self) -> bool {
        self.solution_status() == Some(SolutionStatus::Computed)
    }
}

macro_rules! impl_heading_from {
    ($ty:ty) => {
        impl From<&$ty> for Heading {
            fn from(h: &$ty) -> Self {
                Self {
                    message_id: <$ty as Oem7PacketMeta>::MESSAGE_ID,
                    sol_status: h.sol_status,
                    pos_type: h.pos_type,
                    length: h.length,
                    heading: h.heading,
                    pitch: h.pitch,
                    heading_std: h.heading_std,
                    pitch_std: h.pitch_std,
                    sats_tracked: h.sats_tracked,
                    sats_used: h.sats_used,
                    sats_obs: h.sats_obs,
                    sats_multi: h.sats_multi,
                    solution_source: h.solution_source,
                    ext_sol_status: h.ext_sol_status,
                }
            }
        }
    };
}

impl_heading_from!(Heading2);
impl_heading_from!(DualAntennaHeading);
