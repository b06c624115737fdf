use crate::oem7_packets::{
    fixed_str,
    types::{PositionType, SolutionStatus},
    Oem7PacketMeta,
};

oem7_record! {
    /// Best available position (BESTPOS)
    pub struct BestPos {
        /// See [`SolutionStatus`]
        pub sol_status: u32,
        /// See [`PositionType`]
        pub pos_type: u32,
        /// Degrees
        pub lat: f64,
        /// Degrees
        pub lon: f64,
        /// Height above mean sea level, metres
        pub alt: f64,
        /// Geoid separation of the chosen datum, metres
        pub undulation: f32,
        pub datum_id: u32,
        /// Metres
        pub lat_std: f32,
        /// Metres
        pub lon_std: f32,
        /// Metres
        pub alt_std: f32,
        pub base_id: [u8; 4],
        /// Seconds
        pub diff_age: f32,
        /// Seconds
        pub sol_age: f32,
        pub sats_tracked: u8,
        pub sats_used: u8,
        /// Satellites with L1/E1/B1 signals used in solution
        pub sats_l1: u8,
        /// Satellites with multi-frequency signals used in solution
        pub sats_multi: u8,
        pub reserved: u8,
        pub ext_sol_status: u8,
        pub galileo_beidou_mask: u8,
        pub gps_glonass_mask: u8,
    }
}

impl Oem7PacketMeta for BestPos {
    const MESSAGE_ID: u16 = 42;
    const NAME: &'static str = "BESTPOS";
}

impl BestPos {
    pub fn solution_status(&self) -> Option<SolutionStatus> {
        SolutionStatus::from_raw(self.sol_status)
    }

    pub fn position_type(&self) -> Option<PositionType> {
        PositionType::from_raw(self.pos_type)
    }

    pub fn is_computed(&self) -> bool {
        self.solution_status() == Some(SolutionStatus::Computed)
    }

    pub fn base_station_id(&self) -> &str {
        fixed_str(&self.base_id)
    }
}
