use crate::{
    constants::HW_MONITOR_CAPACITY,
    oem7_packets::{
        types::{BoundaryStatus, ReadingType},
        CountedPacket, Oem7PacketMeta,
    },
};

oem7_record! {
    pub struct HwMonitorReading {
        pub value: f32,
        /// See [`BoundaryStatus`]
        pub boundary: u8,
        /// See [`ReadingType`]
        pub reading_type: u8,
        pub reserved: [u8; 2],
    }
}

impl HwMonitorReading {
    pub fn boundary_status(&self) -> Option<BoundaryStatus> {
        BoundaryStatus::from_raw(self.boundary)
    }

    pub fn kind(&self) -> Option<ReadingType> {
        ReadingType::from_raw(self.reading_type)
    }
}

/// Hardware monitor readings (HWMONITOR)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HwMonitor {
    pub readings: Vec<HwMonitorReading>,
}

impl HwMonitor {
    /// First reading of the given type
    pub fn reading(&self, kind: ReadingType) -> Option<&HwMonitorReading> {
        self.readings.iter().find(|r| r.kind() == Some(kind))
    }
}

impl Oem7PacketMeta for HwMonitor {
    const MESSAGE_ID: u16 = 963;
    const NAME: &'static str = "HWMONITOR";
}

impl CountedPacket for HwMonitor {
    type Element = HwMonitorReading;
    const CAPACITY: usize = HW_MONITOR_CAPACITY;

    fn from_elements(readings: Vec<HwMonitorReading>) -> Self {
        Self { readings }
    }

    fn elements(&self) -> &[HwMonitorReading] {
        &self.readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_readings() {
        let payload = [
            2, 0, 0, 0, // count
            0x00, 0x00, 0x2c, 0x42, 0x00, 0x01, 0x00, 0x00, // 43.0 C, acceptable
            0x00, 0x00, 0x00, 0x3f, 0x03, 0x02, 0x00, 0x00, // 0.5 A, over upper warning
        ];
        let hw = HwMonitor::decode(&payload).unwrap();
        assert_eq!(hw.readings.len(), 2);

        let temp = hw.reading(ReadingType::Temperature).unwrap();
        assert_eq!(temp.value, 43.0);
        assert_eq!(temp.boundary_status(), Some(BoundaryStatus::Acceptable));

        let current = hw.reading(ReadingType::AntennaCurrent).unwrap();
        assert_eq!(current.value, 0.5);
        assert_eq!(
            current.boundary_status(),
            Some(BoundaryStatus::OverUpperWarning)
        );
        assert!(hw.reading(ReadingType::AntennaVoltage).is_none());
        assert_eq!(hw.encode(), payload);
    }

    #[test]
    fn test_full_capacity() {
        let hw = HwMonitor {
            readings: vec![HwMonitorReading::default(); HW_MONITOR_CAPACITY],
        };
        assert_eq!(HwMonitor::decode(&hw.encode()), Ok(hw));
    }
}
