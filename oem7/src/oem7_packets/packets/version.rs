use crate::{
    constants::VERSION_CAPACITY,
    oem7_packets::{fixed_str, types::ComponentType, CountedPacket, Oem7PacketMeta},
};

oem7_record! {
    /// One hardware or software component of the receiver
    pub struct VersionComponent {
        /// See [`ComponentType`]
        pub component_type: u32,
        pub model: [u8; 16],
        pub serial: [u8; 16],
        pub hardware_version: [u8; 16],
        pub software_version: [u8; 16],
        pub boot_version: [u8; 12],
        /// yyyy/mm/dd
        pub compile_date: [u8; 8],
        /// hh:mm:ss
        pub compile_time: [u8; 8],
    }
}

impl VersionComponent {
    pub fn kind(&self) -> Option<ComponentType> {
        ComponentType::from_raw(self.component_type)
    }

    pub fn model(&self) -> &str {
        fixed_str(&self.model)
    }

    pub fn serial(&self) -> &str {
        fixed_str(&self.serial)
    }

    pub fn hardware_version(&self) -> &str {
        fixed_str(&self.hardware_version)
    }

    pub fn software_version(&self) -> &str {
        fixed_str(&self.software_version)
    }

    pub fn boot_version(&self) -> &str {
        fixed_str(&self.boot_version)
    }

    pub fn compile_date(&self) -> &str {
        fixed_str(&self.compile_date)
    }

    pub fn compile_time(&self) -> &str {
        fixed_str(&self.compile_time)
    }
}

/// Receiver component versions (VERSION)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Version {
    pub components: Vec<VersionComponent>,
}

impl Oem7PacketMeta for Version {
    const MESSAGE_ID: u16 = 37;
    const NAME: &'static str = "VERSION";
}

impl CountedPacket for Version {
    type Element = VersionComponent;
    const CAPACITY: usize = VERSION_CAPACITY;

    fn from_elements(components: Vec<VersionComponent>) -> Self {
        Self { components }
    }

    fn elements(&self) -> &[VersionComponent] {
        &self.components
    }
}
