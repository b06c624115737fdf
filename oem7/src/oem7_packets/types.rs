use bitflags::bitflags;

/// Enum with a fixed set of known raw values,
/// unknown values are reported as `None` by `from_raw`.
macro_rules! raw_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $raw:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr($raw)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )*
        }

        impl $name {
            pub const fn from_raw(raw: $raw) -> Option<Self> {
                match raw {
                    $($value => Some(Self::$variant),)*
                    _ => None,
                }
            }

            pub const fn raw(self) -> $raw {
                self as $raw
            }
        }
    };
}

raw_enum! {
    /// Confidence classification of a computed position or heading
    pub enum SolutionStatus: u32 {
        Computed = 0,
        InsufficientObservations = 1,
        NoConvergence = 2,
        /// Singularity at parameters matrix
        Singularity = 3,
        /// Covariance trace exceeds maximum (trace > 1000 m)
        CovarianceTrace = 4,
        /// Test distance exceeded (maximum of 3 rejections if distance > 10 km)
        TestDistance = 5,
        ColdStart = 6,
        /// Height or velocity limits exceeded
        VelocityHeightLimit = 7,
        Variance = 8,
        Residuals = 9,
        /// Large residuals make position unreliable
        IntegrityWarning = 13,
        /// Receiver is still checking a position entered with FIX
        Pending = 18,
        /// Position entered with FIX is not valid
        InvalidFix = 19,
        Unauthorized = 20,
        /// Selected logging rate is not supported for this solution type
        InvalidRate = 22,
    }
}

raw_enum! {
    /// Method and quality class of a fix
    pub enum PositionType: u32 {
        None = 0,
        FixedPos = 1,
        FixedHeight = 2,
        DopplerVelocity = 8,
        Single = 16,
        PsrDiff = 17,
        Waas = 18,
        Propagated = 19,
        /// Single-frequency RTK, float ambiguities
        L1Float = 32,
        /// Multi-frequency RTK, float ambiguities
        NarrowFloat = 34,
        /// Single-frequency RTK, integer ambiguities
        L1Int = 48,
        /// Multi-frequency RTK, widelane integer ambiguities
        WideInt = 49,
        /// Multi-frequency RTK, narrow-lane integer ambiguities
        NarrowInt = 50,
        RtkDirectIns = 51,
        InsSbas = 52,
        InsPsrSp = 53,
        InsPsrDiff = 54,
        InsRtkFloat = 55,
        InsRtkFixed = 56,
        PppConverging = 68,
        Ppp = 69,
        Operational = 70,
        Warning = 71,
        OutOfBounds = 72,
        InsPppConverging = 73,
        InsPpp = 74,
        PppBasicConverging = 77,
        PppBasic = 78,
        InsPppBasicConverging = 79,
        InsPppBasic = 80,
    }
}

impl PositionType {
    /// Multi-frequency carrier phase solutions, float or integer
    pub const fn is_carrier_phase_multi_frequency(self) -> bool {
        matches!(
            self,
            PositionType::NarrowFloat | PositionType::WideInt | PositionType::NarrowInt
        )
    }
}

raw_enum! {
    pub enum ClockModelStatus: u32 {
        Valid = 0,
        /// Near validity
        Converging = 1,
        /// Iterating towards validity
        Iterating = 2,
        Invalid = 3,
    }
}

raw_enum! {
    pub enum UtcStatus: u32 {
        Invalid = 0,
        Valid = 1,
        /// Leap second event warning
        Warning = 2,
    }
}

raw_enum! {
    /// Status word a status-change event refers to
    pub enum StatusWordId: u32 {
        Error = 0,
        Status = 1,
        Aux1 = 2,
        Aux2 = 3,
        Aux3 = 4,
        Aux4 = 5,
    }
}

raw_enum! {
    pub enum EventType: u32 {
        Clear = 0,
        Set = 1,
    }
}

raw_enum! {
    pub enum ComponentType: u32 {
        Unknown = 0,
        GpsCard = 1,
        Controller = 2,
        Enclosure = 3,
        UserInfo = 8,
    }
}

raw_enum! {
    /// Where a hardware monitor reading sits relative to its limits
    pub enum BoundaryStatus: u8 {
        Acceptable = 0,
        UnderLowerWarning = 1,
        UnderLowerError = 2,
        OverUpperWarning = 3,
        OverUpperError = 4,
    }
}

impl BoundaryStatus {
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            BoundaryStatus::UnderLowerError | BoundaryStatus::OverUpperError
        )
    }
}

raw_enum! {
    pub enum ReadingType: u8 {
        /// Degrees Celsius
        Temperature = 0x01,
        AntennaCurrent = 0x02,
        DigitalCoreVoltage = 0x06,
        AntennaVoltage = 0x07,
        DigitalVoltage = 0x08,
        RegulatedSupplyVoltage = 0x0f,
        Supply1V8 = 0x11,
        SecondaryTemperature = 0x15,
        PeripheralCoreVoltage = 0x16,
        SecondaryAntennaCurrent = 0x17,
        SecondaryAntennaVoltage = 0x18,
    }
}

bitflags! {
    /// Receiver error word, any bit set is a device level fault
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ReceiverError: u32 {
        const DRAM = 0x0000_0001;
        const FIRMWARE = 0x0000_0002;
        const ROM = 0x0000_0004;
        const ESN = 0x0000_0010;
        const AUTHORIZATION = 0x0000_0020;
        const SUPPLY_VOLTAGE = 0x0000_0080;
        const TEMPERATURE = 0x0000_0200;
        const MINOS = 0x0000_0400;
        const PLL_RF = 0x0000_0800;
        const NVM = 0x0000_8000;
        const SOFTWARE_RESOURCE_LIMIT = 0x0001_0000;
        const MODEL_INVALID = 0x0002_0000;
        const REMOTE_LOADING = 0x0010_0000;
        const EXPORT_RESTRICTION = 0x0020_0000;
        const SAFE_MODE = 0x0040_0000;
        const COMPONENT_HARDWARE = 0x8000_0000;

        const _ = !0;
    }
}

bitflags! {
    /// Primary receiver status word
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ReceiverStatus: u32 {
        const ERROR = 0x0000_0001;
        const TEMPERATURE_WARNING = 0x0000_0002;
        const VOLTAGE_WARNING = 0x0000_0004;
        const PRIMARY_ANTENNA_NOT_POWERED = 0x0000_0008;
        const LNA_FAILURE = 0x0000_0010;
        const PRIMARY_ANTENNA_OPEN = 0x0000_0020;
        const PRIMARY_ANTENNA_SHORT = 0x0000_0040;
        const CPU_OVERLOAD = 0x0000_0080;
        const COM_BUFFER_OVERRUN = 0x0000_0100;
        const SPOOFING_DETECTED = 0x0000_0200;
        const LINK_OVERRUN = 0x0000_0800;
        const INPUT_OVERRUN = 0x0000_1000;
        const AUX_TRANSMIT_OVERRUN = 0x0000_2000;
        const ANTENNA_GAIN_OUT_OF_RANGE = 0x0000_4000;
        const JAMMER_DETECTED = 0x0000_8000;
        const INS_RESET = 0x0001_0000;
        const IMU_COMMUNICATION_FAILURE = 0x0002_0000;
        /// Almanac or UTC not yet known
        const ALMANAC_UTC_UNKNOWN = 0x0004_0000;
        const POSITION_SOLUTION_INVALID = 0x0008_0000;
        const POSITION_FIXED = 0x0010_0000;
        const CLOCK_STEERING_DISABLED = 0x0020_0000;
        const CLOCK_MODEL_INVALID = 0x0040_0000;
        const EXTERNAL_OSCILLATOR_LOCKED = 0x0080_0000;
        const SOFTWARE_RESOURCE_WARNING = 0x0100_0000;
        const HDR_TRACKING = 0x0800_0000;
        const DIGITAL_FILTERING = 0x1000_0000;
        const AUX3_EVENT = 0x2000_0000;
        const AUX2_EVENT = 0x4000_0000;
        const AUX1_EVENT = 0x8000_0000;

        const _ = !0;
    }
}

impl ReceiverStatus {
    pub const PRIMARY_ANTENNA_FAULTS: Self = Self::PRIMARY_ANTENNA_NOT_POWERED
        .union(Self::LNA_FAILURE)
        .union(Self::PRIMARY_ANTENNA_OPEN)
        .union(Self::PRIMARY_ANTENNA_SHORT)
        .union(Self::ANTENNA_GAIN_OUT_OF_RANGE);

    /// Conditions an RTK fix can't be trusted under
    pub const RTK_PREREQUISITE_FAULTS: Self = Self::ALMANAC_UTC_UNKNOWN
        .union(Self::POSITION_SOLUTION_INVALID)
        .union(Self::CLOCK_MODEL_INVALID);

    /// Reported as diagnostics only
    pub const WARNINGS: Self = Self::TEMPERATURE_WARNING
        .union(Self::VOLTAGE_WARNING)
        .union(Self::CPU_OVERLOAD)
        .union(Self::COM_BUFFER_OVERRUN)
        .union(Self::LINK_OVERRUN)
        .union(Self::INPUT_OVERRUN)
        .union(Self::AUX_TRANSMIT_OVERRUN)
        .union(Self::INS_RESET)
        .union(Self::IMU_COMMUNICATION_FAILURE)
        .union(Self::EXTERNAL_OSCILLATOR_LOCKED)
        .union(Self::SOFTWARE_RESOURCE_WARNING);
}

bitflags! {
    /// Auxiliary 1 status word
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Aux1Status: u32 {
        const JAMMER_RF1 = 0x0000_0001;
        const JAMMER_RF2 = 0x0000_0002;
        const JAMMER_RF3 = 0x0000_0004;
        const POSITION_AVERAGING = 0x0000_0008;
        const JAMMER_RF4 = 0x0000_0010;
        const JAMMER_RF5 = 0x0000_0020;
        const JAMMER_RF6 = 0x0000_0040;
        const USB_NOT_CONNECTED = 0x0000_0080;
        const ETHERNET_NOT_CONNECTED = 0x0004_0000;
        const IMU_STATUS_ERROR = 0x4000_0000;
        const IMU_OUTLIER = 0x8000_0000;

        const _ = !0;
    }
}

impl Aux1Status {
    pub const JAMMERS: Self = Self::JAMMER_RF1
        .union(Self::JAMMER_RF2)
        .union(Self::JAMMER_RF3)
        .union(Self::JAMMER_RF4)
        .union(Self::JAMMER_RF5)
        .union(Self::JAMMER_RF6);
}

bitflags! {
    /// Auxiliary 2 status word
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Aux2Status: u32 {
        const SPI_FAILURE = 0x0000_0001;
        const I2C_FAILURE = 0x0000_0002;
        const SECONDARY_ANTENNA_NOT_POWERED = 0x1000_0000;
        const SECONDARY_ANTENNA_OPEN = 0x2000_0000;
        const SECONDARY_ANTENNA_SHORT = 0x4000_0000;
        const RESET_LOOP = 0x8000_0000;

        const _ = !0;
    }
}

impl Aux2Status {
    pub const SECONDARY_ANTENNA_FAULTS: Self = Self::SECONDARY_ANTENNA_NOT_POWERED
        .union(Self::SECONDARY_ANTENNA_OPEN)
        .union(Self::SECONDARY_ANTENNA_SHORT);
}

bitflags! {
    /// Auxiliary 4 status word, solution quality warnings
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Aux4Status: u32 {
        /// Less than 60% of available satellites are tracked well
        const TRACKING_60 = 0x0000_0001;
        /// Less than 15% of available satellites are tracked well
        const TRACKING_15 = 0x0000_0002;
        const CLOCK_FREEWHEELING = 0x0000_1000;
        const CORRECTIONS_60 = 0x0000_4000;
        const CORRECTIONS_15 = 0x0000_8000;
        const BAD_RTK_GEOMETRY = 0x0001_0000;
        const LONG_RTK_BASELINE = 0x0008_0000;
        const POOR_RTK_LINK = 0x0010_0000;
        const POOR_ALIGN_LINK = 0x0020_0000;
        const GLIDE_NOT_ACTIVE = 0x0040_0000;
        const BAD_PDP_GEOMETRY = 0x0080_0000;
        const NO_TERRASTAR_SUBSCRIPTION = 0x0100_0000;
        const BAD_PPP_GEOMETRY = 0x1000_0000;
        const NO_INS_ALIGNMENT = 0x4000_0000;
        const INS_NOT_CONVERGED = 0x8000_0000;

        const _ = !0;
    }
}

impl Aux4Status {
    pub const WARNINGS: Self = Self::TRACKING_60
        .union(Self::TRACKING_15)
        .union(Self::CORRECTIONS_60)
        .union(Self::CORRECTIONS_15)
        .union(Self::BAD_RTK_GEOMETRY)
        .union(Self::LONG_RTK_BASELINE)
        .union(Self::POOR_RTK_LINK)
        .union(Self::POOR_ALIGN_LINK)
        .union(Self::GLIDE_NOT_ACTIVE)
        .union(Self::BAD_PDP_GEOMETRY)
        .union(Self::NO_TERRASTAR_SUBSCRIPTION)
        .union(Self::BAD_PPP_GEOMETRY)
        .union(Self::NO_INS_ALIGNMENT)
        .union(Self::INS_NOT_CONVERGED);
}
