use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::{
    error::DateTimeError,
    oem7_packets::{
        types::{ClockModelStatus, UtcStatus},
        Oem7PacketMeta,
    },
};

oem7_record! {
    /// Time data (TIME)
    pub struct Time {
        /// Clock model status, see [`ClockModelStatus`]
        pub clock_status: u32,
        /// Receiver clock offset from GPS system time, seconds
        pub offset: f64,
        pub offset_std: f64,
        /// GPS system time minus UTC, seconds
        pub utc_offset: f64,
        pub utc_year: u32,
        /// 0 while UTC is unknown
        pub utc_month: u8,
        /// 0 while UTC is unknown
        pub utc_day: u8,
        pub utc_hour: u8,
        pub utc_min: u8,
        /// Milliseconds within the minute, up to 60999 across a leap second
        pub utc_ms: u32,
        /// See [`UtcStatus`]
        pub utc_status: u32,
    }
}

impl Oem7PacketMeta for Time {
    const MESSAGE_ID: u16 = 101;
    const NAME: &'static str = "TIME";
}

impl Time {
    pub fn clock_model_status(&self) -> Option<ClockModelStatus> {
        ClockModelStatus::from_raw(self.clock_status)
    }

    pub fn utc_status(&self) -> Option<UtcStatus> {
        UtcStatus::from_raw(self.utc_status)
    }

    /// Clock model and UTC both valid
    pub fn is_valid(&self) -> bool {
        self.clock_model_status() == Some(ClockModelStatus::Valid)
            && self.utc_status() == Some(UtcStatus::Valid)
    }
}

impl TryFrom<&Time> for DateTime<Utc> {
    type Error = DateTimeError;

    fn try_from(time: &Time) -> Result<Self, Self::Error> {
        let year = i32::try_from(time.utc_year).map_err(|_| DateTimeError::InvalidDate)?;
        let date = NaiveDate::from_ymd_opt(year, time.utc_month.into(), time.utc_day.into())
            .ok_or(DateTimeError::InvalidDate)?;

        if time.utc_ms > 60_999 {
            return Err(DateTimeError::InvalidMilliseconds);
        }
        let mut sec = time.utc_ms / 1000;
        let mut milli = time.utc_ms % 1000;
        // chrono expresses a leap second as second 59 with milli >= 1000
        if sec == 60 {
            sec = 59;
            milli += 1000;
        }
        let t = NaiveTime::from_hms_milli_opt(time.utc_hour.into(), time.utc_min.into(), sec, milli)
            .ok_or(DateTimeError::InvalidTime)?;

        Ok(date.and_time(t).and_utc())
    }
}
