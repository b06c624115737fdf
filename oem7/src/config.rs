use std::time::Duration;

use crate::{
    command::{LogCommand, LogTrigger},
    oem7_packets::{
        BestPos, DualAntennaHeading, Heading2, HwMonitor, RxStatus, RxStatusEvent, Time, Version,
    },
};

/// Which heading log drives validity
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeadingLog {
    /// HEADING2, multi-rover heading
    #[default]
    Heading2,
    /// DUALANTENNAHEADING, dual antenna products
    DualAntennaHeading,
}

/// Logs requested by [`crate::Receiver::start`] and how the session waits
/// for command responses
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReceiverConfig {
    /// Receiver port the logs are requested on
    pub port: String,
    pub heading_log: HeadingLog,
    /// RXSTATUS period, seconds
    pub status_period: f64,
    /// TIME period, seconds
    pub time_period: f64,
    /// BESTPOS period, seconds
    pub position_period: f64,
    pub request_version: bool,
    pub monitor_hardware: bool,
    /// HWMONITOR period, seconds
    pub hardware_period: f64,
    pub log_status_events: bool,
    pub ack_timeout: Duration,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            port: "COM1".to_owned(),
            heading_log: HeadingLog::default(),
            status_period: 1.0,
            time_period: 1.0,
            position_period: 1.0,
            request_version: true,
            monitor_hardware: false,
            hardware_period: 1.0,
            log_status_events: false,
            ack_timeout: Duration::from_millis(100),
        }
    }
}

impl ReceiverConfig {
    /// `LOG` commands issued after the initial unlog, in order
    pub fn log_requests(&self) -> Vec<LogCommand> {
        let port = self.port.as_str();
        let mut logs = Vec::with_capacity(7);
        if self.request_version {
            logs.push(LogCommand::new::<Version>(port, LogTrigger::Once));
        }
        logs.push(LogCommand::new::<RxStatus>(
            port,
            LogTrigger::OnTime(self.status_period),
        ));
        logs.push(LogCommand::new::<Time>(
            port,
            LogTrigger::OnTime(self.time_period),
        ));
        logs.push(LogCommand::new::<BestPos>(
            port,
            LogTrigger::OnTime(self.position_period),
        ));
        logs.push(match self.heading_log {
            HeadingLog::Heading2 => LogCommand::new::<Heading2>(port, LogTrigger::OnNew),
            HeadingLog::DualAntennaHeading => {
                LogCommand::new::<DualAntennaHeading>(port, LogTrigger::OnNew)
            },
        });
        if self.monitor_hardware {
            logs.push(LogCommand::new::<HwMonitor>(
                port,
                LogTrigger::OnTime(self.hardware_period),
            ));
        }
        if self.log_status_events {
            logs.push(LogCommand::new::<RxStatusEvent>(
                port,
                LogTrigger::OnChanged,
            ));
        }
        logs
    }
}
