//! Derivation of the fix validity, jamming and spoofing flags from the
//! latest decoded logs.
//!
//! Validity is re-derived from scratch every poll: a fix is only valid for
//! the poll in which both a fresh computed position and a fresh computed
//! heading arrived. Faults are taken from the latest receiver status,
//! whether or not it arrived during this poll. Jamming and spoofing only
//! change when a fresh receiver status arrives with a clear error word.

use bitflags::bitflags;
use log::{debug, info, warn};

use crate::{
    oem7_packets::{
        types::{Aux1Status, Aux2Status, Aux4Status, ReceiverError, ReceiverStatus, StatusWordId},
        BestPos, Heading, HwMonitor, Message, RxStatus, RxStatusEvent, Time, Version,
    },
    status_text::{set_bits, table},
};

bitflags! {
    /// Logs that arrived during one poll
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Arrivals: u8 {
        const RX_STATUS = 0x01;
        const TIME = 0x02;
        const BEST_POS = 0x04;
        const HEADING = 0x08;
        const VERSION = 0x10;
        const HW_MONITOR = 0x20;
        const RX_STATUS_EVENT = 0x40;
    }
}

/// Latest copy of every tracked log, `None` until the first one arrives
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub rx_status: Option<RxStatus>,
    pub rx_status_event: Option<RxStatusEvent>,
    pub time: Option<Time>,
    pub best_pos: Option<BestPos>,
    /// HEADING2 or DUALANTENNAHEADING, whichever came last
    pub heading: Option<Heading>,
    pub version: Option<Version>,
    pub hw_monitor: Option<HwMonitor>,
}

impl Snapshot {
    /// Overwrites the copy of the log kind `msg` belongs to
    pub fn apply(&mut self, msg: Message) -> Arrivals {
        match msg {
            Message::RxStatus(m) => {
                self.rx_status = Some(m);
                Arrivals::RX_STATUS
            },
            Message::RxStatusEvent(m) => {
                self.rx_status_event = Some(m);
                Arrivals::RX_STATUS_EVENT
            },
            Message::Time(m) => {
                self.time = Some(m);
                Arrivals::TIME
            },
            Message::BestPos(m) => {
                self.best_pos = Some(m);
                Arrivals::BEST_POS
            },
            Message::Heading2(m) => {
                self.heading = Some(Heading::from(&m));
                Arrivals::HEADING
            },
            Message::DualAntennaHeading(m) => {
                self.heading = Some(Heading::from(&m));
                Arrivals::HEADING
            },
            Message::Version(m) => {
                self.version = Some(m);
                Arrivals::VERSION
            },
            Message::HwMonitor(m) => {
                self.hw_monitor = Some(m);
                Arrivals::HW_MONITOR
            },
            Message::Unknown(_) => Arrivals::empty(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FixState {
    /// Nothing arrived this poll
    #[default]
    NoData,
    /// Logs arrived, but neither a usable position nor a usable heading
    PartialData,
    BestFixAvailable,
    HeadingFixAvailable,
    FixValid,
}

/// First reason that kept the fix from being valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidReason {
    NoFreshData,
    /// Receiver error word is non-zero
    DeviceFault(ReceiverError),
    AntennaFault {
        primary: ReceiverStatus,
        secondary: Aux2Status,
    },
    RtkPrerequisite(ReceiverStatus),
    MissingBestPosition,
    /// Raw solution status of the position
    BestPositionNotComputed(u32),
    MissingHeading,
    /// Raw solution status of the heading
    HeadingNotComputed(u32),
    /// Heading solution is not a multi-frequency carrier phase one
    UnsupportedPositionType(u32),
}

/// Conditions worth reporting that do not affect validity
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Warnings {
    pub receiver: ReceiverStatus,
    pub aux4: Aux4Status,
}

impl Warnings {
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty() && self.aux4.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixStatus {
    pub state: FixState,
    pub valid: bool,
    pub jamming: bool,
    pub spoofing: bool,
    /// `None` when `valid`
    pub reason: Option<InvalidReason>,
    pub warnings: Warnings,
}

fn fault(rx: &RxStatus) -> Option<InvalidReason> {
    let error = rx.receiver_error();
    if !error.is_empty() {
        return Some(InvalidReason::DeviceFault(error));
    }

    let status = rx.receiver_status();
    let primary = status & ReceiverStatus::PRIMARY_ANTENNA_FAULTS;
    let secondary = rx.aux2_status() & Aux2Status::SECONDARY_ANTENNA_FAULTS;
    if !primary.is_empty() || !secondary.is_empty() {
        return Some(InvalidReason::AntennaFault { primary, secondary });
    }

    let rtk = status & ReceiverStatus::RTK_PREREQUISITE_FAULTS;
    if !rtk.is_empty() {
        return Some(InvalidReason::RtkPrerequisite(rtk));
    }
    None
}

pub fn is_jamming(rx: &RxStatus) -> bool {
    rx.receiver_status().contains(ReceiverStatus::JAMMER_DETECTED)
        || rx.aux1_status().intersects(Aux1Status::JAMMERS)
}

pub fn is_spoofing(rx: &RxStatus) -> bool {
    rx.receiver_status().contains(ReceiverStatus::SPOOFING_DETECTED)
}

fn warnings(rx: &RxStatus) -> Warnings {
    Warnings {
        receiver: rx.receiver_status() & ReceiverStatus::WARNINGS,
        aux4: rx.aux4_status() & Aux4Status::WARNINGS,
    }
}

/// Logs every documented bit set in the error word and the status words,
/// fault and warning bits at warn level
pub fn report(rx: &RxStatus) {
    for (mask, text) in set_bits(table(StatusWordId::Error), rx.error) {
        warn!("receiver error {:08x}: {}", mask, text);
    }
    let words = [
        (StatusWordId::Status, rx.status.word),
        (StatusWordId::Aux1, rx.aux1.word),
        (StatusWordId::Aux2, rx.aux2.word),
        (StatusWordId::Aux3, rx.aux3.word),
        (StatusWordId::Aux4, rx.aux4.word),
    ];
    for (id, word) in words {
        let notable = match id {
            StatusWordId::Status => (ReceiverStatus::PRIMARY_ANTENNA_FAULTS
                | ReceiverStatus::RTK_PREREQUISITE_FAULTS
                | ReceiverStatus::WARNINGS
                | ReceiverStatus::JAMMER_DETECTED
                | ReceiverStatus::SPOOFING_DETECTED)
                .bits(),
            StatusWordId::Aux1 => Aux1Status::JAMMERS.bits(),
            StatusWordId::Aux2 => Aux2Status::SECONDARY_ANTENNA_FAULTS.bits(),
            StatusWordId::Aux4 => Aux4Status::WARNINGS.bits(),
            _ => 0,
        };
        for (mask, text) in set_bits(table(id), word) {
            if mask & notable != 0 {
                warn!("{:?} {:08x}: {}", id, mask, text);
            } else {
                debug!("{:?} {:08x}: {}", id, mask, text);
            }
        }
    }
}

/// Logs the receiver components reported by VERSION
pub fn report_version(version: &Version) {
    for c in &version.components {
        info!(
            "{:?} model {} serial {} hw {} sw {} boot {} built {} {}",
            c.kind(),
            c.model(),
            c.serial(),
            c.hardware_version(),
            c.software_version(),
            c.boot_version(),
            c.compile_date(),
            c.compile_time()
        );
    }
}

/// Derives the fix status of one poll.
///
/// `arrivals` are the logs decoded during the poll, `snapshot` holds the
/// latest copy of each log and `previous` is the status derived by the
/// previous poll.
pub fn assess(arrivals: Arrivals, snapshot: &Snapshot, previous: &FixStatus) -> FixStatus {
    let rx = snapshot.rx_status.as_ref();

    let fault = rx.and_then(fault);
    let device_fault = matches!(fault, Some(InvalidReason::DeviceFault(_)));

    // a receiver error ends the evaluation before interference is looked at
    let (jamming, spoofing) = match rx {
        Some(rx) if arrivals.contains(Arrivals::RX_STATUS) && !device_fault => {
            (is_jamming(rx), is_spoofing(rx))
        },
        _ => (previous.jamming, previous.spoofing),
    };
    let warnings = rx.map(warnings).unwrap_or_default();

    let best = snapshot
        .best_pos
        .as_ref()
        .filter(|_| arrivals.contains(Arrivals::BEST_POS));
    let best_reason = match best {
        None => Some(InvalidReason::MissingBestPosition),
        Some(pos) if !pos.is_computed() => {
            Some(InvalidReason::BestPositionNotComputed(pos.sol_status))
        },
        Some(_) => None,
    };

    let heading = snapshot
        .heading
        .as_ref()
        .filter(|_| arrivals.contains(Arrivals::HEADING));
    let heading_reason = match heading {
        None => Some(InvalidReason::MissingHeading),
        Some(h) if !h.is_computed() => Some(InvalidReason::HeadingNotComputed(h.sol_status)),
        Some(h)
            if !h
                .position_type()
                .is_some_and(|t| t.is_carrier_phase_multi_frequency()) =>
        {
            Some(InvalidReason::UnsupportedPositionType(h.pos_type))
        },
        Some(_) => None,
    };

    let best_ok = fault.is_none() && best_reason.is_none();
    let heading_ok = fault.is_none() && heading_reason.is_none();
    let state = if arrivals.is_empty() {
        FixState::NoData
    } else {
        match (best_ok, heading_ok) {
            (true, true) => FixState::FixValid,
            (true, false) => FixState::BestFixAvailable,
            (false, true) => FixState::HeadingFixAvailable,
            (false, false) => FixState::PartialData,
        }
    };

    let reason = if arrivals.is_empty() {
        Some(InvalidReason::NoFreshData)
    } else {
        fault.or(best_reason).or(heading_reason)
    };

    FixStatus {
        state,
        valid: state == FixState::FixValid,
        jamming,
        spoofing,
        reason,
        warnings,
    }
}
