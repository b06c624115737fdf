use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::{
    command::{send_command, write_command, CommandResponse, LogCommand, LogTrigger, UNLOG_ALL},
    config::ReceiverConfig,
    error::{FrameError, Result},
    oem7_packets::{types::PositionType, Message, Oem7PacketMeta},
    parser::{FrameReader, FrameStats, Header},
    status::{assess, report, report_version, Arrivals, FixStatus, Snapshot},
    transport::Transport,
};

/// Session with one OEM7 receiver.
///
/// The session owns the transport for its whole life. It is driven by
/// calling [`Receiver::poll`] periodically, every poll drains whatever
/// complete frames are buffered and re-derives the fix status.
pub struct Receiver<T: Transport> {
    transport: T,
    config: ReceiverConfig,
    reader: FrameReader,
    snapshot: Snapshot,
    status: FixStatus,
    last_header: Option<Header>,
}

impl<T: Transport> Receiver<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ReceiverConfig::default())
    }

    pub fn with_config(transport: T, config: ReceiverConfig) -> Self {
        Self {
            transport,
            config,
            reader: FrameReader::new(),
            snapshot: Snapshot::default(),
            status: FixStatus::default(),
            last_header: None,
        }
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Stops all logs, then requests the configured ones.
    ///
    /// Responses are awaited for at most `ack_timeout` each. A missing
    /// response is not an error, only transport write failures are.
    pub fn start(&mut self) -> Result<()> {
        info!("starting session on {}", self.config.port);
        write_command(&mut self.transport, UNLOG_ALL)?;
        for log in self.config.log_requests() {
            self.send(&log.to_string())?;
        }
        Ok(())
    }

    /// Stops every log the receiver emits
    pub fn stop(&mut self) -> Result<()> {
        info!("stopping session on {}", self.config.port);
        self.send(UNLOG_ALL)?;
        Ok(())
    }

    /// Requests one more log on the configured port
    pub fn enable_log<P: Oem7PacketMeta>(
        &mut self,
        trigger: LogTrigger,
    ) -> Result<Option<CommandResponse>> {
        let cmd = LogCommand::new::<P>(&self.config.port, trigger);
        self.send(&cmd.to_string())
    }

    /// Sends a raw ASCII command and waits for its response
    pub fn send(&mut self, command: &str) -> Result<Option<CommandResponse>> {
        let resp = send_command(&mut self.transport, command, self.config.ack_timeout)?;
        if let Some(resp) = &resp {
            if !resp.is_ok() {
                warn!("command '{}' rejected: {}", command, resp.text());
            }
        }
        Ok(resp)
    }

    /// Drains every buffered frame and re-derives the fix status.
    ///
    /// Never blocks. Malformed frames are logged and dropped. A poll that
    /// decodes no fresh position and heading leaves the fix invalid.
    pub fn poll(&mut self) -> &FixStatus {
        let mut arrivals = Arrivals::empty();
        while self.transport.available() > 0 {
            match self.reader.read_frame(&mut self.transport) {
                Ok(frame) => match frame.decode() {
                    Ok(msg) => {
                        debug!(
                            "{} ({} bytes) week {} ms {}",
                            msg.name(),
                            frame.payload.len(),
                            frame.header.week,
                            frame.header.ms
                        );
                        self.last_header = Some(frame.header);
                        arrivals |= self.on_message(msg);
                    },
                    Err(err) => warn!("dropping frame: {}", err),
                },
                Err(FrameError::SyncMiss { .. }) => {},
                Err(err) => warn!("dropping frame: {}", err),
            }
        }

        let status = assess(arrivals, &self.snapshot, &self.status);
        if status.valid != self.status.valid {
            info!("fix valid: {} ({:?})", status.valid, status.reason);
        }
        if status.jamming && !self.status.jamming {
            warn!("jamming detected");
        }
        if status.spoofing && !self.status.spoofing {
            warn!("spoofing detected");
        }
        self.status = status;
        &self.status
    }

    fn on_message(&mut self, msg: Message) -> Arrivals {
        match &msg {
            Message::RxStatus(rx) => report(rx),
            Message::Version(version) => report_version(version),
            Message::RxStatusEvent(event) => info!(
                "status event {:?} {:?} bit {}: {}",
                event.word_id(),
                event.event_type(),
                event.bit,
                event.description()
            ),
            Message::HwMonitor(hw) => {
                let errors = hw
                    .readings
                    .iter()
                    .filter(|r| r.boundary_status().is_some_and(|b| b.is_error()));
                for r in errors {
                    warn!("hardware monitor {:?} out of range: {}", r.kind(), r.value);
                }
            },
            _ => {},
        }
        self.snapshot.apply(msg)
    }

    pub fn status(&self) -> &FixStatus {
        &self.status
    }

    pub fn is_valid(&self) -> bool {
        self.status.valid
    }

    pub fn is_jamming(&self) -> bool {
        self.status.jamming
    }

    pub fn is_spoofing(&self) -> bool {
        self.status.spoofing
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Header of the last decoded frame
    pub fn last_header(&self) -> Option<&Header> {
        self.last_header.as_ref()
    }

    pub fn frame_stats(&self) -> FrameStats {
        self.reader.stats()
    }

    /// Latitude, degrees
    pub fn latitude(&self) -> Option<f64> {
        self.snapshot.best_pos.as_ref().map(|p| p.lat)
    }

    /// Longitude, degrees
    pub fn longitude(&self) -> Option<f64> {
        self.snapshot.best_pos.as_ref().map(|p| p.lon)
    }

    /// Height above mean sea level, metres
    pub fn altitude(&self) -> Option<f64> {
        self.snapshot.best_pos.as_ref().map(|p| p.alt)
    }

    pub fn latitude_std(&self) -> Option<f32> {
        self.snapshot.best_pos.as_ref().map(|p| p.lat_std)
    }

    pub fn longitude_std(&self) -> Option<f32> {
        self.snapshot.best_pos.as_ref().map(|p| p.lon_std)
    }

    pub fn altitude_std(&self) -> Option<f32> {
        self.snapshot.best_pos.as_ref().map(|p| p.alt_std)
    }

    pub fn satellites_tracked(&self) -> Option<u8> {
        self.snapshot.best_pos.as_ref().map(|p| p.sats_tracked)
    }

    pub fn satellites_used(&self) -> Option<u8> {
        self.snapshot.best_pos.as_ref().map(|p| p.sats_used)
    }

    /// Heading, degrees
    pub fn heading(&self) -> Option<f32> {
        self.snapshot.heading.as_ref().map(|h| h.heading)
    }

    /// Pitch, degrees
    pub fn pitch(&self) -> Option<f32> {
        self.snapshot.heading.as_ref().map(|h| h.pitch)
    }

    pub fn heading_std(&self) -> Option<f32> {
        self.snapshot.heading.as_ref().map(|h| h.heading_std)
    }

    pub fn pitch_std(&self) -> Option<f32> {
        self.snapshot.heading.as_ref().map(|h| h.pitch_std)
    }

    pub fn heading_position_type(&self) -> Option<PositionType> {
        self.snapshot.heading.as_ref().and_then(|h| h.position_type())
    }

    /// UTC time of the latest TIME log, if its clock model and UTC are valid
    pub fn utc_time(&self) -> Option<DateTime<Utc>> {
        let time = self.snapshot.time.as_ref().filter(|t| t.is_valid())?;
        DateTime::<Utc>::try_from(time).ok()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Ends the session without stopping the logs and returns the transport
    pub fn into_inner(self) -> T {
        self.transport
    }
}
