use std::{
    fmt, io,
    time::{Duration, Instant},
};

use log::debug;

use crate::{
    constants::{ASCII_CR, ASCII_LF, ASCII_RESPONSE_END},
    oem7_packets::Oem7PacketMeta,
    transport::Transport,
};

/// Stops every log on every port
pub const UNLOG_ALL: &str = "UNLOGALL TRUE";

/// When the receiver emits a requested log
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogTrigger {
    Once,
    /// Every time the log content is updated
    OnNew,
    OnChanged,
    /// Periodically, period in seconds
    OnTime(f64),
}

impl fmt::Display for LogTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogTrigger::Once => f.write_str("ONCE"),
            LogTrigger::OnNew => f.write_str("ONNEW"),
            LogTrigger::OnChanged => f.write_str("ONCHANGED"),
            LogTrigger::OnTime(period) => write!(f, "ONTIME {}", period),
        }
    }
}

/// `LOG` command requesting the binary form of a log
#[derive(Debug, Clone, PartialEq)]
pub struct LogCommand {
    port: String,
    log: &'static str,
    trigger: LogTrigger,
}

impl LogCommand {
    pub fn new<T: Oem7PacketMeta>(port: &str, trigger: LogTrigger) -> Self {
        Self {
            port: port.to_owned(),
            log: T::NAME,
            trigger,
        }
    }

    pub fn log_name(&self) -> &'static str {
        self.log
    }

    pub fn trigger(&self) -> LogTrigger {
        self.trigger
    }
}

impl fmt::Display for LogCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LOG {} {}B {}", self.port, self.log, self.trigger)
    }
}

/// Abbreviated ASCII response, e.g. `<OK [COM1]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    text: String,
}

impl CommandResponse {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_ok(&self) -> bool {
        self.text.starts_with("<OK")
    }
}

/// Writes `command` terminated by a newline, without waiting for a response
pub fn write_command<T: Transport>(transport: &mut T, command: &str) -> io::Result<()> {
    debug!("> {}", command);
    transport.write_all(command.as_bytes())?;
    transport.write_all(&[ASCII_LF])
}

/// Writes `command` and waits up to `timeout` for the response.
///
/// `Ok(None)` means nothing arrived in time. That is not an error: the
/// command is assumed to have taken effect.
pub fn send_command<T: Transport>(
    transport: &mut T,
    command: &str,
    timeout: Duration,
) -> io::Result<Option<CommandResponse>> {
    write_command(transport, command)?;
    Ok(read_response(transport, timeout))
}

/// Waits for the first response byte, then drains pending bytes up to and
/// including `]`. CR and LF only separate the parts of the response.
pub fn read_response<T: Transport>(transport: &mut T, timeout: Duration) -> Option<CommandResponse> {
    let start = Instant::now();
    while transport.available() == 0 {
        if start.elapsed() >= timeout {
            debug!("no response within {:?}", timeout);
            return None;
        }
        std::thread::yield_now();
    }

    let mut text = String::new();
    let mut separator = false;
    while transport.available() > 0 {
        let byte = match transport.read_byte() {
            Ok(byte) => byte,
            Err(_) => break,
        };
        match byte {
            ASCII_CR | ASCII_LF => separator = !text.is_empty(),
            _ => {
                if separator {
                    text.push(' ');
                    separator = false;
                }
                text.push(char::from(byte));
                if byte == ASCII_RESPONSE_END {
                    break;
                }
            },
        }
    }
    debug!("< {}", text);
    Some(CommandResponse { text })
}
