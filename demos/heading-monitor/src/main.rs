use std::{thread, time::Duration};

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction};
use log::{info, warn};
use oem7::{FixState, HeadingLog, Receiver, ReceiverConfig};

mod serial;

use serial::SerialTransport;

fn cli() -> clap::Command {
    clap::Command::new(clap::crate_name!())
        .about(clap::crate_description!())
        .arg_required_else_help(true)
        .arg(
            Arg::new("port")
                .value_name("port")
                .short('p')
                .long("port")
                .required(true)
                .help("Serial port the receiver is connected to"),
        )
        .arg(
            Arg::new("baud")
                .value_name("baud")
                .short('s')
                .long("baud")
                .default_value("115200")
                .value_parser(value_parser!(u32))
                .help("Baud rate for the selected port"),
        )
        .arg(
            Arg::new("receiver-port")
                .long("receiver-port")
                .default_value("COM1")
                .help("Receiver side name of the port, used in LOG commands"),
        )
        .arg(
            Arg::new("dual-antenna")
                .long("dual-antenna")
                .action(ArgAction::SetTrue)
                .help("Request DUALANTENNAHEADING instead of HEADING2"),
        )
        .arg(
            Arg::new("hwmonitor")
                .long("hwmonitor")
                .action(ArgAction::SetTrue)
                .help("Also request HWMONITOR"),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .default_value("200")
                .value_parser(value_parser!(u64))
                .help("Milliseconds between polls"),
        )
        .arg(
            Arg::new("polls")
                .long("polls")
                .value_parser(value_parser!(u64))
                .help("Stop after this many polls, runs forever if omitted"),
        )
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("OEM7_LOGLEVEL")
        .init();

    let args = cli().get_matches();
    let port = args
        .get_one::<String>("port")
        .expect("Expected required 'port' cli argument");
    let baud = args.get_one::<u32>("baud").copied().unwrap_or(115_200);
    let interval = Duration::from_millis(args.get_one::<u64>("interval").copied().unwrap_or(200));
    let polls = args.get_one::<u64>("polls").copied();

    let config = ReceiverConfig {
        port: args
            .get_one::<String>("receiver-port")
            .cloned()
            .unwrap_or_else(|| "COM1".to_owned()),
        heading_log: if args.get_flag("dual-antenna") {
            HeadingLog::DualAntennaHeading
        } else {
            HeadingLog::Heading2
        },
        monitor_hardware: args.get_flag("hwmonitor"),
        ..Default::default()
    };

    let transport = SerialTransport::open(port, baud)?;
    let mut receiver = Receiver::with_config(transport, config);
    receiver.start()?;
    info!("Opened {}, waiting for logs...", port);

    let mut count = 0;
    while polls.is_none_or(|n| count < n) {
        thread::sleep(interval);
        count += 1;

        let status = *receiver.poll();
        match status.state {
            FixState::NoData => continue,
            FixState::FixValid => info!(
                "lat {:.8} lon {:.8} alt {:.3} m, heading {:.3} pitch {:.3} ({:?})",
                receiver.latitude().unwrap_or_default(),
                receiver.longitude().unwrap_or_default(),
                receiver.altitude().unwrap_or_default(),
                receiver.heading().unwrap_or_default(),
                receiver.pitch().unwrap_or_default(),
                receiver.heading_position_type(),
            ),
            state => info!("{:?}: {:?}", state, status.reason),
        }
        if status.jamming || status.spoofing {
            warn!("jamming {} spoofing {}", status.jamming, status.spoofing);
        }
        if let Some(time) = receiver.utc_time() {
            info!("UTC {:?}", time);
        }
    }

    receiver.stop()?;
    let stats = receiver.frame_stats();
    info!(
        "{} frames, {} checksum errors, {} sync misses",
        stats.frames, stats.checksum_errors, stats.sync_misses
    );
    Ok(())
}
