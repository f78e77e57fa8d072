use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};

use colored::*;

use airfresh_common::success;
use airfresh_core::network::discovery::{self, BROADCAST, DiscoveredDevice};
use airfresh_protocols::MIIO_PORT;

use crate::mprint;
use crate::terminal::{colors, format, print, spinner::DiscoverySpinner};

pub async fn discover(address: Option<IpAddr>, window: Duration, quiet: u8) -> anyhow::Result<()> {
    let target: SocketAddr = address.map_or(BROADCAST, |ip| SocketAddr::new(ip, MIIO_PORT));
    print::header("getting ready for discovery", quiet);
    print::print_status(format!("Sending hello to {target}"));

    let spinner: DiscoverySpinner = DiscoverySpinner::start(window);
    let start_time: Instant = Instant::now();
    let result = discovery::discover(target, window, Some(spinner.reporter())).await;
    spinner.finish();

    let devices: Vec<DiscoveredDevice> = result?;
    discovery_ends(&devices, start_time.elapsed(), quiet);
    Ok(())
}

fn discovery_ends(devices: &[DiscoveredDevice], total_time: Duration, quiet: u8) {
    if devices.is_empty() {
        print::header("zero devices detected", quiet);
        print::no_results();
        return;
    }

    print::header("miio discovery", quiet);
    for (idx, device) in devices.iter().enumerate() {
        match quiet {
            2 => {}
            _ => {
                print::tree_head(idx, &device.addr.ip().to_string());
                print::as_tree_one_level(format::discovered_details(device));
            }
        }
        if quiet < 2 && idx + 1 != devices.len() {
            mprint!();
        }
    }

    let found: ColoredString = format!("{} devices", devices.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!("Discovery Complete: {found} answered in {total_time}").color(colors::TEXT_DEFAULT);

    match quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => success!("{output}"),
    }
}
