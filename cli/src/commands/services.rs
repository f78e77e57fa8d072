use colored::*;

use airfresh_core::airfresh::AirFreshService;

use crate::terminal::{colors, print};

pub fn services(quiet: u8) {
    print::header("fan services", quiet);

    let width: usize = AirFreshService::ALL
        .iter()
        .map(|service| service.full_name().len())
        .max()
        .unwrap_or(0);

    for service in AirFreshService::ALL {
        print::print(&format!(
            "{}  {}",
            format!("{:<width$}", service.full_name()).color(colors::ACCENT),
            service.description().color(colors::TEXT_DEFAULT),
        ));
    }
}
