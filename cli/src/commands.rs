pub mod call;
pub mod control;
pub mod discover;
pub mod info;
pub mod raw;
pub mod services;
pub mod status;
pub mod watch;

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "airfresh")]
#[command(about = "Control Xiaomi Mi Air Purifier A1 (dmaker.airfresh.a1) units over miIO.")]
#[command(version)]
pub struct CommandLine {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// YAML file with a `fan:` list of xiaomi_airfresh platforms
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Device address, used instead of a config file
    #[arg(long, global = true)]
    pub host: Option<String>,
    /// 32 character hex device token, used with --host
    #[arg(long, global = true)]
    pub token: Option<String>,
    /// Display name of the device given by --host
    #[arg(long, global = true)]
    pub name: Option<String>,
    /// Only act on this entity (e.g. fan.xiaomi_air_fresh), repeatable
    #[arg(short = 'e', long = "entity", global = true)]
    pub entities: Vec<String>,
    /// More log output, repeatable
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Less output, repeatable
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
    /// Skip the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show state and attributes of every device
    #[command(alias = "s")]
    Status,
    /// Turn on, optionally straight into a mode
    On {
        /// Off, Auto, Sleep or Favourite
        #[arg(long)]
        speed: Option<String>,
    },
    /// Turn off
    Off,
    /// Set the operation mode (Off, Auto, Sleep, Favourite)
    Speed { speed: String },
    /// Call a fan service, e.g. airfresh_set_ptc_on
    #[command(alias = "c")]
    Call {
        service: String,
        /// Favourite speed for airfresh_set_favourite_speed (1-200)
        #[arg(long)]
        speed: Option<String>,
        /// Raw service data as JSON, merged with the other flags
        #[arg(long)]
        data: Option<String>,
    },
    /// Poll devices and print every change, Ctrl-C to stop
    #[command(alias = "w")]
    Watch,
    /// Show the miIO.info of every device
    #[command(alias = "i")]
    Info,
    /// Send a raw miIO command
    Raw {
        method: String,
        /// Parameters as JSON, defaults to []
        params: Option<String>,
    },
    /// Find miIO devices on the local network
    #[command(alias = "d")]
    Discover {
        /// Address to send the hello to, defaults to the broadcast address
        #[arg(long)]
        address: Option<IpAddr>,
        /// Seconds to listen for replies
        #[arg(long, default_value_t = 5)]
        window: u64,
    },
    /// List the fan services this integration registers
    Services,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line_is_consistent() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = CommandLine::try_parse_from([
            "airfresh", "call", "fan.airfresh_set_favourite_speed", "--speed", "120", "-e", "fan.kitchen",
            "--host", "10.0.0.2", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.global.entities, vec!["fan.kitchen".to_string()]);
        assert_eq!(cli.global.host.as_deref(), Some("10.0.0.2"));
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(cli.command, Commands::Call { ref speed, .. } if speed.as_deref() == Some("120")));
    }

    #[test]
    fn discover_defaults() {
        let cli = CommandLine::try_parse_from(["airfresh", "d"]).unwrap();
        assert!(matches!(cli.command, Commands::Discover { address: None, window: 5 }));
    }
}
