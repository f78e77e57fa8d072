mod commands;
mod session;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, Commands, call, control, discover, info, raw, services, status, watch};
use session::Session;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let global = commands.global;

    logging::init(global.verbose, global.quiet);
    print::banner(global.no_banner, global.quiet);

    match commands.command {
        Commands::Services => {
            services::services(global.quiet);
            return Ok(());
        }
        Commands::Discover { address, window } => {
            return discover::discover(address, Duration::from_secs(window), global.quiet).await;
        }
        _ => {}
    }

    let mut session: Session = session::open(&global).await?;

    match commands.command {
        Commands::Status => status::status(&mut session, global.quiet),
        Commands::On { speed } => control::control(&mut session, control::Action::On(speed)).await,
        Commands::Off => control::control(&mut session, control::Action::Off).await,
        Commands::Speed { speed } => control::control(&mut session, control::Action::Speed(speed)).await,
        Commands::Call { service, speed, data } => {
            call::call(&mut session, &service, speed.as_deref(), data.as_deref()).await
        }
        Commands::Watch => watch::watch(&mut session).await,
        Commands::Info => info::info(&mut session, global.quiet).await,
        Commands::Raw { method, params } => raw::raw(&mut session, &method, params.as_deref()).await,
        Commands::Services | Commands::Discover { .. } => Ok(()),
    }
}
