//! Turns the global flags into a ready [`Hub`].

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

use airfresh_common::config::{Config, DeviceConfig};
use airfresh_common::token::Token;
use airfresh_common::warn;
use airfresh_core::hub::{self, Hub};

use crate::commands::GlobalArgs;

pub const DEFAULT_CONFIG: &str = "airfresh.yaml";

pub struct Session {
    pub hub: Hub,
    /// Entity ids given with `--entity`, empty means every entity.
    pub selection: Vec<String>,
}

/// `--host`/`--token` win over `--config`, which wins over `./airfresh.yaml`.
pub fn resolve_config(args: &GlobalArgs) -> anyhow::Result<Config> {
    match (&args.host, &args.token) {
        (Some(host), Some(token)) => {
            let token: Token = token.parse().context("invalid --token")?;
            return Ok(Config::single(DeviceConfig::new(host.clone(), token, args.name.clone())));
        }
        (Some(_), None) => bail!("--host needs --token"),
        (None, Some(_)) => bail!("--token needs --host"),
        (None, None) => {}
    }

    let path: PathBuf = match &args.config {
        Some(path) => path.clone(),
        None if Path::new(DEFAULT_CONFIG).exists() => PathBuf::from(DEFAULT_CONFIG),
        None => bail!("no device given, pass --host and --token or a --config file"),
    };

    Config::load(&path).with_context(|| format!("loading {}", path.display()))
}

pub async fn open(args: &GlobalArgs) -> anyhow::Result<Session> {
    let config: Config = resolve_config(args)?;
    let hub: Hub = hub::setup_platform(&config).await;

    if hub.entities().is_empty() {
        bail!("none of the configured devices could be set up");
    }

    for id in &args.entities {
        if hub.entity(id).is_none() {
            warn!("No entity {id}");
        }
    }

    Ok(Session {
        hub,
        selection: args.entities.clone(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
