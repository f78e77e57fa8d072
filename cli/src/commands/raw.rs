use anyhow::Context;
use serde_json::Value;

use airfresh_common::error;

use crate::session::Session;
use crate::terminal::print;

pub fn parse_params(params: Option<&str>) -> anyhow::Result<Value> {
    match params {
        None => Ok(Value::Array(Vec::new())),
        Some(raw) => serde_json::from_str(raw).context("params are not valid JSON"),
    }
}

pub async fn raw(session: &mut Session, method: &str, params: Option<&str>) -> anyhow::Result<()> {
    let params: Value = parse_params(params)?;
    let mut failed: usize = 0;

    for entity in session.hub.select_mut(&session.selection) {
        match entity.raw(method, params.clone()).await {
            Ok(result) => {
                let pretty: String = serde_json::to_string_pretty(&result)?;
                print::print_status(entity.entity_id());
                print::print(&pretty);
            }
            Err(e) => {
                failed += 1;
                error!("{method} on {}: {e}", entity.entity_id());
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} device(s) failed");
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
