use std::collections::HashMap;

use airfresh_common::{error, info};
use airfresh_core::airfresh::AirFreshEntity;

use crate::commands::status;
use crate::session::Session;

/// Fingerprint of everything `watch` prints, so unchanged polls stay quiet.
fn snapshot(entity: &AirFreshEntity) -> String {
    format!("{}|{:?}", entity.state_label(), entity.attributes())
}

/// Resolves once `signal` fires. A handler that cannot be installed is
/// reported and ends the watch right away.
async fn until_signal<S>(signal: S)
where
    S: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!("Cannot listen for Ctrl-C, stopping: {e}");
    }
}

pub async fn watch(session: &mut Session) -> anyhow::Result<()> {
    info!(
        "Polling every {}s, press Ctrl-C to stop",
        session.hub.scan_interval().as_secs()
    );

    let selection: &[String] = &session.selection;
    let mut last: HashMap<String, String> = HashMap::new();

    for entity in session.hub.entities() {
        if selection.is_empty() || selection.iter().any(|id| id == entity.entity_id()) {
            status::print_line(entity);
            last.insert(entity.entity_id().to_string(), snapshot(entity));
        }
    }

    let shutdown = until_signal(tokio::signal::ctrl_c());

    session
        .hub
        .poll(shutdown, |entity| {
            if !selection.is_empty() && !selection.iter().any(|id| id == entity.entity_id()) {
                return;
            }
            let current: String = snapshot(entity);
            if last.get(entity.entity_id()) != Some(&current) {
                status::print_line(entity);
                last.insert(entity.entity_id().to_string(), current);
            }
        })
        .await;

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
